use async_trait::async_trait;
use jiff::Timestamp;
use shortlink_allocator::{Allocator, CounterAllocator};
use shortlink_core::keys::{self, EXPIRED_PLACEHOLDER};
use shortlink_core::{
    ttl_for_minutes, KeyValueStore, LinkDetail, LinkError, LinkStore, ShortCode, UrlHash,
};
use std::sync::Arc;

type Result<T> = std::result::Result<T, LinkError>;

/// A concrete implementation of the [`LinkStore`] trait.
///
/// This service wraps a [`KeyValueStore`] and an [`Allocator`] to handle:
/// - deduplication of repeated `shorten` calls through the URL hash index
/// - code allocation on a genuine miss
/// - writing the code, hash and detail keys with one shared TTL
///
/// The dedup check and the final write are not atomic with respect to each
/// other. Two concurrent first-time `shorten` calls for the same URL can both
/// miss the index and receive different codes; both mappings stay valid and
/// the index ends up pointing at whichever write landed last.
///
/// The three keys are written through [`KeyValueStore::set_many`]. On a
/// store that makes the batch atomic (Redis) a failed write leaves nothing
/// behind; on a store using the sequential default, keys written before the
/// failure stay in place until they expire. The counter increment is never
/// rolled back, so a failed `shorten` burns one code.
#[derive(Debug)]
pub struct LinkService<S, A = CounterAllocator<S>> {
    store: Arc<S>,
    allocator: Arc<A>,
}

impl<S, A> Clone for LinkService<S, A> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            allocator: Arc::clone(&self.allocator),
        }
    }
}

impl<S: KeyValueStore> LinkService<S> {
    /// Creates a new `LinkService` allocating codes from the store's
    /// `next.url.id` counter.
    pub fn new(store: S) -> Self {
        let store = Arc::new(store);
        let allocator = CounterAllocator::new(Arc::clone(&store));
        Self {
            store,
            allocator: Arc::new(allocator),
        }
    }
}

impl<S: KeyValueStore, A: Allocator> LinkService<S, A> {
    /// Creates a new `LinkService` with a custom allocator.
    pub fn with_allocator(store: S, allocator: A) -> Self {
        Self {
            store: Arc::new(store),
            allocator: Arc::new(allocator),
        }
    }

    /// Returns the live code already issued for `hash`, if any.
    async fn live_code_for(&self, hash: &UrlHash) -> Result<Option<ShortCode>> {
        let Some(stored) = self.store.get(&keys::url_hash_key(hash)).await? else {
            return Ok(None);
        };

        if stored == EXPIRED_PLACEHOLDER {
            return Ok(None);
        }

        ShortCode::new(&stored).map(Some).map_err(|e| {
            LinkError::Encoding(format!("url hash index for {hash} holds bad code: {e}"))
        })
    }
}

#[async_trait]
impl<S: KeyValueStore, A: Allocator> LinkStore for LinkService<S, A> {
    async fn shorten(&self, url: &str, expiration_in_minutes: u64) -> Result<ShortCode> {
        if url.is_empty() {
            return Err(LinkError::InvalidUrl("URL cannot be empty".to_string()));
        }

        let hash = UrlHash::of(url);
        if let Some(code) = self.live_code_for(&hash).await? {
            return Ok(code);
        }

        let code = self.allocator.next_code().await?;

        let detail = LinkDetail {
            url: url.to_string(),
            expiration_in_minutes,
            created_at: Timestamp::now(),
        };
        let entries = [
            (keys::short_link_key(&code), url.to_string()),
            (keys::url_hash_key(&hash), code.as_str().to_string()),
            (keys::short_link_detail_key(&code), detail.encode()?),
        ];

        self.store
            .set_many(&entries, ttl_for_minutes(expiration_in_minutes))
            .await?;

        Ok(code)
    }

    async fn unshorten(&self, code: &ShortCode) -> Result<String> {
        self.store
            .get(&keys::short_link_key(code))
            .await?
            .ok_or_else(|| LinkError::NotFound(code.to_string()))
    }

    async fn info(&self, code: &ShortCode) -> Result<LinkDetail> {
        let raw = self
            .store
            .get(&keys::short_link_detail_key(code))
            .await?
            .ok_or_else(|| LinkError::NotFound(code.to_string()))?;
        LinkDetail::decode(&raw)
    }
}
