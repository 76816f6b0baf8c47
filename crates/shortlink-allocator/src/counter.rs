use crate::Allocator;
use async_trait::async_trait;
use shortlink_core::keys::URL_ID_KEY;
use shortlink_core::{KeyValueStore, ShortCode, StoreError};
use std::sync::Arc;
use typed_builder::TypedBuilder;

/// Allocates short codes from a global counter kept in the store.
///
/// Each call issues one atomic `INCR` and base-62 encodes the result, so the
/// first code handed out on an empty store is `"1"`. The counter value is
/// never cached locally.
#[derive(Debug, TypedBuilder)]
pub struct CounterAllocator<S> {
    store: Arc<S>,
    #[builder(default = URL_ID_KEY.to_string(), setter(into))]
    counter_key: String,
}

impl<S> Clone for CounterAllocator<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            counter_key: self.counter_key.clone(),
        }
    }
}

impl<S: KeyValueStore> CounterAllocator<S> {
    /// Creates an allocator using the default `next.url.id` counter.
    pub fn new(store: Arc<S>) -> Self {
        Self::builder().store(store).build()
    }
}

#[async_trait]
impl<S: KeyValueStore> Allocator for CounterAllocator<S> {
    async fn next_code(&self) -> Result<ShortCode, StoreError> {
        let id = self.store.incr(&self.counter_key).await?;
        let id = u64::try_from(id).map_err(|_| {
            StoreError::InvalidData(format!(
                "counter '{}' went negative: {id}",
                self.counter_key
            ))
        })?;
        Ok(ShortCode::from_id(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shortlink_core::store::Result;
    use shortlink_storage::InMemoryStore;
    use std::collections::HashSet;
    use std::time::Duration;

    fn allocator() -> (Arc<InMemoryStore>, CounterAllocator<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        let allocator = CounterAllocator::new(Arc::clone(&store));
        (store, allocator)
    }

    #[tokio::test]
    async fn first_code_is_one() {
        let (_, allocator) = allocator();
        assert_eq!(allocator.next_code().await.unwrap().as_str(), "1");
    }

    #[tokio::test]
    async fn sequential_codes_encode_increasing_ids() {
        let (store, allocator) = allocator();

        let mut previous = 0;
        for _ in 0..100 {
            let id = allocator.next_code().await.unwrap().to_id().unwrap();
            assert!(id > previous);
            previous = id;
        }

        assert_eq!(previous, 100);
        assert_eq!(
            store.get(URL_ID_KEY).await.unwrap().as_deref(),
            Some("100")
        );
    }

    #[tokio::test]
    async fn continues_from_stored_counter() {
        let (store, allocator) = allocator();
        store
            .set(URL_ID_KEY, "61", Duration::from_secs(3600))
            .await
            .unwrap();

        assert_eq!(allocator.next_code().await.unwrap().as_str(), "10");
    }

    #[tokio::test]
    async fn custom_counter_key() {
        let store = Arc::new(InMemoryStore::new());
        let allocator = CounterAllocator::builder()
            .store(Arc::clone(&store))
            .counter_key("tenant.a.id")
            .build();

        allocator.next_code().await.unwrap();

        assert_eq!(store.get("tenant.a.id").await.unwrap().as_deref(), Some("1"));
        assert_eq!(store.get(URL_ID_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn concurrent_allocations_are_distinct() {
        let (_, allocator) = allocator();
        let mut handles = vec![];

        for _ in 0..50 {
            let allocator = allocator.clone();
            handles.push(tokio::spawn(async move {
                allocator.next_code().await.unwrap()
            }));
        }

        let mut codes = HashSet::new();
        for handle in handles {
            assert!(codes.insert(handle.await.unwrap()));
        }
        assert_eq!(codes.len(), 50);
    }

    struct DownStore;

    #[async_trait]
    impl KeyValueStore for DownStore {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(StoreError::Unavailable("down".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<()> {
            Err(StoreError::Unavailable("down".to_string()))
        }

        async fn incr(&self, _key: &str) -> Result<i64> {
            Err(StoreError::Timeout("incr".to_string()))
        }
    }

    #[tokio::test]
    async fn store_failure_is_surfaced() {
        let allocator = CounterAllocator::new(Arc::new(DownStore));
        let err = allocator.next_code().await.unwrap_err();
        assert!(matches!(err, StoreError::Timeout(_)));
    }
}
