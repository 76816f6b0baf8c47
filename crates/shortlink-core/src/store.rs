use crate::error::StoreError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub type Result<T> = std::result::Result<T, StoreError>;

/// A client of an external key-value store with native per-key expiry.
///
/// Implementations must be safe to share across tasks. Expiry is owned by
/// the store: an expired key is indistinguishable from one that never
/// existed.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Returns the value stored under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value, expiring
    /// after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Atomically increments the integer under `key` and returns the new value.
    ///
    /// A missing key counts as `0`. Concurrent callers never observe the same
    /// returned value.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Stores several entries sharing one `ttl`.
    ///
    /// The default writes them one at a time in order, stopping at the first
    /// failure and leaving earlier writes in place. Backends with
    /// transactions override this to make the batch all-or-nothing.
    async fn set_many(&self, entries: &[(String, String)], ttl: Duration) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value, ttl).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        (**self).set(key, value, ttl).await
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        (**self).incr(key).await
    }

    async fn set_many(&self, entries: &[(String, String)], ttl: Duration) -> Result<()> {
        (**self).set_many(entries, ttl).await
    }
}
