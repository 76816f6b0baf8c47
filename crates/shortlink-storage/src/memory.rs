use crate::clock::{Clock, SystemClock};
use async_trait::async_trait;
use dashmap::DashMap;
use jiff::{SignedDuration, Timestamp};
use shortlink_core::store::Result;
use shortlink_core::{KeyValueStore, StoreError};
use std::time::Duration;
use tracing::trace;

/// In-memory storage entry.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expire_at: Option<Timestamp>,
}

impl Entry {
    fn is_expired(&self, now: Timestamp) -> bool {
        self.expire_at.is_some_and(|expire_at| now >= expire_at)
    }
}

/// In-memory implementation of [`KeyValueStore`] using DashMap.
///
/// Expiry mirrors a real store's TTL: an entry past its deadline is treated
/// as absent and dropped the next time it is touched. Nothing scans for
/// expired entries in the background.
///
/// `incr` runs under the shard lock of its key, so concurrent increments are
/// linearizable within the process.
#[derive(Debug)]
pub struct InMemoryStore<C = SystemClock> {
    storage: DashMap<String, Entry>,
    clock: C,
}

impl InMemoryStore<SystemClock> {
    /// Creates a new in-memory store backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for InMemoryStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> InMemoryStore<C> {
    /// Creates a new in-memory store that reads time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            storage: DashMap::new(),
            clock,
        }
    }

    /// Number of stored entries, including expired ones not yet touched.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    fn deadline(&self, ttl: Duration) -> Option<Timestamp> {
        let ttl = SignedDuration::try_from(ttl).ok()?;
        self.clock.now().checked_add(ttl).ok()
    }
}

#[async_trait]
impl<C: Clock> KeyValueStore for InMemoryStore<C> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = self.clock.now();

        let Some(entry) = self.storage.get(key) else {
            trace!(key, "miss");
            return Ok(None);
        };

        if entry.is_expired(now) {
            drop(entry);
            // re-check under the write lock so a fresh `set` is not lost
            self.storage.remove_if(key, |_, e| e.is_expired(now));
            trace!(key, "expired");
            return Ok(None);
        }

        Ok(Some(entry.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        // a TTL too large to represent behaves as no expiry
        let entry = Entry {
            value: value.to_owned(),
            expire_at: self.deadline(ttl),
        };
        self.storage.insert(key.to_owned(), entry);
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let now = self.clock.now();
        let mut entry = self
            .storage
            .entry(key.to_owned())
            .or_insert_with(|| Entry {
                value: "0".to_string(),
                expire_at: None,
            });

        if entry.is_expired(now) {
            entry.value = "0".to_string();
            entry.expire_at = None;
        }

        let current: i64 = entry.value.parse().map_err(|_| {
            StoreError::InvalidData(format!(
                "value of '{key}' is not an integer: '{}'",
                entry.value
            ))
        })?;
        let next = current
            .checked_add(1)
            .ok_or_else(|| StoreError::InvalidData(format!("increment of '{key}' overflows")))?;

        entry.value = next.to_string();
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::sync::Arc;

    const HOUR: Duration = Duration::from_secs(3600);

    fn clocked() -> (ManualClock, InMemoryStore<ManualClock>) {
        let clock = ManualClock::new(Timestamp::from_second(1_700_000_000).unwrap());
        (clock.clone(), InMemoryStore::with_clock(clock))
    }

    #[tokio::test]
    async fn set_and_get() {
        let store = InMemoryStore::new();

        store.set("k", "v", HOUR).await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn get_nonexistent() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_overwrites() {
        let store = InMemoryStore::new();

        store.set("k", "old", HOUR).await.unwrap();
        store.set("k", "new", HOUR).await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn entry_expires_after_ttl() {
        let (clock, store) = clocked();

        store.set("k", "v", HOUR).await.unwrap();

        clock.advance(SignedDuration::from_secs(3599));
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));

        clock.advance(SignedDuration::from_secs(1));
        assert_eq!(store.get("k").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn set_over_expired_entry() {
        let (clock, store) = clocked();

        store.set("k", "old", Duration::from_secs(1)).await.unwrap();
        clock.advance(SignedDuration::from_secs(5));
        store.set("k", "new", HOUR).await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn huge_ttl_does_not_expire() {
        let (clock, store) = clocked();

        store.set("k", "v", Duration::MAX).await.unwrap();
        clock.advance(SignedDuration::from_hours(24 * 365 * 200));

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn incr_starts_from_zero() {
        let store = InMemoryStore::new();

        assert_eq!(store.incr("n").await.unwrap(), 1);
        assert_eq!(store.incr("n").await.unwrap(), 2);
        assert_eq!(store.get("n").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn incr_existing_integer() {
        let store = InMemoryStore::new();

        store.set("n", "41", HOUR).await.unwrap();

        assert_eq!(store.incr("n").await.unwrap(), 42);
    }

    #[tokio::test]
    async fn incr_rejects_non_integer() {
        let store = InMemoryStore::new();

        store.set("n", "abc", HOUR).await.unwrap();

        let err = store.incr("n").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidData(_)));
    }

    #[tokio::test]
    async fn incr_overflow() {
        let store = InMemoryStore::new();

        store.set("n", &i64::MAX.to_string(), HOUR).await.unwrap();

        assert!(store.incr("n").await.is_err());
    }

    #[tokio::test]
    async fn incr_restarts_after_expiry() {
        let (clock, store) = clocked();

        store.set("n", "10", Duration::from_secs(1)).await.unwrap();
        clock.advance(SignedDuration::from_secs(2));

        assert_eq!(store.incr("n").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn concurrent_incr_is_linearizable() {
        let store = Arc::new(InMemoryStore::new());
        let mut handles = vec![];

        for _ in 0..64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move { store.incr("n").await.unwrap() }));
        }

        let mut seen = Vec::new();
        for handle in handles {
            seen.push(handle.await.unwrap());
        }
        seen.sort_unstable();

        assert_eq!(seen, (1..=64).collect::<Vec<i64>>());
    }

    #[tokio::test]
    async fn set_many_uses_shared_ttl() {
        let (clock, store) = clocked();
        let entries = vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
        ];

        store.set_many(&entries, HOUR).await.unwrap();
        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));

        clock.advance(SignedDuration::from_hours(1));
        assert_eq!(store.get("a").await.unwrap(), None);
        assert_eq!(store.get("b").await.unwrap(), None);
    }
}
