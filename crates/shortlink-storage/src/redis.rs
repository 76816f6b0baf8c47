use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use shortlink_core::store::Result;
use shortlink_core::{KeyValueStore, StoreError};
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Redis implementation of [`KeyValueStore`].
///
/// Values are plain strings written with `SET key value EX ttl`; the counter
/// uses `INCR`. [`KeyValueStore::set_many`] is sent as a `MULTI`/`EXEC`
/// pipeline, so a batch is either fully applied or not at all.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> StoreError {
    let message = format!("{operation}: {err}");
    if err.is_timeout() {
        StoreError::Timeout(message)
    } else if err.is_connection_dropped() || err.is_connection_refusal() || err.is_io_error() {
        StoreError::Unavailable(message)
    } else {
        StoreError::Operation(message)
    }
}

/// Redis rejects `EX 0`; round sub-second TTLs up to one second.
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

impl RedisStore {
    /// Creates a store from an existing connection manager.
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    /// Connects to Redis and verifies the connection with a `PING`.
    ///
    /// # Arguments
    ///
    /// * `redis_url` - Redis connection string (e.g. `redis://127.0.0.1:6379/0`)
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| map_redis_error("failed to create Redis client", e))?;
        let mut conn = ConnectionManager::new(client)
            .await
            .map_err(|e| map_redis_error("failed to connect to Redis", e))?;

        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| map_redis_error("Redis PING failed", e))?;

        info!("connected to Redis");
        Ok(Self::new(conn))
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        trace!(key, "GET");

        let mut conn = self.conn.clone();
        conn.get::<_, Option<String>>(key).await.map_err(|e| {
            warn!(key, error = %e, "Redis error on get");
            map_redis_error("failed to fetch value from Redis", e)
        })
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        trace!(key, ttl_secs = ttl.as_secs(), "SET");

        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl_seconds(ttl))
            .await
            .map_err(|e| {
                warn!(key, error = %e, "Redis error on set");
                map_redis_error("failed to write value to Redis", e)
            })
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        trace!(key, "INCR");

        let mut conn = self.conn.clone();
        conn.incr::<_, _, i64>(key, 1_i64).await.map_err(|e| {
            warn!(key, error = %e, "Redis error on incr");
            map_redis_error("failed to increment counter in Redis", e)
        })
    }

    async fn set_many(&self, entries: &[(String, String)], ttl: Duration) -> Result<()> {
        let seconds = ttl_seconds(ttl);
        let mut pipe = redis::pipe();
        pipe.atomic();
        for (key, value) in entries {
            pipe.set_ex(key, value, seconds).ignore();
        }

        let mut conn = self.conn.clone();
        pipe.query_async::<()>(&mut conn).await.map_err(|e| {
            warn!(keys = entries.len(), error = %e, "Redis error on MULTI/EXEC");
            map_redis_error("failed to write batch to Redis", e)
        })?;

        debug!(keys = entries.len(), ttl_secs = seconds, "wrote batch to Redis");
        Ok(())
    }
}
