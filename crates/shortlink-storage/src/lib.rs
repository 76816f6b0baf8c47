//! Key-value store backends for shortlink.
//!
//! - [`RedisStore`]: the production backend, using Redis' native `EX`
//!   expiry and `INCR`.
//! - [`InMemoryStore`]: a single-process stand-in with the same semantics,
//!   used by tests and the `in-memory` gateway backend.

pub mod clock;
pub mod memory;
pub mod redis;

pub use clock::{Clock, ManualClock, SystemClock};
pub use memory::InMemoryStore;
pub use redis::RedisStore;
pub use shortlink_core::store::Result;
pub use shortlink_core::{KeyValueStore, StoreError};
