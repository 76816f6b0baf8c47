//! Short code allocation.
//!
//! An [`Allocator`] mints a fresh [`ShortCode`] every time it is called.
//! The default [`CounterAllocator`] keeps no state of its own: uniqueness
//! comes from an atomic counter living in the key-value store.

pub mod counter;

pub use counter::CounterAllocator;

use async_trait::async_trait;
use shortlink_core::{ShortCode, StoreError};

/// Trait for minting new short codes.
///
/// Every successful call must return a code no other call has returned.
/// Failures of the backing store are surfaced unchanged and never retried.
#[async_trait]
pub trait Allocator: Send + Sync + 'static {
    async fn next_code(&self) -> Result<ShortCode, StoreError>;
}
