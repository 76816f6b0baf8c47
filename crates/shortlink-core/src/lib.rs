//! Core types and traits for the shortlink URL shortener.
//!
//! This crate provides the shared vocabulary used by the allocator, the
//! storage backends, the link service and the HTTP gateway: short codes and
//! their base-62 codec, the key schema, URL hashing, the stored link detail
//! record and the two seams of the system, [`KeyValueStore`] and
//! [`LinkStore`].

pub mod base62;
pub mod error;
pub mod keys;
pub mod link;
pub mod shortcode;
pub mod store;
pub mod url_hash;

pub use error::{CoreError, LinkError, StoreError};
pub use link::{ttl_for_minutes, LinkDetail, LinkStore};
pub use shortcode::ShortCode;
pub use store::KeyValueStore;
pub use url_hash::UrlHash;
