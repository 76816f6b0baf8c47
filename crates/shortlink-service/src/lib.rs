//! The short-link storage engine.
//!
//! [`LinkService`] implements [`shortlink_core::LinkStore`] on top of any
//! [`shortlink_core::KeyValueStore`], using an
//! [`Allocator`](shortlink_allocator::Allocator) to mint codes.

pub mod service;

pub use service::LinkService;
pub use shortlink_core::{LinkDetail, LinkError, LinkStore, ShortCode};
