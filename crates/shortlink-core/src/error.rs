use thiserror::Error;

/// Errors raised while constructing or decoding core values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Errors reported by a [`KeyValueStore`](crate::KeyValueStore) backend.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
    #[error("store operation timed out: {0}")]
    Timeout(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("store operation failed: {0}")]
    Operation(String),
}

/// Errors returned by a [`LinkStore`](crate::LinkStore).
///
/// Only [`LinkError::NotFound`] and the input errors are client-facing;
/// everything else is a server-side failure.
#[derive(Debug, Clone, Error)]
pub enum LinkError {
    #[error("short link not found: {0}")]
    NotFound(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
    #[error("link detail encoding failed: {0}")]
    Encoding(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl LinkError {
    /// Returns `true` if the error means "no live mapping".
    pub fn is_not_found(&self) -> bool {
        matches!(self, LinkError::NotFound(_))
    }
}

impl From<CoreError> for LinkError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidShortCode(message) => Self::InvalidShortCode(message),
        }
    }
}
