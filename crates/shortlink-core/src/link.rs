use crate::error::LinkError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::time::Duration;

type Result<T> = std::result::Result<T, LinkError>;

/// TTL used when a link is created with zero expiration minutes.
///
/// Zero does not mean "never expires": the mapping lives for one hundred
/// years, which every supported store accepts as a finite TTL.
pub const UNBOUNDED_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Converts a client-supplied expiration in minutes into a store TTL.
///
/// Zero maps to [`UNBOUNDED_TTL`]; anything longer than that is clamped to it.
pub fn ttl_for_minutes(expiration_in_minutes: u64) -> Duration {
    if expiration_in_minutes == 0 {
        return UNBOUNDED_TTL;
    }
    expiration_in_minutes
        .checked_mul(60)
        .map(Duration::from_secs)
        .map_or(UNBOUNDED_TTL, |ttl| ttl.min(UNBOUNDED_TTL))
}

/// The detail record stored alongside every short link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkDetail {
    /// The original URL that was shortened.
    pub url: String,
    /// Expiration requested at creation time, in minutes.
    pub expiration_in_minutes: u64,
    /// When the link was created.
    pub created_at: Timestamp,
}

impl LinkDetail {
    /// Encodes the record for storage under the detail key.
    pub fn encode(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| LinkError::Encoding(e.to_string()))
    }

    /// Decodes a record read from the detail key.
    pub fn decode(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| LinkError::Encoding(format!("malformed link detail '{raw}': {e}")))
    }

    /// When the mapping stops being live, as seen at creation time.
    pub fn expires_at(&self) -> Option<Timestamp> {
        let ttl = jiff::SignedDuration::try_from(ttl_for_minutes(self.expiration_in_minutes)).ok()?;
        self.created_at.checked_add(ttl).ok()
    }
}

/// The short-link storage engine.
///
/// `shorten` is idempotent per URL while the mapping is live; `unshorten` and
/// `info` report [`LinkError::NotFound`] for codes that never existed or have
/// expired, which are deliberately indistinguishable.
#[async_trait]
pub trait LinkStore: Send + Sync + 'static {
    /// Shortens `url`, reusing the live code for it if one exists.
    async fn shorten(&self, url: &str, expiration_in_minutes: u64) -> Result<ShortCode>;

    /// Resolves a short code to its original URL.
    async fn unshorten(&self, code: &ShortCode) -> Result<String>;

    /// Returns the detail record of a short code.
    async fn info(&self, code: &ShortCode) -> Result<LinkDetail>;
}
