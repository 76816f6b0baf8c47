use sha2::{Digest, Sha256};
use std::fmt::Display;

/// Content hash of a URL, used as the deduplication key.
///
/// SHA-256 over the raw URL bytes, hex encoded. No normalization is applied:
/// byte-identical URLs hash identically, anything else may not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlHash(String);

impl UrlHash {
    /// Hashes the given URL.
    pub fn of(url: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UrlHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digest() {
        assert_eq!(
            UrlHash::of("").as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn deterministic_and_fixed_length() {
        let a = UrlHash::of("https://example.com/a");
        let b = UrlHash::of("https://example.com/a");
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn no_normalization() {
        assert_ne!(
            UrlHash::of("https://example.com/a"),
            UrlHash::of("https://example.com/a/")
        );
        assert_ne!(
            UrlHash::of("https://example.com/a"),
            UrlHash::of("HTTPS://example.com/a")
        );
    }
}
