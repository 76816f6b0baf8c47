//! Key schema shared by every store backend.
//!
//! These patterns are part of the storage format; changing them orphans
//! existing mappings.

use crate::shortcode::ShortCode;
use crate::url_hash::UrlHash;

/// Global counter incremented once per newly minted short code.
pub const URL_ID_KEY: &str = "next.url.id";

/// Dedup value marking an expired mapping; treated the same as a miss.
pub const EXPIRED_PLACEHOLDER: &str = "{}";

/// Key mapping a short code to the original URL.
pub fn short_link_key(code: &ShortCode) -> String {
    format!("shortlink:{}:url", code.as_str())
}

/// Key mapping a URL hash to its issued short code.
pub fn url_hash_key(hash: &UrlHash) -> String {
    format!("urlhash:{}:url", hash.as_str())
}

/// Key mapping a short code to its [`LinkDetail`](crate::LinkDetail) record.
pub fn short_link_detail_key(code: &ShortCode) -> String {
    format!("shortlink:{}:detail", code.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_formats() {
        let code = ShortCode::new("1a").unwrap();
        let hash = UrlHash::of("https://example.com");

        assert_eq!(URL_ID_KEY, "next.url.id");
        assert_eq!(short_link_key(&code), "shortlink:1a:url");
        assert_eq!(short_link_detail_key(&code), "shortlink:1a:detail");
        assert_eq!(url_hash_key(&hash), format!("urlhash:{}:url", hash));
    }
}
