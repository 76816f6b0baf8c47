use axum::http::HeaderValue;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use shortlink_core::LinkDetail;

use crate::error::{AppError, Result};

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub expiration_in_minutes: i64,
}

impl ShortenRequest {
    /// Checks the request and returns the expiration as an unsigned count.
    pub fn validate(&self) -> Result<u64> {
        if self.url.trim().is_empty() {
            return Err(AppError::BadRequest("url is required".to_string()));
        }
        // Stored URLs are replayed verbatim as the redirect `Location` header.
        if HeaderValue::try_from(self.url.as_str()).is_err() {
            return Err(AppError::BadRequest(
                "url contains characters not allowed in a redirect".to_string(),
            ));
        }
        u64::try_from(self.expiration_in_minutes).map_err(|_| {
            AppError::BadRequest(format!(
                "expiration_in_minutes must be >= 0, got {}",
                self.expiration_in_minutes
            ))
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub short_link: String,
    pub short_url: String,
}

#[derive(Debug, Deserialize)]
pub struct InfoQuery {
    pub shortlink: Option<String>,
}

/// Body of `GET /api/info`: the stored detail plus the deadline derived from it.
#[derive(Debug, Serialize, Deserialize)]
pub struct InfoResponse {
    #[serde(flatten)]
    pub detail: LinkDetail,
    pub expires_at: Option<Timestamp>,
}

impl From<LinkDetail> for InfoResponse {
    fn from(detail: LinkDetail) -> Self {
        let expires_at = detail.expires_at();
        Self { detail, expires_at }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str, expiration_in_minutes: i64) -> ShortenRequest {
        ShortenRequest {
            url: url.to_string(),
            expiration_in_minutes,
        }
    }

    #[test]
    fn valid_request() {
        assert_eq!(request("https://example.com", 60).validate().unwrap(), 60);
        assert_eq!(request("https://example.com", 0).validate().unwrap(), 0);
    }

    #[test]
    fn missing_url() {
        assert!(request("", 60).validate().is_err());
        assert!(request("   ", 60).validate().is_err());
    }

    #[test]
    fn url_must_fit_in_a_location_header() {
        assert!(request("https://example.com/a\nb", 60).validate().is_err());
        assert!(request("https://example.com/a\rb", 60).validate().is_err());
        assert!(request("https://example.com/a\u{7f}", 60).validate().is_err());
        let query_url = request("https://example.com/a?b=c&d=%20", 60);
        assert_eq!(query_url.validate().unwrap(), 60);
    }

    #[test]
    fn info_response_flattens_detail() {
        let detail = LinkDetail {
            url: "https://example.com".to_string(),
            expiration_in_minutes: 60,
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
        };

        let value = serde_json::to_value(InfoResponse::from(detail)).unwrap();
        assert_eq!(value["url"], "https://example.com");
        assert_eq!(value["expiration_in_minutes"], 60);
        assert_eq!(value["created_at"], "2024-01-01T00:00:00Z");
        assert_eq!(value["expires_at"], "2024-01-01T01:00:00Z");
    }

    #[test]
    fn negative_expiration() {
        assert!(request("https://example.com", -1).validate().is_err());
    }

    #[test]
    fn expiration_defaults_to_zero() {
        let req: ShortenRequest = serde_json::from_str(r#"{"url":"https://a.b"}"#).unwrap();
        assert_eq!(req.expiration_in_minutes, 0);
    }
}
