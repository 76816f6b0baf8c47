use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shortlink_core::LinkError;
use thiserror::Error;
use tracing::{error, warn};

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<LinkError> for AppError {
    fn from(error: LinkError) -> Self {
        match error {
            LinkError::NotFound(_) => AppError::NotFound("short link not found".to_string()),
            LinkError::InvalidUrl(message) | LinkError::InvalidShortCode(message) => {
                AppError::BadRequest(message)
            }
            LinkError::Encoding(_) | LinkError::Store(_) => AppError::Internal(error.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(message) => {
                warn!(status = 400, %message, "rejected request");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::Internal(message) => {
                error!(%message, "request failed");
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                let reason = status.canonical_reason().unwrap_or("Internal Server Error");
                (status, reason.to_string())
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
