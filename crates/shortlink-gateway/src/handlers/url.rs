use crate::error::{AppError, Result};
use crate::model::{InfoQuery, InfoResponse, ShortenRequest, ShortenResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::Json;
use shortlink_core::ShortCode;
use tracing::debug;

/// `POST /api/shorten`
///
/// Returns `201 Created` with the code, which is the same code as before if
/// the URL already has a live mapping.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>)> {
    let Json(request) = payload
        .map_err(|e| AppError::BadRequest(format!("parse parameters failed: {}", e.body_text())))?;
    let expiration_in_minutes = request.validate()?;

    let code = state
        .links()
        .shorten(&request.url, expiration_in_minutes)
        .await?;
    debug!(code = %code, url = %request.url, "shortened url");

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_url: state.short_url(&code),
            short_link: code.to_string(),
        }),
    ))
}

/// `GET /api/info?shortlink=<code>`
pub async fn info_handler(
    State(state): State<AppState>,
    Query(query): Query<InfoQuery>,
) -> Result<Json<InfoResponse>> {
    let raw = query
        .shortlink
        .ok_or_else(|| AppError::BadRequest("shortlink is required".to_string()))?;
    let code = ShortCode::new(&raw).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let detail = state.links().info(&code).await?;
    Ok(Json(InfoResponse::from(detail)))
}

/// `GET /{code}`
///
/// Anything that is not a well-formed code is answered with 404, the same
/// as an unknown or expired code.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<(StatusCode, [(header::HeaderName, HeaderValue); 1])> {
    let code = ShortCode::new(&raw)
        .map_err(|_| AppError::NotFound("short link not found".to_string()))?;

    let url = state.links().unshorten(&code).await?;
    let location = HeaderValue::try_from(url.as_str()).map_err(|e| {
        AppError::Internal(format!("stored url for {code} is not a valid location: {e}"))
    })?;
    debug!(code = %code, url = %url, "redirecting");
    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]))
}
