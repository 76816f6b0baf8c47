//! HTTP surface for the shortlink service.
//!
//! Routes:
//! - `POST /api/shorten` creates (or reuses) a short link
//! - `GET /api/info?shortlink=<code>` returns the stored detail record
//! - `GET /{code}` redirects to the original URL
//! - `GET /health` liveness probe

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
