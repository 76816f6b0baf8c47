mod health;
mod url;

pub use health::health_handler;
pub use url::{info_handler, redirect_handler, shorten_handler};
