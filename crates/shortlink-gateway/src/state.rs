use std::sync::Arc;

use shortlink_core::{LinkStore, ShortCode};

#[derive(Clone)]
pub struct AppState {
    links: Arc<dyn LinkStore>,
    base_url: String,
}

impl AppState {
    pub fn new(links: Arc<dyn LinkStore>, public_base_url: impl Into<String>) -> Self {
        Self {
            links,
            base_url: public_base_url.into(),
        }
    }

    pub fn links(&self) -> &dyn LinkStore {
        self.links.as_ref()
    }

    /// Full public URL of a short code.
    pub fn short_url(&self, code: &ShortCode) -> String {
        code.to_url(&self.base_url)
    }
}
