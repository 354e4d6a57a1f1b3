use snip_core::UrlShortener;
use std::sync::Arc;

/// Shared application state: the allocation engine behind its
/// object-safe contract.
#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn UrlShortener>,
}

impl AppState {
    pub fn new(shortener: Arc<dyn UrlShortener>) -> Self {
        Self { shortener }
    }

    pub fn shortener(&self) -> &dyn UrlShortener {
        self.shortener.as_ref()
    }
}
