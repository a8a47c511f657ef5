//! Shared application state.

use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService};
use crate::domain::repositories::LinkRepository;

/// State injected into all handlers.
///
/// The store handle is constructed once at startup and passed in explicitly;
/// there is no module-level connection singleton. Cloning is cheap (Arcs).
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LinkRepository>,
    pub registry: Arc<LinkService>,
    pub redirects: Arc<RedirectService>,
}

impl AppState {
    /// Wires services over a store handle.
    pub fn new(store: Arc<dyn LinkRepository>, base_url: String) -> Self {
        let registry = Arc::new(LinkService::new(store.clone(), base_url));
        let redirects = Arc::new(RedirectService::new(store.clone()));

        Self {
            store,
            registry,
            redirects,
        }
    }
}
