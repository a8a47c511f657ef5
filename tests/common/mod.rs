#![allow(dead_code)]

use axum::Router;
use shortlink::domain::entities::NewLink;
use shortlink::domain::repositories::LinkRepository;
use shortlink::infrastructure::persistence::MemoryLinkRepository;
use shortlink::routes::router;
use shortlink::state::AppState;
use std::sync::Arc;

pub const BASE_URL: &str = "https://sho.rt";

/// Builds application state over a fresh in-memory store, returning the
/// store handle so tests can seed and inspect records directly.
pub fn create_test_state() -> (AppState, Arc<MemoryLinkRepository>) {
    let store = Arc::new(MemoryLinkRepository::new());
    let state = AppState::new(store.clone(), BASE_URL.to_string());

    (state, store)
}

pub fn app(state: AppState) -> Router {
    router(state)
}

pub async fn create_test_link(store: &MemoryLinkRepository, code: &str, url: &str) {
    store
        .insert(NewLink {
            code: code.to_string(),
            target_url: url.to_string(),
        })
        .await
        .unwrap();
}
