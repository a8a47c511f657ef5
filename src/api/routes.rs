//! API route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Link management routes.
///
/// # Endpoints
///
/// - `GET    /links`         - List all links, newest first
/// - `POST   /links`         - Create a link (generated or custom code)
/// - `DELETE /links?code=X`  - Delete a link
/// - `GET    /links/{code}`  - Single link with click statistics
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/links",
            get(list_links_handler)
                .post(create_link_handler)
                .delete(delete_link_handler),
        )
        .route("/links/{code}", get(get_link_handler))
}
