//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Shape check and case normalization (no store access for junk input)
/// 2. One atomic store call: increment `clicks`, stamp `last_clicked_at`,
///    fetch the target
/// 3. 307 Temporary Redirect to the target
///
/// Click stats move only on success; a missing code changes nothing.
///
/// # Errors
///
/// Returns 404 for unknown *and* malformed codes — the outside world gets
/// one answer for "there is nothing here". Store failures stay 500.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Response {
    match state.redirects.resolve_and_record(&code).await {
        Ok(link) => {
            debug!(code = %link.code, clicks = link.clicks, "redirect");
            Redirect::temporary(&link.target_url).into_response()
        }
        Err(AppError::Validation { .. } | AppError::NotFound { .. }) => {
            debug!(code = %code, "redirect miss");
            AppError::not_found("Short link not found", json!({ "code": code })).into_response()
        }
        Err(err) => err.into_response(),
    }
}
