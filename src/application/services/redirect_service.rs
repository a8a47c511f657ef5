//! Redirect resolution and click accounting — the hot path.

use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::normalize_lookup_code;
use serde_json::json;

/// Resolves inbound codes to their targets, counting the click as it goes.
///
/// Stateless; all correctness under concurrent redirects comes from the
/// store's atomic increment, so any number of instances may serve traffic
/// against the same store.
pub struct RedirectService {
    repository: Arc<dyn LinkRepository>,
}

impl RedirectService {
    pub fn new(repository: Arc<dyn LinkRepository>) -> Self {
        Self { repository }
    }

    /// Resolves a code and records the click in one store round-trip.
    ///
    /// The cheap shape check runs first, so malformed codes never reach the
    /// store. On success the returned record already reflects this click —
    /// counter and timestamp were advanced together.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] (`invalid_code`) — code shorter than 3 chars
    /// - [`AppError::NotFound`] — no link with that code
    pub async fn resolve_and_record(&self, code: &str) -> Result<Link, AppError> {
        let code = normalize_lookup_code(code)?;

        self.repository
            .record_click(&code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }
}
