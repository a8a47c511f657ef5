//! Repository trait for short link storage.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Store contract for short links.
///
/// Code uniqueness and click-count atomicity are enforced here, never by
/// in-process coordination — multiple service instances may run against the
/// same store concurrently.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-process fallback
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link if its code is not already taken.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a link with the same code exists —
    /// the unique constraint is the final arbiter for racing creators.
    ///
    /// Returns [`AppError::Unavailable`] on store timeout and
    /// [`AppError::Internal`] on other store errors.
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its (already normalized) code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Atomically increments the click counter and stamps `last_clicked_at`.
    ///
    /// Counter and timestamp move as one unit; concurrent calls for the same
    /// code serialize at the store, so no increment is ever lost.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` with the post-increment record
    /// - `Ok(None)` if no link has that code
    async fn record_click(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Removes a link permanently.
    ///
    /// Returns `Ok(true)` if a record was deleted, `Ok(false)` if the code
    /// was unknown.
    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError>;

    /// Lists all links, newest first.
    async fn list_all(&self) -> Result<Vec<Link>, AppError>;
}
