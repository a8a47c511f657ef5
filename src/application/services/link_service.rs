//! Link creation, lookup, listing, and deletion.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{
    generate_code, normalize_custom_code, normalize_lookup_code, validate_custom_code,
};
use crate::utils::target_url::validate_target_url;
use serde_json::json;
use tracing::debug;

/// Attempts before giving up on finding a non-colliding generated code.
const MAX_GENERATION_ATTEMPTS: usize = 50;

/// The single authority for turning a creation request into a persisted,
/// uniquely-coded record, and for validating externally supplied codes.
///
/// Holds no state of its own beyond the injected store handle; any number of
/// instances may run concurrently, in this process or another.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service over a store handle.
    ///
    /// `base_url` is only used to compose short URLs in responses.
    pub fn new(repository: Arc<dyn LinkRepository>, base_url: String) -> Self {
        Self {
            repository,
            base_url,
        }
    }

    /// Creates a short link, with a generated code or a caller-supplied one.
    ///
    /// Validation happens before any store access. For custom codes the
    /// store's uniqueness constraint is the final arbiter: of two racing
    /// creators asking for the same code, exactly one wins and the other
    /// gets [`AppError::Conflict`].
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] — invalid target URL or custom-code format
    /// - [`AppError::Conflict`] — custom code already taken
    /// - [`AppError::ExhaustedAttempts`] — generated codes kept colliding
    pub async fn create_link(
        &self,
        target_url: &str,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        let target_url = validate_target_url(target_url).map_err(|e| {
            AppError::bad_request(
                "invalid_url",
                "Invalid URL format",
                json!({ "reason": e.to_string() }),
            )
        })?;

        if let Some(custom) = custom_code {
            let code = normalize_custom_code(&custom);
            validate_custom_code(&code)?;

            if self.repository.find_by_code(&code).await?.is_some() {
                return Err(AppError::conflict(
                    "This code is already taken",
                    json!({ "code": code }),
                ));
            }

            // A creator racing us past the existence check loses at the
            // store's unique constraint and surfaces as the same conflict.
            self.repository.insert(NewLink { code, target_url }).await
        } else {
            self.create_with_generated_code(target_url).await
        }
    }

    /// Retrieves a link by its code, case-insensitively.
    ///
    /// Codes shorter than the minimal shape are rejected without querying
    /// the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] (`invalid_code`) or
    /// [`AppError::NotFound`].
    pub async fn lookup(&self, code: &str) -> Result<Link, AppError> {
        let code = normalize_lookup_code(code)?;

        self.repository
            .find_by_code(&code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Lists all links, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.repository.list_all().await
    }

    /// Deletes a link permanently.
    ///
    /// Deleting a nonexistent code reports [`AppError::NotFound`]; repeating
    /// the call is safe.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        let code = normalize_lookup_code(code)?;

        if self.repository.delete_by_code(&code).await? {
            Ok(())
        } else {
            Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ))
        }
    }

    /// Composes the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    /// Generates a code, persisting the first one that does not collide.
    ///
    /// An insert that loses a race to a concurrent creator counts as a
    /// collision and retries with a fresh code.
    async fn create_with_generated_code(&self, target_url: String) -> Result<Link, AppError> {
        for attempt in 0..MAX_GENERATION_ATTEMPTS {
            let code = generate_code();

            if self.repository.find_by_code(&code).await?.is_some() {
                debug!(attempt, code = %code, "generated code collided, retrying");
                continue;
            }

            match self
                .repository
                .insert(NewLink {
                    code,
                    target_url: target_url.clone(),
                })
                .await
            {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict { .. }) => {
                    debug!(attempt, "generated code lost insert race, retrying");
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::exhausted_attempts(
            "Failed to generate a unique code",
            json!({ "attempts": MAX_GENERATION_ATTEMPTS }),
        ))
    }
}
