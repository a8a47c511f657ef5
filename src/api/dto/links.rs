//! DTOs for link management endpoints.
//!
//! Wire format is camelCase, matching the dashboard consumers of this API.

use crate::domain::entities::Link;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a short link.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// The target URL to shorten. Validated again, more strictly, by the
    /// registry (http/https + host); absence is reported as `missing_url`.
    #[validate(url(message = "Invalid URL format"))]
    pub url: Option<String>,

    /// Optional custom short code (uppercased and validated by the registry).
    pub code: Option<String>,
}

/// A link as returned by list and single-link endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub code: String,
    pub target_url: String,
    pub clicks: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            code: link.code,
            target_url: link.target_url,
            clicks: link.clicks,
            last_clicked_at: link.last_clicked_at,
            created_at: link.created_at,
        }
    }
}

/// Response for a successful creation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkResponse {
    pub code: String,
    pub short_url: String,
    pub target_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

/// Query string for `DELETE /links`.
#[derive(Debug, Deserialize)]
pub struct DeleteLinkQuery {
    pub code: Option<String>,
}

/// Response for a successful deletion.
#[derive(Debug, Serialize)]
pub struct DeleteLinkResponse {
    pub success: bool,
    pub message: String,
}
