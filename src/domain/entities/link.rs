//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A short link with its click statistics.
///
/// `code` and `target_url` are immutable once created; only the click
/// counter and `last_clicked_at` change afterwards, and always together.
#[derive(Debug, Clone)]
pub struct Link {
    pub code: String,
    pub target_url: String,
    pub clicks: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        code: String,
        target_url: String,
        clicks: i64,
        last_clicked_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            code,
            target_url,
            clicks,
            last_clicked_at,
            created_at,
        }
    }

    /// Returns true if the link has been resolved at least once.
    pub fn has_been_clicked(&self) -> bool {
        self.clicks > 0
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub target_url: String,
}
