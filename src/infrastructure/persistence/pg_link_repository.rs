//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_code;

#[derive(sqlx::FromRow)]
struct LinkRow {
    code: String,
    target_url: String,
    clicks: i64,
    last_clicked_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(
            row.code,
            row.target_url,
            row.clicks,
            row.last_clicked_at,
            row.created_at,
        )
    }
}

/// PostgreSQL repository for link storage and click accounting.
///
/// The `links_pkey` unique constraint arbitrates racing inserts, and the
/// click counter is bumped with a single `UPDATE ... RETURNING` so counter
/// and timestamp can never be observed apart. Every operation is bounded by
/// the configured store timeout; elapsing maps to `Unavailable` with no
/// partial mutation.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
    op_timeout: Duration,
}

impl PgLinkRepository {
    /// Creates a new repository over a connection pool with a per-operation
    /// time bound.
    pub fn new(pool: Arc<PgPool>, op_timeout: Duration) -> Self {
        Self { pool, op_timeout }
    }

    /// Runs a store operation under the configured time bound.
    async fn bounded<T, F>(&self, fut: F) -> Result<T, sqlx::Error>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(sqlx::Error::PoolTimedOut),
        }
    }

    fn timed_out(&self) -> AppError {
        AppError::unavailable(
            "Store operation timed out",
            json!({ "timeout_ms": self.op_timeout.as_millis() as u64 }),
        )
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let query = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (code, target_url)
            VALUES ($1, $2)
            RETURNING code, target_url, clicks, last_clicked_at, created_at
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.target_url)
        .fetch_one(self.pool.as_ref());

        match tokio::time::timeout(self.op_timeout, query).await {
            Ok(Ok(row)) => Ok(row.into()),
            Ok(Err(e)) if is_unique_violation_on_code(&e) => Err(AppError::conflict(
                "Short code already exists",
                json!({ "code": new_link.code }),
            )),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(self.timed_out()),
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let query = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT code, target_url, clicks, last_clicked_at, created_at
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref());

        match self.bounded(query).await {
            Ok(row) => Ok(row.map(Link::from)),
            Err(sqlx::Error::PoolTimedOut) => Err(self.timed_out()),
            Err(e) => Err(e.into()),
        }
    }

    async fn record_click(&self, code: &str) -> Result<Option<Link>, AppError> {
        let query = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET clicks = clicks + 1, last_clicked_at = now()
            WHERE code = $1
            RETURNING code, target_url, clicks, last_clicked_at, created_at
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref());

        match self.bounded(query).await {
            Ok(row) => Ok(row.map(Link::from)),
            Err(sqlx::Error::PoolTimedOut) => Err(self.timed_out()),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError> {
        let query = sqlx::query("DELETE FROM links WHERE code = $1")
            .bind(code)
            .execute(self.pool.as_ref());

        match self.bounded(query).await {
            Ok(result) => Ok(result.rows_affected() > 0),
            Err(sqlx::Error::PoolTimedOut) => Err(self.timed_out()),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        let query = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT code, target_url, clicks, last_clicked_at, created_at
            FROM links
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool.as_ref());

        match self.bounded(query).await {
            Ok(rows) => Ok(rows.into_iter().map(Link::from).collect()),
            Err(sqlx::Error::PoolTimedOut) => Err(self.timed_out()),
            Err(e) => Err(e.into()),
        }
    }
}
