//! In-process implementation of the link store.
//!
//! Used when no database is configured, and as the store behind the
//! integration tests. A single lock serializes mutations, giving the same
//! conflict and atomic-increment guarantees the PostgreSQL backend gets
//! from its unique index and `UPDATE ... RETURNING`.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

struct StoredLink {
    /// Monotonic insertion sequence; breaks `created_at` ties so listing
    /// order is stable for records created in the same instant.
    seq: u64,
    link: Link,
}

#[derive(Default)]
struct Inner {
    next_seq: u64,
    links: HashMap<String, StoredLink>,
}

/// In-memory link store. Contents do not survive a restart.
#[derive(Default)]
pub struct MemoryLinkRepository {
    inner: Mutex<Inner>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut inner = self.inner.lock().expect("link store lock poisoned");

        if inner.links.contains_key(&new_link.code) {
            return Err(AppError::conflict(
                "Short code already exists",
                json!({ "code": new_link.code }),
            ));
        }

        let link = Link::new(new_link.code.clone(), new_link.target_url, 0, None, Utc::now());

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.links.insert(
            new_link.code,
            StoredLink {
                seq,
                link: link.clone(),
            },
        );

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let inner = self.inner.lock().expect("link store lock poisoned");

        Ok(inner.links.get(code).map(|stored| stored.link.clone()))
    }

    async fn record_click(&self, code: &str) -> Result<Option<Link>, AppError> {
        let mut inner = self.inner.lock().expect("link store lock poisoned");

        Ok(inner.links.get_mut(code).map(|stored| {
            stored.link.clicks += 1;
            stored.link.last_clicked_at = Some(Utc::now());
            stored.link.clone()
        }))
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().expect("link store lock poisoned");

        Ok(inner.links.remove(code).is_some())
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        let inner = self.inner.lock().expect("link store lock poisoned");

        let mut stored: Vec<_> = inner
            .links
            .values()
            .map(|s| (s.link.created_at, s.seq, s.link.clone()))
            .collect();
        stored.sort_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));

        Ok(stored.into_iter().map(|(_, _, link)| link).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_link(code: &str, url: &str) -> NewLink {
        NewLink {
            code: code.to_string(),
            target_url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = MemoryLinkRepository::new();

        let link = repo
            .insert(new_link("ABCDEFG", "https://example.com"))
            .await
            .unwrap();
        assert_eq!(link.clicks, 0);
        assert!(link.last_clicked_at.is_none());

        let found = repo.find_by_code("ABCDEFG").await.unwrap().unwrap();
        assert_eq!(found.target_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_insert_duplicate_code_conflicts() {
        let repo = MemoryLinkRepository::new();

        repo.insert(new_link("PROMO1", "https://example.com"))
            .await
            .unwrap();

        let result = repo.insert(new_link("PROMO1", "https://other.com")).await;
        assert!(matches!(result, Err(AppError::Conflict { .. })));

        // The original record is untouched.
        let found = repo.find_by_code("PROMO1").await.unwrap().unwrap();
        assert_eq!(found.target_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_record_click_updates_count_and_timestamp_together() {
        let repo = MemoryLinkRepository::new();
        repo.insert(new_link("ABCDEFG", "https://example.com"))
            .await
            .unwrap();

        let first = repo.record_click("ABCDEFG").await.unwrap().unwrap();
        assert_eq!(first.clicks, 1);
        assert!(first.last_clicked_at.is_some());

        let second = repo.record_click("ABCDEFG").await.unwrap().unwrap();
        assert_eq!(second.clicks, 2);
        assert!(second.last_clicked_at.unwrap() >= first.last_clicked_at.unwrap());
    }

    #[tokio::test]
    async fn test_record_click_unknown_code_returns_none() {
        let repo = MemoryLinkRepository::new();

        assert!(repo.record_click("MISSING").await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_clicks_are_not_lost() {
        let repo = Arc::new(MemoryLinkRepository::new());
        repo.insert(new_link("ABCDEFG", "https://example.com"))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for _ in 0..50 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.record_click("ABCDEFG").await.unwrap()
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_some());
        }

        let link = repo.find_by_code("ABCDEFG").await.unwrap().unwrap();
        assert_eq!(link.clicks, 50);
        assert!(link.last_clicked_at.is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_one_winner() {
        let repo = Arc::new(MemoryLinkRepository::new());

        let mut handles = Vec::new();
        for i in 0..8 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.insert(new_link("PROMO1", &format!("https://example.com/{i}")))
                    .await
            }));
        }

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(AppError::Conflict { .. }) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 7);
    }

    #[tokio::test]
    async fn test_delete_is_permanent_and_reports_not_found() {
        let repo = MemoryLinkRepository::new();
        repo.insert(new_link("ABCDEFG", "https://example.com"))
            .await
            .unwrap();

        assert!(repo.delete_by_code("ABCDEFG").await.unwrap());
        assert!(repo.find_by_code("ABCDEFG").await.unwrap().is_none());
        assert!(!repo.delete_by_code("ABCDEFG").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let repo = MemoryLinkRepository::new();
        repo.insert(new_link("FIRST1", "https://example.com/1"))
            .await
            .unwrap();
        repo.insert(new_link("SECOND2", "https://example.com/2"))
            .await
            .unwrap();
        repo.insert(new_link("THIRD3", "https://example.com/3"))
            .await
            .unwrap();

        let codes: Vec<_> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.code)
            .collect();

        assert_eq!(codes, vec!["THIRD3", "SECOND2", "FIRST1"]);
    }
}
