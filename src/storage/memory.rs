//! In-process digest cache.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::models::{BoardId, Digest};
use crate::storage::{CacheEntry, DigestCache};

/// Time-windowed digest cache keyed by board id.
///
/// Writes are last-writer-wins; entries are replaced wholesale so a reader
/// never observes a half-written digest.
pub struct MemoryCache {
    ttl: Duration,
    entries: RwLock<HashMap<BoardId, CacheEntry>>,
}

impl MemoryCache {
    /// Create an empty cache whose entries stay fresh for `ttl_secs` seconds.
    pub fn new(ttl_secs: u64) -> Self {
        let ttl = i64::try_from(ttl_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of boards with an entry, fresh or stale.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DigestCache for MemoryCache {
    async fn get(&self, board_id: &BoardId, now: DateTime<Utc>) -> Option<Digest> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(board_id)?;
        if now.signed_duration_since(entry.fetched_at) < self.ttl {
            Some(entry.data.clone())
        } else {
            log::debug!("Cache entry for {} is stale", board_id);
            None
        }
    }

    async fn put(&self, board_id: &BoardId, data: Digest, now: DateTime<Utc>) {
        let entry = CacheEntry {
            board_id: board_id.clone(),
            data,
            fetched_at: now,
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(board_id.clone(), entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Post;

    fn digest(title: &str) -> Digest {
        let post = Post {
            title: title.to_string(),
            link: "https://finance.naver.com/item/board_read.naver?nid=1".to_string(),
            date: "2024.01.15 10:00".to_string(),
            views: "1".to_string(),
            likes: "0".to_string(),
            views_int: 1,
            likes_int: 0,
        };
        Digest {
            best: vec![post.clone()],
            latest: vec![post],
        }
    }

    fn board(code: &str) -> BoardId {
        BoardId::parse(code).unwrap()
    }

    #[tokio::test]
    async fn test_hit_within_window() {
        let cache = MemoryCache::new(300);
        let t0 = Utc::now();
        cache.put(&board("005930"), digest("a"), t0).await;

        let hit = cache
            .get(&board("005930"), t0 + Duration::seconds(299))
            .await;
        assert_eq!(hit, Some(digest("a")));
    }

    #[tokio::test]
    async fn test_expired_at_window_edge() {
        let cache = MemoryCache::new(300);
        let t0 = Utc::now();
        cache.put(&board("005930"), digest("a"), t0).await;

        assert!(
            cache
                .get(&board("005930"), t0 + Duration::seconds(300))
                .await
                .is_none()
        );
        // stale entries are kept until overwritten
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_put_replaces_entry() {
        let cache = MemoryCache::new(300);
        let t0 = Utc::now();
        cache.put(&board("005930"), digest("old"), t0).await;
        let t1 = t0 + Duration::seconds(400);
        cache.put(&board("005930"), digest("new"), t1).await;

        assert_eq!(cache.get(&board("005930"), t1).await, Some(digest("new")));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_boards_are_independent() {
        let cache = MemoryCache::new(300);
        let t0 = Utc::now();
        cache.put(&board("005930"), digest("samsung"), t0).await;

        assert!(cache.get(&board("035720"), t0).await.is_none());
        assert!(!cache.is_empty());
    }
}
