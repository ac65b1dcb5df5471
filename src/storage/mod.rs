//! Storage abstractions for digest caching.
//!
//! A cache entry holds the digest of one board together with the time it
//! was fetched. Freshness is judged when reading; stale entries are only
//! replaced by the next write, never swept.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{BoardId, Digest};

// Re-export for convenience
pub use memory::MemoryCache;

/// A digest stored for one board.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub board_id: BoardId,
    pub data: Digest,
    pub fetched_at: DateTime<Utc>,
}

/// Trait for digest cache backends.
#[async_trait]
pub trait DigestCache: Send + Sync {
    /// Return the digest for `board_id` if it was stored less than the
    /// cache lifetime before `now`.
    async fn get(&self, board_id: &BoardId, now: DateTime<Utc>) -> Option<Digest>;

    /// Store (or replace) the digest for `board_id`, stamped with `now`.
    async fn put(&self, board_id: &BoardId, data: Digest, now: DateTime<Utc>);
}
