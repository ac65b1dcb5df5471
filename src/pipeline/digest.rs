// src/pipeline/digest.rs

//! Board digest pipeline.
//!
//! Cache lookup, sequential page fetch, extraction, ranking and cache
//! write for one board.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::models::{BoardId, Config, Digest, DigestResponse};
use crate::services::{BoardExtractor, BoardFetcher, PageSource, PostExtractor, Ranker};
use crate::storage::{DigestCache, MemoryCache};

/// Produces ranked digests for boards, backed by a shared cache.
pub struct DigestPipeline {
    source: Arc<dyn PageSource>,
    extractor: Arc<dyn PostExtractor>,
    cache: Arc<dyn DigestCache>,
    ranker: Ranker,
    page_count: u32,
    page_delay: Duration,
}

impl DigestPipeline {
    /// Assemble a pipeline from its parts.
    pub fn new(
        source: Arc<dyn PageSource>,
        extractor: Arc<dyn PostExtractor>,
        cache: Arc<dyn DigestCache>,
        config: &Config,
    ) -> Self {
        Self {
            source,
            extractor,
            cache,
            ranker: Ranker::from(&config.digest),
            page_count: config.digest.page_count,
            page_delay: Duration::from_millis(config.portal.request_delay_ms),
        }
    }

    /// Build the production pipeline: HTTP fetcher, board extractor and a
    /// fresh in-memory cache.
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = BoardFetcher::new(config.portal.clone())?;
        let extractor = BoardExtractor::new(
            config.board.clone(),
            config.cleaning.clone(),
            &config.portal.base_url,
        )?;
        let cache = MemoryCache::new(config.digest.cache_ttl_secs);
        Ok(Self::new(
            Arc::new(source),
            Arc::new(extractor),
            Arc::new(cache),
            config,
        ))
    }

    /// Return the digest for a board, fetching it when the cache has no
    /// fresh entry.
    ///
    /// A failed page aborts the whole run; nothing is cached in that case.
    pub async fn get_board_digest(&self, board_id: &BoardId, now: DateTime<Utc>) -> Result<Digest> {
        if let Some(digest) = self.cache.get(board_id, now).await {
            log::debug!("Cache hit for {}", board_id);
            return Ok(digest);
        }

        log::info!("Fetching {} pages for board {}", self.page_count, board_id);
        let mut posts = Vec::new();
        for page in 1..=self.page_count {
            if page > 1 && !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }

            let document = self
                .source
                .fetch_page(board_id, page)
                .await
                .map_err(|e| {
                    log::warn!("Board {} page {} failed: {}", board_id, page, e);
                    AppError::upstream(board_id.as_str(), page, &e)
                })?;

            let extracted = self.extractor.extract_posts(&document);
            log::debug!("Board {} page {}: {} posts", board_id, page, extracted.len());
            posts.extend(extracted);
        }

        let digest = self.ranker.rank(posts);
        log::info!(
            "Board {}: {} posts, {} best",
            board_id,
            digest.latest.len(),
            digest.best.len()
        );

        self.cache.put(board_id, digest.clone(), now).await;
        Ok(digest)
    }

    /// Answer a client request for `code`.
    ///
    /// Never fails: problems are reported in the payload's `error` field.
    pub async fn respond(&self, code: Option<&str>, now: DateTime<Utc>) -> DigestResponse {
        let board_id = match BoardId::parse(code.unwrap_or_default()) {
            Ok(id) => id,
            Err(e) => return DigestResponse::from(&e),
        };

        match self.get_board_digest(&board_id, now).await {
            Ok(digest) => DigestResponse::from(digest),
            Err(e) => {
                log::error!("Digest for {} failed: {}", board_id, e);
                DigestResponse::from(&e)
            }
        }
    }
}
