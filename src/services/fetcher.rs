// src/services/fetcher.rs

//! Board page fetcher.
//!
//! Retrieves raw listing pages from the finance portal. Pages are served in
//! a legacy Korean encoding and decoded permissively.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::{BoardId, PortalConfig};
use crate::utils::http::{create_async_client, page_url};

/// Source of raw board listing documents.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch one listing page (1-based) of a board as decoded text.
    async fn fetch_page(&self, board_id: &BoardId, page: u32) -> Result<String>;
}

/// HTTP page source for the finance portal.
pub struct BoardFetcher {
    config: PortalConfig,
    client: Client,
}

impl BoardFetcher {
    /// Create a fetcher with its own HTTP client.
    pub fn new(config: PortalConfig) -> Result<Self> {
        let client = create_async_client(&config)?;
        Ok(Self { config, client })
    }

    /// Create a fetcher sharing an existing client.
    pub fn with_client(config: PortalConfig, client: Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl PageSource for BoardFetcher {
    async fn fetch_page(&self, board_id: &BoardId, page: u32) -> Result<String> {
        let url = page_url(&self.config, board_id, page)?;
        log::debug!("Fetching {}", url);

        let fail = |e: reqwest::Error| AppError::fetch(board_id.as_str(), page, e);

        let response = self.client.get(url).send().await.map_err(fail)?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(
                board_id.as_str(),
                page,
                format!("HTTP status {status}"),
            ));
        }

        // Malformed byte sequences decode to U+FFFD instead of failing.
        response
            .text_with_charset(&self.config.encoding)
            .await
            .map_err(fail)
    }
}
