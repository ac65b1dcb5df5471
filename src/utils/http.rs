// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use url::Url;

use crate::error::Result;
use crate::models::{BoardId, PortalConfig};

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &PortalConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Human-facing board link for a stock code.
pub fn board_url(config: &PortalConfig, board_id: &BoardId) -> Result<Url> {
    let mut url = Url::parse(&config.base_url)?.join(&config.board_path)?;
    url.query_pairs_mut().append_pair("code", board_id.as_str());
    Ok(url)
}

/// URL of one listing page of a board.
pub fn page_url(config: &PortalConfig, board_id: &BoardId, page: u32) -> Result<Url> {
    let mut url = board_url(config, board_id)?;
    url.query_pairs_mut().append_pair("page", &page.to_string());
    Ok(url)
}
