// src/error.rs

//! Unified error handling for the digest service.

use std::fmt;

use thiserror::Error;

/// Result type alias for digest operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be built
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A single board page could not be retrieved
    #[error("Fetch error for {board_id} page {page}: {message}")]
    Fetch {
        board_id: String,
        page: u32,
        message: String,
    },

    /// The page window could not be assembled
    #[error("Upstream error for {board_id} (page {page}): {message}")]
    Upstream {
        board_id: String,
        page: u32,
        message: String,
    },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a fetch error for one board page.
    pub fn fetch(board_id: impl Into<String>, page: u32, message: impl fmt::Display) -> Self {
        Self::Fetch {
            board_id: board_id.into(),
            page,
            message: message.to_string(),
        }
    }

    /// Promote a page-level failure into an upstream failure for the whole digest.
    pub fn upstream(board_id: impl Into<String>, page: u32, cause: &AppError) -> Self {
        let message = match cause {
            Self::Fetch { message, .. } => message.clone(),
            other => other.to_string(),
        };
        Self::Upstream {
            board_id: board_id.into(),
            page,
            message,
        }
    }

    /// Whether this error aborted a digest run.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}
