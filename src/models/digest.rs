//! Digest and response payload structures.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::Post;

/// Ranked result of one pipeline run for a board.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Digest {
    /// Highest scoring posts, best first
    pub best: Vec<Post>,

    /// Every fetched post in fetch order (newest page first)
    pub latest: Vec<Post>,
}

/// Payload returned to dashboard clients.
///
/// Failures are reported in-band: `error` is set and both lists are empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DigestResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub best: Vec<Post>,

    pub latest: Vec<Post>,
}

impl DigestResponse {
    /// Build an error payload with empty lists.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl From<Digest> for DigestResponse {
    fn from(digest: Digest) -> Self {
        Self {
            error: None,
            best: digest.best,
            latest: digest.latest,
        }
    }
}

impl From<&AppError> for DigestResponse {
    fn from(error: &AppError) -> Self {
        let message = match error {
            AppError::Validation(message) => message.clone(),
            other => other.to_string(),
        };
        Self::failure(message)
    }
}
