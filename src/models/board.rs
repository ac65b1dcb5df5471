//! Board identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Stock code identifying a discussion board (e.g. `005930`).
///
/// Used verbatim as the upstream query parameter and as the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(String);

impl BoardId {
    /// Create a board id from raw request input.
    ///
    /// Surrounding whitespace is dropped; a blank code is rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let code = raw.trim();
        if code.is_empty() {
            return Err(AppError::validation("Stock code is required"));
        }
        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for BoardId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
