//! Discussion board post.

use serde::{Deserialize, Serialize};

/// A post scraped from a board listing page.
///
/// Counts are kept both as displayed on the site and as parsed integers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Absolute URL of the post detail page
    pub link: String,

    /// Post date in the site's own format
    pub date: String,

    /// View count as displayed (e.g. `1,234`)
    pub views: String,

    /// Like count as displayed
    pub likes: String,

    /// Parsed view count
    pub views_int: u64,

    /// Parsed like count
    pub likes_int: u64,
}

impl Post {
    /// Engagement score: views plus weighted likes.
    pub fn score(&self, like_weight: u64) -> u64 {
        self.views_int
            .saturating_add(self.likes_int.saturating_mul(like_weight))
    }
}
