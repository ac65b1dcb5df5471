//! Application configuration structures.

use std::fs;
use std::path::Path;

use scraper::Selector;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream portal and HTTP settings
    #[serde(default)]
    pub portal: PortalConfig,

    /// Board table layout used for extraction
    #[serde(default)]
    pub board: BoardLayout,

    /// Page window, ranking and cache settings
    #[serde(default)]
    pub digest: DigestConfig,

    /// Text preprocessing settings
    #[serde(default)]
    pub cleaning: CleaningConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Unparsable numeric values are ignored with a warning.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(base_url) = lookup("PORTAL_BASE_URL") {
            self.portal.base_url = base_url;
        }
        if let Some(secs) = parse_override(&lookup, "PORTAL_TIMEOUT_SECS") {
            self.portal.timeout_secs = secs;
        }
        if let Some(ms) = parse_override(&lookup, "REQUEST_DELAY_MS") {
            self.portal.request_delay_ms = ms;
        }
        if let Some(secs) = parse_override(&lookup, "CACHE_TTL_SECS") {
            self.digest.cache_ttl_secs = secs;
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.portal.user_agent.trim().is_empty() {
            return Err(AppError::validation("portal.user_agent is empty"));
        }
        if self.portal.timeout_secs == 0 {
            return Err(AppError::validation("portal.timeout_secs must be > 0"));
        }
        Url::parse(&self.portal.base_url)
            .map_err(|e| AppError::validation(format!("portal.base_url: {e}")))?;
        if self.digest.page_count == 0 {
            return Err(AppError::validation("digest.page_count must be > 0"));
        }
        if self.digest.best_count == 0 {
            return Err(AppError::validation("digest.best_count must be > 0"));
        }
        if self.digest.cache_ttl_secs == 0 {
            return Err(AppError::validation("digest.cache_ttl_secs must be > 0"));
        }
        self.board.validate()
    }
}

fn parse_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {key}={raw:?}: not a number");
            None
        }
    }
}

/// Upstream portal and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Site origin, also the base for resolving post links
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Path of the board listing page
    #[serde(default = "defaults::board_path")]
    pub board_path: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Encoding assumed when the response does not declare a charset
    #[serde(default = "defaults::encoding")]
    pub encoding: String,

    /// Delay between page requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            board_path: defaults::board_path(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            encoding: defaults::encoding(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Selectors and column positions of the board listing table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardLayout {
    /// CSS selector matching genuine post rows
    #[serde(default = "defaults::row_selector")]
    pub row_selector: String,

    /// CSS selector for the cells of a row
    #[serde(default = "defaults::cell_selector")]
    pub cell_selector: String,

    /// CSS selector for the link inside the title cell
    #[serde(default = "defaults::link_selector")]
    pub link_selector: String,

    /// HTML attribute holding the link target
    #[serde(default = "defaults::link_attr")]
    pub link_attr: String,

    /// Rows with fewer cells are skipped
    #[serde(default = "defaults::min_columns")]
    pub min_columns: usize,

    #[serde(default = "defaults::date_column")]
    pub date_column: usize,

    #[serde(default = "defaults::title_column")]
    pub title_column: usize,

    #[serde(default = "defaults::views_column")]
    pub views_column: usize,

    #[serde(default = "defaults::likes_column")]
    pub likes_column: usize,
}

impl BoardLayout {
    fn validate(&self) -> Result<()> {
        for selector in [&self.row_selector, &self.cell_selector, &self.link_selector] {
            Selector::parse(selector).map_err(|e| AppError::selector(selector, format!("{e:?}")))?;
        }
        if self.link_attr.trim().is_empty() {
            return Err(AppError::validation("board.link_attr is empty"));
        }
        let highest = [
            self.date_column,
            self.title_column,
            self.views_column,
            self.likes_column,
        ]
        .into_iter()
        .max()
        .unwrap_or_default();
        if highest >= self.min_columns {
            return Err(AppError::validation(format!(
                "board.min_columns ({}) does not cover column {}",
                self.min_columns, highest
            )));
        }
        Ok(())
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            row_selector: defaults::row_selector(),
            cell_selector: defaults::cell_selector(),
            link_selector: defaults::link_selector(),
            link_attr: defaults::link_attr(),
            min_columns: defaults::min_columns(),
            date_column: defaults::date_column(),
            title_column: defaults::title_column(),
            views_column: defaults::views_column(),
            likes_column: defaults::likes_column(),
        }
    }
}

/// Page window, ranking weights and cache lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestConfig {
    /// Number of board pages fetched per digest
    #[serde(default = "defaults::page_count")]
    pub page_count: u32,

    /// Maximum number of posts in the `best` list
    #[serde(default = "defaults::best_count")]
    pub best_count: usize,

    /// How many views a single like is worth when scoring
    #[serde(default = "defaults::like_weight")]
    pub like_weight: u64,

    /// Seconds a digest stays fresh in the cache
    #[serde(default = "defaults::cache_ttl")]
    pub cache_ttl_secs: u64,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            page_count: defaults::page_count(),
            best_count: defaults::best_count(),
            like_weight: defaults::like_weight(),
            cache_ttl_secs: defaults::cache_ttl(),
        }
    }
}

/// Text cleaning/preprocessing settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CleaningConfig {
    /// Patterns to remove from titles
    #[serde(default)]
    pub title_remove_patterns: Vec<String>,

    /// Patterns to remove from dates
    #[serde(default)]
    pub date_remove_patterns: Vec<String>,

    /// Text replacements to apply to dates
    #[serde(default)]
    pub date_replacements: Vec<Replacement>,
}

impl CleaningConfig {
    fn clean(&self, text: &str, patterns: &[String], replacements: &[Replacement]) -> String {
        let mut result = Self::normalize_whitespace(text);

        for pattern in patterns {
            result = result.replace(pattern, "");
        }

        for r in replacements {
            result = result.replace(&r.from, &r.to);
        }

        result.trim().to_string()
    }

    /// Clean a post title.
    pub fn clean_title(&self, text: &str) -> String {
        self.clean(text, &self.title_remove_patterns, &[])
    }

    /// Clean a post date. The site format itself is kept.
    pub fn clean_date(&self, text: &str) -> String {
        self.clean(text, &self.date_remove_patterns, &self.date_replacements)
    }

    fn normalize_whitespace(s: &str) -> String {
        s.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// A text replacement rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

mod defaults {
    // Portal defaults
    pub fn base_url() -> String {
        "https://finance.naver.com".into()
    }
    pub fn board_path() -> String {
        "/item/board.naver".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
            .into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn encoding() -> String {
        "euc-kr".into()
    }
    pub fn request_delay() -> u64 {
        100
    }

    // Board layout defaults
    pub fn row_selector() -> String {
        "tr[onmouseover]".into()
    }
    pub fn cell_selector() -> String {
        "td".into()
    }
    pub fn link_selector() -> String {
        "a".into()
    }
    pub fn link_attr() -> String {
        "href".into()
    }
    pub fn min_columns() -> usize {
        6
    }
    pub fn date_column() -> usize {
        0
    }
    pub fn title_column() -> usize {
        1
    }
    pub fn views_column() -> usize {
        3
    }
    pub fn likes_column() -> usize {
        4
    }

    // Digest defaults
    pub fn page_count() -> u32 {
        5
    }
    pub fn best_count() -> usize {
        5
    }
    pub fn like_weight() -> u64 {
        10
    }
    pub fn cache_ttl() -> u64 {
        300
    }
}
