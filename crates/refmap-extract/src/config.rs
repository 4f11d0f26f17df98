//! Extraction configuration.
//!
//! [`ExtractionConfig`] tunes the heuristics shared by all extractors:
//! reading speed, list caps, and the base URL used to classify links as
//! internal or external. A config is immutable once handed to an extractor;
//! the same instance can serve any number of concurrent extractions.

use serde::{Deserialize, Serialize};

/// Default reading speed in words per minute.
pub const DEFAULT_READING_SPEED: u32 = 225;
/// Default cap on extracted tags.
pub const DEFAULT_MAX_TAGS: usize = 35;
/// Default cap on extracted quotes.
pub const DEFAULT_MAX_QUOTES: usize = 10;
/// Default cap on each of the internal/external link lists.
pub const DEFAULT_MAX_LINKS: usize = 10;

/// Configuration for metadata extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractionConfig {
    /// Words per minute for reading time calculation.
    pub reading_speed: u32,
    /// Maximum number of tags to keep.
    pub max_tags: usize,
    /// Maximum number of quotes to extract.
    pub max_quotes: usize,
    /// Maximum number of links to keep per category.
    pub max_links: usize,
    /// Base URL prefix that marks a link as internal.
    ///
    /// When absent, every absolute link is classified as external.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            reading_speed: DEFAULT_READING_SPEED,
            max_tags: DEFAULT_MAX_TAGS,
            max_quotes: DEFAULT_MAX_QUOTES,
            max_links: DEFAULT_MAX_LINKS,
            base_url: None,
        }
    }
}

impl ExtractionConfig {
    /// Set the base URL used for internal/external link classification.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the reading speed in words per minute.
    pub fn with_reading_speed(mut self, wpm: u32) -> Self {
        self.reading_speed = wpm;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractionConfig::default();
        assert_eq!(config.reading_speed, 225);
        assert_eq!(config.max_tags, 35);
        assert_eq!(config.max_quotes, 10);
        assert_eq!(config.max_links, 10);
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_builders() {
        let config = ExtractionConfig::default()
            .with_base_url("https://example.com")
            .with_reading_speed(200);
        assert_eq!(config.base_url.as_deref(), Some("https://example.com"));
        assert_eq!(config.reading_speed, 200);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ExtractionConfig =
            serde_json::from_str(r#"{"readingSpeed": 180, "baseUrl": "https://b.example"}"#)
                .unwrap();
        assert_eq!(config.reading_speed, 180);
        assert_eq!(config.max_tags, DEFAULT_MAX_TAGS);
        assert_eq!(config.base_url.as_deref(), Some("https://b.example"));
    }
}
