//! Plain-text metadata extraction.

use crate::config::ExtractionConfig;
use crate::extractor::Extractor;
use crate::metadata::ExtractedMetadata;
use crate::parse::{extract_urls, normalize_line_endings};
use crate::toolkit::{
    categorize_links, count_words, extract_blockquotes, extract_summary, extract_tldr,
    reading_time, SUMMARY_MIN_LENGTH,
};

/// Extractor for plain-text documents, and the fallback for every
/// unrecognized format.
///
/// There is no side channel to mine, so everything comes from the toolkit
/// heuristics over line-ending-normalized text.
#[derive(Debug, Clone)]
pub struct TextExtractor {
    config: ExtractionConfig,
}

impl TextExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }
}

impl Extractor for TextExtractor {
    fn extract(&self, content: &str) -> ExtractedMetadata {
        let text = normalize_line_endings(content);
        let mut metadata = ExtractedMetadata::default();

        let word_count = count_words(&text);
        metadata.word_count = Some(word_count);
        metadata.reading_time = Some(reading_time(word_count, self.config.reading_speed));

        let quotes = extract_blockquotes(&text, self.config.max_quotes);
        if !quotes.is_empty() {
            metadata.quotes = Some(quotes);
        }

        let urls = extract_urls(&text);
        let links = categorize_links(
            urls.iter().map(String::as_str),
            self.config.base_url.as_deref(),
            self.config.max_links,
        );
        if !links.internal.is_empty() {
            metadata.internal_links = Some(links.internal);
        }
        if !links.external.is_empty() {
            metadata.external_links = Some(links.external);
        }

        metadata.summary = extract_summary(&text, SUMMARY_MIN_LENGTH);
        metadata.tldr = extract_tldr(&text);

        metadata
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(content: &str) -> ExtractedMetadata {
        TextExtractor::new(ExtractionConfig::default()).extract(content)
    }

    #[test]
    fn test_word_count_and_reading_time() {
        let meta = extract("just four plain words");
        assert_eq!(meta.word_count, Some(4));
        assert_eq!(meta.reading_time, Some(1));
    }

    #[test]
    fn test_reading_time_at_configured_speed() {
        // 500 words at 200 wpm round up to 3 minutes.
        let content = "word ".repeat(500);
        let config = ExtractionConfig::default().with_reading_speed(200);
        let meta = TextExtractor::new(config).extract(&content);
        assert_eq!(meta.word_count, Some(500));
        assert_eq!(meta.reading_time, Some(3));
    }

    #[test]
    fn test_crlf_content_handled() {
        let meta = extract("first line\r\n\r\n> a quote\r\nmore text");
        assert_eq!(meta.quotes.as_deref(), Some(&["a quote".to_string()][..]));
    }

    #[test]
    fn test_detected_urls_categorized() {
        let config = ExtractionConfig::default().with_base_url("https://example.com");
        let meta = TextExtractor::new(config).extract(
            "Links: https://example.com/internal and https://other.example/page here.",
        );
        assert_eq!(
            meta.internal_links.as_deref(),
            Some(&["https://example.com/internal".to_string()][..])
        );
        assert_eq!(
            meta.external_links.as_deref(),
            Some(&["https://other.example/page".to_string()][..])
        );
    }

    #[test]
    fn test_summary_from_first_meaningful_paragraph() {
        let meta = extract(
            "This first paragraph easily clears the minimum summary length threshold. It \
             continues on.\n\nSecond paragraph.",
        );
        assert_eq!(
            meta.summary.as_deref(),
            Some("This first paragraph easily clears the minimum summary length threshold.")
        );
    }

    #[test]
    fn test_empty_content() {
        let meta = extract("");
        assert_eq!(meta.word_count, Some(0));
        assert_eq!(meta.reading_time, Some(0));
        assert!(meta.summary.is_none());
        assert!(meta.tldr.is_none());
    }
}
