//! HTML metadata extraction.

use crate::config::ExtractionConfig;
use crate::extractor::Extractor;
use crate::metadata::ExtractedMetadata;
use crate::parse::parse_html;
use crate::toolkit::{
    categorize_links, count_words, extract_summary, extract_tldr, reading_time,
    SUMMARY_MIN_LENGTH,
};

/// Extractor for HTML documents.
///
/// Meta tags are the primary metadata source, with Open Graph and Twitter
/// Card tags as fallbacks in that order. The DOM's visible text feeds the
/// heuristic fields.
#[derive(Debug, Clone)]
pub struct HtmlExtractor {
    config: ExtractionConfig,
}

impl HtmlExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }
}

impl Extractor for HtmlExtractor {
    fn extract(&self, content: &str) -> ExtractedMetadata {
        let parsed = parse_html(content);
        let mut metadata = ExtractedMetadata::default();

        let meta = &parsed.meta;
        metadata.author = meta.author.clone();
        // Precedence: description, then og:description, then
        // twitter:description.
        metadata.summary = meta
            .description
            .clone()
            .or_else(|| meta.og_description.clone())
            .or_else(|| meta.twitter_description.clone());
        metadata.tags = meta.keywords.as_ref().map(|keywords| {
            keywords
                .iter()
                .take(self.config.max_tags)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        });
        // og:image wins over twitter:image; <img> elements are the last
        // resort.
        metadata.featured_images = meta
            .og_image
            .clone()
            .or_else(|| meta.twitter_image.clone())
            .map(|image| vec![image])
            .or_else(|| {
                let urls: Vec<String> = parsed
                    .images
                    .iter()
                    .filter(|img| {
                        img.url.starts_with("http://") || img.url.starts_with("https://")
                    })
                    .map(|img| img.url.clone())
                    .collect();
                (!urls.is_empty()).then_some(urls)
            });

        let word_count = count_words(&parsed.text);
        metadata.word_count = Some(word_count);
        metadata.reading_time = Some(reading_time(word_count, self.config.reading_speed));

        let links = categorize_links(
            parsed.links.iter().map(|link| link.url.as_str()),
            self.config.base_url.as_deref(),
            self.config.max_links,
        );
        if !links.internal.is_empty() {
            metadata.internal_links = Some(links.internal);
        }
        if !links.external.is_empty() {
            metadata.external_links = Some(links.external);
        }

        let quotes: Vec<String> = parsed
            .blockquotes
            .into_iter()
            .take(self.config.max_quotes)
            .collect();
        if !quotes.is_empty() {
            metadata.quotes = Some(quotes);
        }

        if metadata.summary.is_none() {
            metadata.summary = extract_summary(&parsed.text, SUMMARY_MIN_LENGTH);
        }
        metadata.tldr = extract_tldr(&parsed.text);

        metadata
    }
}

// ============================================================================
// Tests
// ============================================================================
