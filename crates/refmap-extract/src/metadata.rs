//! The extraction output record.
//!
//! [`ExtractedMetadata`] is the flat record every extractor produces. All
//! fields are optional: a field is absent (not null, not empty) whenever the
//! source document gave no qualifying signal for it. Sequence fields are only
//! ever present when non-empty.
//!
//! Serialized field names are camelCase to match the persisted mapping
//! format (`wordCount`, `featuredImages`, ...).

use serde::{Deserialize, Serialize};

/// Metadata extracted from a single document.
///
/// A record is created fresh on every extraction and never mutated by the
/// extractor afterwards. Consumers merge it into their own records with
/// [`ExtractedMetadata::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractedMetadata {
    /// Number of whitespace-separated words in the document body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<u32>,
    /// Reading time in minutes, ceiling-rounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,
    /// Comma-joined tags, capped at the configured maximum count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// One-sentence summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Auto-generated 200-900 character summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tldr: Option<String>,
    /// Comma-joined categories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    /// Document author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Author avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_image: Option<String>,
    /// Author profile URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    /// Absolute image URLs found in the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_images: Option<Vec<String>>,
    /// Blockquote texts, capped at the configured maximum count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quotes: Option<Vec<String>>,
    /// Links matching the configured base URL prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_links: Option<Vec<String>>,
    /// Links outside the configured base URL prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_links: Option<Vec<String>>,
    /// Reserved for related-content suggestions; never populated by
    /// extraction itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_posts: Option<Vec<String>>,
}

impl ExtractedMetadata {
    /// Check whether no field is set at all.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge another record into this one, field by field.
    ///
    /// Fields present in `update` overwrite the corresponding fields here;
    /// absent fields leave the existing values untouched. This is the
    /// consumer-side partial-update merge the mapping store applies when
    /// refreshing a mapping's metadata.
    pub fn merge(&mut self, update: ExtractedMetadata) {
        macro_rules! take_if_some {
            ($($field:ident),+ $(,)?) => {
                $(if update.$field.is_some() {
                    self.$field = update.$field;
                })+
            };
        }
        take_if_some!(
            word_count,
            reading_time,
            tags,
            summary,
            tldr,
            categories,
            author,
            author_image,
            author_url,
            featured_images,
            quotes,
            internal_links,
            external_links,
            related_posts,
        );
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(ExtractedMetadata::default().is_empty());
    }

    #[test]
    fn test_absent_fields_not_serialized() {
        let meta = ExtractedMetadata {
            word_count: Some(42),
            ..Default::default()
        };
        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(json, r#"{"wordCount":42}"#);
    }

    #[test]
    fn test_camel_case_round_trip() {
        let json = r#"{"wordCount":10,"readingTime":1,"featuredImages":["https://a.example/x.png"]}"#;
        let meta: ExtractedMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.word_count, Some(10));
        assert_eq!(meta.reading_time, Some(1));
        assert_eq!(
            meta.featured_images.as_deref(),
            Some(&["https://a.example/x.png".to_string()][..])
        );
        assert_eq!(serde_json::to_string(&meta).unwrap(), json);
    }

    #[test]
    fn test_merge_overwrites_present_fields_only() {
        let mut base = ExtractedMetadata {
            word_count: Some(100),
            author: Some("Original".into()),
            summary: Some("Old summary".into()),
            ..Default::default()
        };
        let update = ExtractedMetadata {
            word_count: Some(200),
            tldr: Some("x".repeat(200)),
            ..Default::default()
        };
        base.merge(update);

        assert_eq!(base.word_count, Some(200));
        assert_eq!(base.author.as_deref(), Some("Original"));
        assert_eq!(base.summary.as_deref(), Some("Old summary"));
        assert!(base.tldr.is_some());
    }
}
