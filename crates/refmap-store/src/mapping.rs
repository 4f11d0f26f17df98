//! The mapping record.
//!
//! A [`UrlMapping`] ties one published URL to one local file. Extracted
//! metadata fields sit directly on the record in serialized form (flattened),
//! matching the v2 configuration layout. The `metadata` side map holds the
//! legacy v1 container; schema migration lifts its known keys onto the
//! record and leaves the rest in place.

use chrono::{DateTime, Utc};
use refmap_extract::ExtractedMetadata;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One URL-to-path mapping with its metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UrlMapping {
    /// Human-readable title.
    pub title: String,
    /// Published URL.
    pub url: String,
    /// Local filesystem path.
    pub local_path: String,
    /// Timestamp of the last update, ISO 8601 in serialized form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    /// Extracted metadata, flattened into the record.
    #[serde(flatten)]
    pub extracted: ExtractedMetadata,
    /// Legacy metadata container from v1 configurations; migration lifts the
    /// known keys out and leaves the rest here.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl UrlMapping {
    /// Create a mapping stamped with the current time.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        local_path: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            local_path: local_path.into(),
            last_updated: Some(Utc::now()),
            extracted: ExtractedMetadata::default(),
            metadata: Map::new(),
        }
    }

    /// Attach extracted metadata, builder style.
    pub fn with_extracted(mut self, extracted: ExtractedMetadata) -> Self {
        self.extracted = extracted;
        self
    }

    /// Whether the mapping carries any metadata, extracted or otherwise.
    pub fn has_metadata(&self) -> bool {
        !self.extracted.is_empty() || !self.metadata.is_empty()
    }

    /// Whether the required fields are all present.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.url.trim().is_empty()
            && !self.local_path.trim().is_empty()
    }

    /// Set `last_updated` to now.
    pub fn touch(&mut self) {
        self.last_updated = Some(Utc::now());
    }
}

// ============================================================================
// Tests
// ============================================================================
