//! Format-dispatching metadata extraction for Markdown, HTML, and plain
//! text.
//!
//! Given a document, this crate derives a structured [`ExtractedMetadata`]
//! record: word count, reading time, quotes, categorized links, images, and
//! synthesized summaries. Format dispatch is by file extension, with plain
//! text as the fallback for anything unrecognized.
//!
//! # Modules
//!
//! - [`parse`]: format parsers (Markdown, HTML, plain text)
//! - [`toolkit`]: format-agnostic heuristics shared by all extractors
//! - [`extractor`]: format-specific extractors and the dispatch factory
//! - [`metadata`]: the [`ExtractedMetadata`] output record
//! - [`config`]: extraction tuning knobs
//!
//! # Fail-open extraction
//!
//! Malformed content is never an error. Parsers degrade to raw text, and an
//! extractor that finds no signal for a field simply leaves it absent. The
//! only errors this crate surfaces are about the input file itself: missing,
//! or unreadable.
//!
//! # Example
//!
//! ```rust
//! use refmap_extract::{ExtractionConfig, Extractor, MarkdownExtractor};
//!
//! let extractor = MarkdownExtractor::new(
//!     ExtractionConfig::default().with_base_url("https://example.com"),
//! );
//! let meta = extractor.extract("---\nauthor: Jane\n---\n\nSee [a](https://example.com/a).");
//! assert_eq!(meta.author.as_deref(), Some("Jane"));
//! assert_eq!(
//!     meta.internal_links.as_deref(),
//!     Some(&["https://example.com/a".to_string()][..]),
//! );
//! ```

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod extractor;
pub mod metadata;
pub mod parse;
pub mod toolkit;

use std::path::Path;

pub use config::{
    ExtractionConfig, DEFAULT_MAX_LINKS, DEFAULT_MAX_QUOTES, DEFAULT_MAX_TAGS,
    DEFAULT_READING_SPEED,
};
pub use error::{Error, Result};
pub use extractor::{
    create_extractor, create_extractor_for_format, detect_format, is_supported, Extractor,
    FileFormat, HtmlExtractor, MarkdownExtractor, TextExtractor, SUPPORTED_EXTENSIONS,
};
pub use metadata::ExtractedMetadata;

/// Extract metadata from a file, dispatching on its extension.
///
/// This is the high-level entry point: it checks that the path references an
/// existing file, reads it, and runs the matching extractor. Content-level
/// problems never fail; only a missing or unreadable file does.
///
/// # Errors
///
/// [`Error::FileNotFound`] if the path is not an existing regular file, and
/// [`Error::Read`] if reading it fails.
pub async fn extract_metadata(
    path: impl AsRef<Path>,
    config: ExtractionConfig,
) -> Result<ExtractedMetadata> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(create_extractor(path, config).extract(&content))
}
