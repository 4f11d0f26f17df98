//! Format-specific extractors and format dispatch.
//!
//! Each extractor composes one format parser with the shared toolkit to
//! assemble a complete [`ExtractedMetadata`] record. Extractors are
//! infallible by construction: a parser that cannot make sense of its input
//! degrades to raw text, and the toolkit heuristics simply produce fewer
//! fields.
//!
//! [`create_extractor`] is the entry point for callers with a file path;
//! [`create_extractor_for_format`] for callers that already know the format.

mod html;
mod markdown;
mod text;

use std::fmt;
use std::path::Path;

pub use html::HtmlExtractor;
pub use markdown::MarkdownExtractor;
pub use text::TextExtractor;

use crate::config::ExtractionConfig;
use crate::metadata::ExtractedMetadata;

/// File extensions with a dedicated extraction path.
///
/// Anything else still extracts, via the plain-text fallback.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["md", "markdown", "html", "htm", "txt"];

/// A metadata extractor for one document format.
///
/// Extraction never fails: unusable input yields a sparse record, in the
/// worst case just word count and reading time.
pub trait Extractor: Send + Sync {
    /// Extract metadata from raw document content.
    fn extract(&self, content: &str) -> ExtractedMetadata;
}

/// Document format, detected from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Markdown,
    Html,
    /// Plain text; also the fallback for unrecognized extensions.
    Text,
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileFormat::Markdown => f.write_str("markdown"),
            FileFormat::Html => f.write_str("html"),
            FileFormat::Text => f.write_str("text"),
        }
    }
}

/// Detect a document's format from its file extension, case-insensitively.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use refmap_extract::{detect_format, FileFormat};
///
/// assert_eq!(detect_format(Path::new("notes/post.MD")), FileFormat::Markdown);
/// assert_eq!(detect_format(Path::new("page.htm")), FileFormat::Html);
/// assert_eq!(detect_format(Path::new("Makefile")), FileFormat::Text);
/// ```
pub fn detect_format(path: &Path) -> FileFormat {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("md" | "markdown") => FileFormat::Markdown,
        Some("html" | "htm") => FileFormat::Html,
        _ => FileFormat::Text,
    }
}

/// Check whether a path carries one of the dedicated-format extensions.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Create the extractor matching a file path's format.
pub fn create_extractor(path: &Path, config: ExtractionConfig) -> Box<dyn Extractor> {
    create_extractor_for_format(detect_format(path), config)
}

/// Create the extractor for a known format.
pub fn create_extractor_for_format(
    format: FileFormat,
    config: ExtractionConfig,
) -> Box<dyn Extractor> {
    match format {
        FileFormat::Markdown => Box::new(MarkdownExtractor::new(config)),
        FileFormat::Html => Box::new(HtmlExtractor::new(config)),
        FileFormat::Text => Box::new(TextExtractor::new(config)),
    }
}

// ============================================================================
// Tests
// ============================================================================
