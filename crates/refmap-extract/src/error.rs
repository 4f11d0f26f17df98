//! Error types for refmap-extract

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for refmap-extract operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in refmap-extract.
///
/// Malformed document content is never an error: parsers and extractors
/// degrade instead of failing (see the module docs on fail-open behavior).
/// Only problems with the input file itself surface here.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The input path does not reference an existing file
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// The path that was requested
        path: PathBuf,
    },

    /// The file exists but could not be read as UTF-8 text
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// The path that was being read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
