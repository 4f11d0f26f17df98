//! Error types for refmap-store

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for refmap-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in refmap-store.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The configuration file does not exist
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound {
        /// The path that was requested
        path: PathBuf,
    },

    /// The configuration file extension is not a supported format
    #[error("Unsupported file format: {extension}. Use .json, .yaml, or .yml")]
    UnsupportedFormat {
        /// The offending extension, including the dot
        extension: String,
    },

    /// The configuration file could not be parsed
    #[error("Failed to parse {}: {message}", path.display())]
    Parse {
        /// The file that failed to parse
        path: PathBuf,
        /// Parser error detail
        message: String,
    },

    /// A mapping with this URL already exists in the store
    #[error("URL already exists: {url}")]
    DuplicateUrl { url: String },

    /// A mapping with this local path already exists in the store
    #[error("Local path already exists: {path}")]
    DuplicatePath { path: String },

    /// No mapping exists for the given URL
    #[error("Mapping not found for URL: {url}")]
    UnknownUrl { url: String },

    /// A save was requested without a target path
    #[error("No file path specified for saving")]
    NoSavePath,

    /// Mappings failed validation at load time
    #[error("Validation failed on load:\n{details}")]
    ValidationFailed { details: String },

    /// A serialization step failed
    #[error("Serialization failed: {message}")]
    Serialize { message: String },

    /// Metadata extraction failed
    #[error(transparent)]
    Extract(#[from] refmap_extract::Error),

    /// An underlying I/O operation failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a [`Error::Parse`] from any displayable parser error.
    pub fn parse(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Error::Parse {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Build a [`Error::Serialize`] from any displayable serializer error.
    pub fn serialize(err: impl std::fmt::Display) -> Self {
        Error::Serialize {
            message: err.to_string(),
        }
    }
}
