//! Bidirectional URL-to-path mapping store.
//!
//! This crate maintains the mapping collection between published URLs and
//! local filesystem paths, layered over the extraction subsystem in
//! `refmap-extract`:
//!
//! - [`mapping`]: the [`UrlMapping`] record
//! - [`store`]: the indexed in-memory collection, with O(1) lookups both ways
//! - [`persist`]: JSON/YAML configuration files and CSV/JSON/YAML export
//! - [`validate`]: collection-wide validation sweeps
//! - [`validators`]: single-value URL and path validators
//! - [`rewrite`]: swapping paths and URLs inside content
//! - [`migrate`]: v1-to-v2 schema migration and backups
//!
//! # Example
//!
//! ```rust
//! use refmap_store::{MappingStore, UrlMapping};
//!
//! let mut store = MappingStore::new();
//! store.insert(UrlMapping::new(
//!     "My Post",
//!     "https://example.com/post/",
//!     "/blog/post.md",
//! ))?;
//!
//! assert_eq!(store.path_for_url("https://example.com/post/"), Some("/blog/post.md"));
//! assert_eq!(store.url_for_path("/blog/post.md"), Some("https://example.com/post/"));
//! # Ok::<(), refmap_store::Error>(())
//! ```

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod mapping;
pub mod migrate;
pub mod persist;
pub mod rewrite;
pub mod store;
pub mod validate;
pub mod validators;

pub use error::{Error, Result};
pub use mapping::UrlMapping;
pub use migrate::{MigrationOptions, MigrationReport};
pub use persist::{export_mappings, load_config, save_config, ConfigFile, ConfigFormat, ExportFormat};
pub use store::{MappingStore, StoreOptions};
pub use validate::{validate_mappings, ValidationReport};
pub use validators::{PathValidator, UrlValidator};
