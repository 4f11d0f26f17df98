//! refmap core — shared error types and path utilities.
//!
//! This crate provides the foundational pieces used across all refmap crates.
//! It has no internal refmap dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`util`]: Path normalization utilities

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use util::normalize_path;
