//! Mapping collection validation.
//!
//! [`validate_mappings`] sweeps a mapping list once and reports everything
//! it finds, split into errors (the collection is unusable as a lookup
//! table) and warnings (worth a look, not fatal). Nothing here mutates the
//! mappings.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use url::Url;

use crate::mapping::UrlMapping;

/// Days after which a mapping's timestamp counts as outdated.
pub const OUTDATED_AFTER_DAYS: i64 = 90;

/// Validation error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    DuplicateUrl,
    DuplicatePath,
    InvalidUrl,
    MissingFile,
    InvalidFormat,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::DuplicateUrl => "duplicate_url",
            ErrorKind::DuplicatePath => "duplicate_path",
            ErrorKind::InvalidUrl => "invalid_url",
            ErrorKind::MissingFile => "missing_file",
            ErrorKind::InvalidFormat => "invalid_format",
        };
        f.write_str(s)
    }
}

/// Validation warning categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    OutdatedTimestamp,
    RelativePath,
    MissingMetadata,
    MissingFile,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WarningKind::OutdatedTimestamp => "outdated_timestamp",
            WarningKind::RelativePath => "relative_path",
            WarningKind::MissingMetadata => "missing_metadata",
            WarningKind::MissingFile => "missing_file",
        };
        f.write_str(s)
    }
}

/// One validation error.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub message: String,
    /// URL of the offending mapping, when one is identifiable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One validation warning.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationWarning {
    #[serde(rename = "type")]
    pub kind: WarningKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// The outcome of a validation sweep.
///
/// Serializes with a computed `valid` flag alongside the two lists.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl Serialize for ValidationReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ValidationReport", 3)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("warnings", &self.warnings)?;
        state.end()
    }
}

impl ValidationReport {
    /// Whether the sweep found no errors. Warnings do not count.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn error(&mut self, kind: ErrorKind, message: String, url: Option<&str>) {
        self.errors.push(ValidationError {
            kind,
            message,
            url: url.map(String::from),
        });
    }

    pub(crate) fn warning(&mut self, kind: WarningKind, message: String, url: Option<&str>) {
        self.warnings.push(ValidationWarning {
            kind,
            message,
            url: url.map(String::from),
        });
    }

    /// One line per error, for embedding in error messages.
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("  - [{}] {}", e.kind, e.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Validate a mapping collection.
///
/// Incomplete records are reported once and skipped for the remaining
/// checks. Filesystem checks (`missing_file`) run against the paths as
/// written, so relative paths resolve against the working directory.
pub fn validate_mappings(mappings: &[UrlMapping]) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut seen_urls: HashSet<&str> = HashSet::new();
    let mut seen_paths: HashSet<String> = HashSet::new();

    for mapping in mappings {
        if !mapping.is_complete() {
            report.error(
                ErrorKind::InvalidFormat,
                format!(
                    "Missing required fields in mapping: title={:?} url={:?} localPath={:?}",
                    mapping.title, mapping.url, mapping.local_path
                ),
                None,
            );
            continue;
        }
        let url = mapping.url.as_str();

        if !seen_urls.insert(url) {
            report.error(
                ErrorKind::DuplicateUrl,
                format!("Duplicate URL found: {url}"),
                Some(url),
            );
        }

        let normalized = refmap_core::normalize_path(Path::new(&mapping.local_path))
            .to_string_lossy()
            .into_owned();
        if !seen_paths.insert(normalized) {
            report.error(
                ErrorKind::DuplicatePath,
                format!("Duplicate local path found: {}", mapping.local_path),
                Some(url),
            );
        }

        if Url::parse(url).is_err() {
            report.error(
                ErrorKind::InvalidUrl,
                format!("Invalid URL format: {url}"),
                Some(url),
            );
        }

        let path = Path::new(&mapping.local_path);
        if !path.exists() {
            report.warning(
                WarningKind::MissingFile,
                format!("Local file not found: {}", mapping.local_path),
                Some(url),
            );
        }

        if !path.is_absolute() {
            report.warning(
                WarningKind::RelativePath,
                format!(
                    "Relative path detected (absolute paths recommended): {}",
                    mapping.local_path
                ),
                Some(url),
            );
        }

        if !mapping.has_metadata() {
            report.warning(
                WarningKind::MissingMetadata,
                format!("Missing metadata for mapping: {}", mapping.title),
                Some(url),
            );
        }

        if let Some(updated) = mapping.last_updated {
            let age_days = (Utc::now() - updated).num_days();
            if age_days > OUTDATED_AFTER_DAYS {
                report.warning(
                    WarningKind::OutdatedTimestamp,
                    format!("Mapping not updated in {age_days} days: {}", mapping.title),
                    Some(url),
                );
            }
        }
    }

    report
}

// ============================================================================
// Tests
// ============================================================================
