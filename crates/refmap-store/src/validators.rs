//! Standalone URL and path validators.
//!
//! Where [`crate::validate`] sweeps a whole mapping collection, these check
//! one candidate value at a time, for use before a mapping ever enters the
//! store. Both produce the same [`ValidationReport`] shape.

use std::path::{Path, PathBuf};

use url::Url;

use crate::validate::{ErrorKind, ValidationReport, WarningKind};

/// Validator for published URLs.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    /// Schemes accepted as valid.
    pub allowed_schemes: Vec<String>,
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self {
            allowed_schemes: vec!["http".to_string(), "https".to_string()],
        }
    }
}

impl UrlValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the accepted schemes.
    pub fn with_allowed_schemes(mut self, schemes: impl IntoIterator<Item = String>) -> Self {
        self.allowed_schemes = schemes.into_iter().collect();
        self
    }

    /// Check a URL's format and scheme.
    pub fn validate(&self, url: &str) -> ValidationReport {
        let mut report = ValidationReport::default();

        if url.trim().is_empty() {
            report.error(ErrorKind::InvalidUrl, "URL cannot be empty".to_string(), None);
            return report;
        }

        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(_) => {
                report.error(
                    ErrorKind::InvalidUrl,
                    format!("Invalid URL format: {url}"),
                    Some(url),
                );
                return report;
            }
        };

        if !self.allowed_schemes.iter().any(|s| s == parsed.scheme()) {
            report.error(
                ErrorKind::InvalidUrl,
                format!(
                    "Invalid protocol: {}. Allowed protocols: {}",
                    parsed.scheme(),
                    self.allowed_schemes.join(", ")
                ),
                Some(url),
            );
        }

        report
    }

    /// Validate several URLs, pairing each with its report.
    pub fn validate_batch<'a, I>(&self, urls: I) -> Vec<(&'a str, ValidationReport)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        urls.into_iter()
            .map(|url| (url, self.validate(url)))
            .collect()
    }

    /// Check whether a valid URL is reachable, via an HTTP HEAD request.
    ///
    /// Unreachability and error statuses are warnings, matching the
    /// collection validator's treatment of missing files.
    #[cfg(feature = "http-check")]
    pub async fn check_accessibility(&self, url: &str) -> ValidationReport {
        const HEAD_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

        let mut report = self.validate(url);
        if !report.is_valid() {
            return report;
        }

        let client = match reqwest::Client::builder().timeout(HEAD_TIMEOUT).build() {
            Ok(client) => client,
            Err(err) => {
                report.warning(
                    WarningKind::MissingFile,
                    format!("URL accessibility check failed: {err}"),
                    Some(url),
                );
                return report;
            }
        };
        match client.head(url).send().await {
            Ok(response) if response.status().is_client_error()
                || response.status().is_server_error() =>
            {
                report.warning(
                    WarningKind::MissingFile,
                    format!("URL returned status {}", response.status().as_u16()),
                    Some(url),
                );
            }
            Ok(_) => {}
            Err(err) => {
                report.warning(
                    WarningKind::MissingFile,
                    format!("URL accessibility check failed: {err}"),
                    Some(url),
                );
            }
        }
        report
    }
}

/// Validator for local file paths.
#[derive(Debug, Clone)]
pub struct PathValidator {
    /// Base directory paths must stay inside, when set.
    pub base_path: Option<PathBuf>,
    /// Extensions accepted, lowercase without the dot. Empty allows all.
    pub allowed_extensions: Vec<String>,
    /// Treat relative paths as errors instead of warnings.
    pub require_absolute: bool,
}

impl Default for PathValidator {
    fn default() -> Self {
        Self {
            base_path: None,
            allowed_extensions: refmap_extract::SUPPORTED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            require_absolute: false,
        }
    }
}

impl PathValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Confine valid paths to a base directory.
    pub fn with_base_path(mut self, base: impl Into<PathBuf>) -> Self {
        self.base_path = Some(base.into());
        self
    }

    /// Treat relative paths as errors.
    pub fn require_absolute(mut self) -> Self {
        self.require_absolute = true;
        self
    }

    /// Check a path: shape first, then the filesystem.
    ///
    /// A nonexistent file is only a warning, and ends the check early; type
    /// and extension checks need a file to look at.
    pub fn validate(&self, path: &str) -> ValidationReport {
        let mut report = ValidationReport::default();

        if path.trim().is_empty() {
            report.error(
                ErrorKind::InvalidFormat,
                "Path cannot be empty".to_string(),
                None,
            );
            return report;
        }

        let as_path = Path::new(path);
        if !as_path.is_absolute() {
            if self.require_absolute {
                report.error(
                    ErrorKind::InvalidFormat,
                    format!("Path must be absolute: {path}"),
                    None,
                );
            } else {
                report.warning(
                    WarningKind::RelativePath,
                    format!("Relative path detected (absolute paths recommended): {path}"),
                    None,
                );
            }
        }

        if let Some(base) = &self.base_path {
            let normalized = refmap_core::normalize_path(as_path);
            let normalized_base = refmap_core::normalize_path(base);
            if !normalized.starts_with(&normalized_base) {
                report.error(
                    ErrorKind::InvalidFormat,
                    format!(
                        "Path traversal detected: {path} is outside base directory {}",
                        base.display()
                    ),
                    None,
                );
            }
        }

        if !as_path.exists() {
            report.warning(
                WarningKind::MissingFile,
                format!("File not found: {path}"),
                None,
            );
            return report;
        }

        if !as_path.is_file() {
            report.error(
                ErrorKind::InvalidFormat,
                format!("Path is not a file: {path}"),
                None,
            );
            return report;
        }

        if !self.allowed_extensions.is_empty() {
            let ext = as_path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase)
                .unwrap_or_default();
            if !self.allowed_extensions.contains(&ext) {
                report.error(
                    ErrorKind::InvalidFormat,
                    format!(
                        "Invalid file type: .{ext}. Allowed types: {}",
                        self.allowed_extensions.join(", ")
                    ),
                    None,
                );
            }
        }

        report
    }

    /// Validate several paths, pairing each with its report.
    pub fn validate_batch<'a, I>(&self, paths: I) -> Vec<(&'a str, ValidationReport)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        paths
            .into_iter()
            .map(|path| (path, self.validate(path)))
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // -------------------------------------------------------------------
    // UrlValidator
    // -------------------------------------------------------------------

    #[test]
    fn test_url_ok() {
        let report = UrlValidator::new().validate("https://a.example/post/");
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_url_empty_and_malformed() {
        let validator = UrlValidator::new();
        assert!(!validator.validate("   ").is_valid());
        assert!(!validator.validate("not a url").is_valid());
    }

    #[test]
    fn test_url_scheme_restriction() {
        let report = UrlValidator::new().validate("ftp://a.example/file");
        assert!(!report.is_valid());
        assert!(report.errors[0].message.contains("Invalid protocol"));

        let permissive =
            UrlValidator::new().with_allowed_schemes(["ftp".to_string(), "https".to_string()]);
        assert!(permissive.validate("ftp://a.example/file").is_valid());
    }

    #[test]
    fn test_url_batch() {
        let results =
            UrlValidator::new().validate_batch(["https://a.example/", "bad url"]);
        assert_eq!(results.len(), 2);
        assert!(results[0].1.is_valid());
        assert!(!results[1].1.is_valid());
    }

    // -------------------------------------------------------------------
    // PathValidator
    // -------------------------------------------------------------------

    #[test]
    fn test_path_ok() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("post.md");
        std::fs::write(&file, "x").unwrap();

        let report = PathValidator::new().validate(file.to_str().unwrap());
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_path_relative_warning_or_error() {
        let lenient = PathValidator::new().validate("notes/post.md");
        assert!(lenient.is_valid());
        assert!(lenient
            .warnings
            .iter()
            .any(|w| w.kind == WarningKind::RelativePath));

        let strict = PathValidator::new()
            .require_absolute()
            .validate("notes/post.md");
        assert!(!strict.is_valid());
    }

    #[test]
    fn test_path_missing_file_is_warning_only() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone.md");
        let report = PathValidator::new().validate(missing.to_str().unwrap());
        assert!(report.is_valid());
        assert!(report
            .warnings
            .iter()
            .any(|w| w.kind == WarningKind::MissingFile));
    }

    #[test]
    fn test_path_directory_rejected() {
        let dir = TempDir::new().unwrap();
        let report = PathValidator::new().validate(dir.path().to_str().unwrap());
        assert!(!report.is_valid());
        assert!(report.errors[0].message.contains("not a file"));
    }

    #[test]
    fn test_path_extension_restriction() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("data.csv");
        std::fs::write(&file, "x").unwrap();

        let report = PathValidator::new().validate(file.to_str().unwrap());
        assert!(!report.is_valid());
        assert!(report.errors[0].message.contains("Invalid file type"));
    }

    #[test]
    fn test_path_traversal_detection() {
        let validator = PathValidator::new().with_base_path("/srv/content");
        let inside = validator.validate("/srv/content/post.md");
        assert!(inside.errors.iter().all(|e| !e.message.contains("traversal")));

        let outside = validator.validate("/srv/content/../secrets.md");
        assert!(outside
            .errors
            .iter()
            .any(|e| e.message.contains("Path traversal detected")));
    }
}
