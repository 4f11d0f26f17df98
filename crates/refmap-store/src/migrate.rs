//! v1-to-v2 schema migration and configuration backups.
//!
//! v1 configurations keep extracted metadata inside a nested `metadata`
//! object on each mapping; v2 flattens the known fields onto the mapping
//! record. Migration lifts the known keys, leaves anything unrecognized in
//! the container, and stamps mappings that carry no timestamp.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::mapping::UrlMapping;
use crate::persist::{self, ConfigFile};

/// Current configuration schema version.
pub const CURRENT_VERSION: &str = "2.0.0";

/// Default directory for configuration backups.
pub const DEFAULT_BACKUP_DIR: &str = ".backups";

/// Default number of backups [`cleanup_old_backups`] keeps.
pub const DEFAULT_MAX_BACKUPS: usize = 5;

/// Metadata keys lifted onto the mapping record during migration.
const KNOWN_METADATA_KEYS: &[&str] = &[
    "wordCount",
    "readingTime",
    "tags",
    "summary",
    "tldr",
    "categories",
    "author",
    "authorImage",
    "authorUrl",
    "featuredImages",
    "quotes",
    "internalLinks",
    "externalLinks",
    "relatedPosts",
];

/// Whether a version marker denotes the v1 layout.
pub fn is_v1(version: Option<&str>) -> bool {
    version.is_none_or(|v| v == "1.0.0")
}

/// Lift known metadata keys from a mapping's legacy container onto the
/// record. Returns whether anything changed.
pub fn migrate_mapping(mapping: &mut UrlMapping) -> bool {
    let mut lifted = Map::new();
    for &key in KNOWN_METADATA_KEYS {
        if let Some(value) = mapping.metadata.remove(key) {
            lifted.insert(key.to_string(), value);
        }
    }

    let mut changed = false;
    if !lifted.is_empty() {
        match serde_json::from_value(Value::Object(lifted)) {
            Ok(extracted) => {
                mapping.extracted.merge(extracted);
                changed = true;
            }
            Err(err) => {
                log::warn!(
                    "Skipping unusable legacy metadata for {}: {err}",
                    mapping.url
                );
            }
        }
    }

    if mapping.last_updated.is_none() {
        mapping.touch();
        changed = true;
    }
    changed
}

/// Migrate a v1 configuration to the v2 layout in place.
///
/// Returns the number of mappings that changed; zero for configurations
/// already at v2.
pub fn auto_migrate(config: &mut ConfigFile) -> usize {
    if !is_v1(config.version.as_deref()) {
        return 0;
    }

    let migrated = config
        .mappings
        .iter_mut()
        .map(|m| migrate_mapping(m))
        .filter(|&changed| changed)
        .count();

    config.version = Some(CURRENT_VERSION.to_string());
    let stamp = config.metadata.get_or_insert_with(Default::default);
    stamp.created_at.get_or_insert_with(Utc::now);
    stamp.updated_at = Some(Utc::now());
    migrated
}

/// Result of a file-level migration.
#[derive(Debug, Clone, Default)]
pub struct MigrationReport {
    /// Number of mappings changed by migration.
    pub migrated_count: usize,
    /// Non-fatal problems encountered.
    pub warnings: Vec<String>,
    /// Backup written before migration, if any.
    pub backup_path: Option<PathBuf>,
}

/// Options for [`migrate_config_file`].
#[derive(Debug, Clone)]
pub struct MigrationOptions {
    /// Write a backup of the input before migrating.
    pub backup: bool,
    /// Directory backups go to.
    pub backup_dir: PathBuf,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            backup: true,
            backup_dir: PathBuf::from(DEFAULT_BACKUP_DIR),
        }
    }
}

/// Copy a configuration file into the backup directory with a timestamped
/// name, creating the directory if needed.
pub fn create_backup(path: &Path, backup_dir: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    std::fs::create_dir_all(backup_dir)?;

    let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S-%3fZ");
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("config");
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    let backup_path = backup_dir.join(format!("{stem}-backup-{timestamp}{ext}"));

    std::fs::copy(path, &backup_path)?;
    Ok(backup_path)
}

/// Migrate a configuration file from v1 to v2, writing the result to
/// `output`.
///
/// A configuration already at v2 is left alone and reported with a warning.
/// Backup failure is a warning, not an error.
pub fn migrate_config_file(
    input: &Path,
    output: &Path,
    options: &MigrationOptions,
) -> Result<MigrationReport> {
    let mut report = MigrationReport::default();

    let mut config = persist::load_config_unmigrated(input)?;
    if !is_v1(config.version.as_deref()) {
        report
            .warnings
            .push("Configuration is already in the v2 layout".to_string());
        return Ok(report);
    }

    if options.backup {
        match create_backup(input, &options.backup_dir) {
            Ok(path) => report.backup_path = Some(path),
            Err(err) => report.warnings.push(format!("Backup creation failed: {err}")),
        }
    }

    report.migrated_count = auto_migrate(&mut config);
    persist::save_config(output, &config)?;
    Ok(report)
}

/// Delete old backups, keeping the `max_backups` most recent. Returns the
/// number deleted.
pub fn cleanup_old_backups(backup_dir: &Path, max_backups: usize) -> Result<usize> {
    if !backup_dir.exists() {
        return Ok(0);
    }

    let mut backups: Vec<(std::time::SystemTime, PathBuf)> = Vec::new();
    for entry in std::fs::read_dir(backup_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if !name.to_string_lossy().contains("-backup-") {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        backups.push((modified, entry.path()));
    }

    // Newest first.
    backups.sort_by(|a, b| b.0.cmp(&a.0));

    let mut deleted = 0;
    for (_, path) in backups.into_iter().skip(max_backups) {
        std::fs::remove_file(path)?;
        deleted += 1;
    }
    Ok(deleted)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_v1_detection() {
        assert!(is_v1(None));
        assert!(is_v1(Some("1.0.0")));
        assert!(!is_v1(Some("2.0.0")));
    }

    #[test]
    fn test_known_keys_lifted_unknown_kept() {
        let json = r#"{
            "title": "Old",
            "url": "https://a.example/old/",
            "localPath": "/old.md",
            "metadata": {"wordCount": 120, "readingTime": 1, "legacyFlag": true}
        }"#;
        let mut mapping: UrlMapping = serde_json::from_str(json).unwrap();
        assert!(migrate_mapping(&mut mapping));

        assert_eq!(mapping.extracted.word_count, Some(120));
        assert_eq!(mapping.extracted.reading_time, Some(1));
        assert!(mapping.metadata.get("wordCount").is_none());
        assert_eq!(
            mapping.metadata.get("legacyFlag").and_then(serde_json::Value::as_bool),
            Some(true)
        );
    }

    #[test]
    fn test_auto_migrate_sets_version_and_stamps() {
        let mut config = ConfigFile {
            version: None,
            mappings: vec![UrlMapping {
                title: "A".into(),
                url: "https://a.example/a/".into(),
                local_path: "/a.md".into(),
                ..Default::default()
            }],
            metadata: None,
        };

        let migrated = auto_migrate(&mut config);
        assert_eq!(migrated, 1);
        assert_eq!(config.version.as_deref(), Some(CURRENT_VERSION));
        assert!(config.mappings[0].last_updated.is_some());
        assert!(config.metadata.is_some());
    }

    #[test]
    fn test_auto_migrate_leaves_v2_alone() {
        let mut config = ConfigFile {
            version: Some(CURRENT_VERSION.to_string()),
            mappings: Vec::new(),
            metadata: None,
        };
        assert_eq!(auto_migrate(&mut config), 0);
        assert!(config.metadata.is_none());
    }

    #[test]
    fn test_backup_and_cleanup() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("refs.json");
        std::fs::write(&config_path, "[]").unwrap();
        let backup_dir = dir.path().join(".backups");

        for _ in 0..3 {
            create_backup(&config_path, &backup_dir).unwrap();
            // Distinct millisecond timestamps in the backup names.
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
        let count = std::fs::read_dir(&backup_dir).unwrap().count();
        assert_eq!(count, 3);

        let deleted = cleanup_old_backups(&backup_dir, 2).unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(std::fs::read_dir(&backup_dir).unwrap().count(), 2);
    }

    #[test]
    fn test_migrate_config_file_end_to_end() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("v1.json");
        std::fs::write(
            &input,
            r#"[{"title": "Old", "url": "https://a.example/old/", "localPath": "/old.md",
                "metadata": {"wordCount": 9}}]"#,
        )
        .unwrap();
        let output = dir.path().join("v2.json");
        let options = MigrationOptions {
            backup: true,
            backup_dir: dir.path().join(".backups"),
        };

        let report = migrate_config_file(&input, &output, &options).unwrap();
        assert_eq!(report.migrated_count, 1);
        assert!(report.backup_path.as_ref().unwrap().exists());

        let migrated = persist::load_config(&output).unwrap();
        assert_eq!(migrated.version.as_deref(), Some(CURRENT_VERSION));
        assert_eq!(migrated.mappings[0].extracted.word_count, Some(9));
    }
}
