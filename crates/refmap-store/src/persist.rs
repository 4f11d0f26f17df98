//! Configuration file persistence and export.
//!
//! Mappings persist as JSON or YAML, selected by file extension. Two layouts
//! load: the bare mapping array of v1 configurations and the versioned
//! envelope of v2. Loading always migrates to v2 in memory (see
//! [`crate::migrate`]); saving always writes the envelope.

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::mapping::UrlMapping;
use crate::migrate;

/// On-disk serialization format, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Detect the format from a path's extension.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFormat`] for anything but `.json`, `.yaml`, and
    /// `.yml`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(ConfigFormat::Json),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            _ => Err(Error::UnsupportedFormat {
                extension: format!(".{ext}"),
            }),
        }
    }
}

/// Envelope timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigStamp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A mapping configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigFile {
    /// Schema version; absent in v1 files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub mappings: Vec<UrlMapping>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ConfigStamp>,
}

/// The two layouts accepted on load.
#[derive(Deserialize)]
#[serde(untagged)]
enum ConfigDocument {
    Envelope(ConfigFile),
    Bare(Vec<UrlMapping>),
}

impl From<ConfigDocument> for ConfigFile {
    fn from(doc: ConfigDocument) -> Self {
        match doc {
            ConfigDocument::Envelope(config) => config,
            ConfigDocument::Bare(mappings) => ConfigFile {
                version: None,
                mappings,
                metadata: None,
            },
        }
    }
}

/// Load a configuration file, migrating v1 layouts to v2 in memory.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let mut config = load_config_unmigrated(path)?;
    let migrated = migrate::auto_migrate(&mut config);
    if migrated > 0 {
        log::info!(
            "Migrated {migrated} v1 mapping(s) from {} to the v2 layout",
            path.display()
        );
    }
    Ok(config)
}

/// Load a configuration file exactly as stored, without schema migration.
pub(crate) fn load_config_unmigrated(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;

    let doc: ConfigDocument = match format {
        ConfigFormat::Json => {
            serde_json::from_str(&content).map_err(|e| Error::parse(path, e))?
        }
        ConfigFormat::Yaml => {
            serde_yaml::from_str(&content).map_err(|e| Error::parse(path, e))?
        }
    };

    Ok(ConfigFile::from(doc))
}

/// Save a configuration file in the format its extension names.
///
/// Stamps `metadata.updatedAt`, keeping `createdAt` if already set.
pub fn save_config(path: &Path, config: &ConfigFile) -> Result<()> {
    let format = ConfigFormat::from_path(path)?;

    let mut stamped = config.clone();
    let now = Utc::now();
    let stamp = stamped.metadata.get_or_insert_with(ConfigStamp::default);
    stamp.created_at.get_or_insert(now);
    stamp.updated_at = Some(now);
    stamped.version.get_or_insert_with(|| migrate::CURRENT_VERSION.to_string());

    let content = match format {
        ConfigFormat::Json => {
            let mut out = serde_json::to_string_pretty(&stamped).map_err(Error::serialize)?;
            out.push('\n');
            out
        }
        ConfigFormat::Yaml => serde_yaml::to_string(&stamped).map_err(Error::serialize)?,
    };

    std::fs::write(path, content)?;
    Ok(())
}

/// Formats mappings can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(Error::UnsupportedFormat {
                extension: other.to_string(),
            }),
        }
    }
}

/// Render mappings in an export format.
///
/// CSV carries the four identity columns only; JSON and YAML carry the full
/// records.
pub fn export_mappings(mappings: &[UrlMapping], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => serde_json::to_string_pretty(mappings).map_err(Error::serialize),
        ExportFormat::Yaml => serde_yaml::to_string(mappings).map_err(Error::serialize),
        ExportFormat::Csv => {
            let mut writer = csv::WriterBuilder::new()
                .quote_style(csv::QuoteStyle::Always)
                .from_writer(Vec::new());
            writer
                .write_record(["Title", "URL", "Local Path", "Last Updated"])
                .map_err(Error::serialize)?;
            for mapping in mappings {
                let updated = mapping
                    .last_updated
                    .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
                    .unwrap_or_default();
                writer
                    .write_record([
                        mapping.title.as_str(),
                        mapping.url.as_str(),
                        mapping.local_path.as_str(),
                        updated.as_str(),
                    ])
                    .map_err(Error::serialize)?;
            }
            let bytes = writer.into_inner().map_err(Error::serialize)?;
            String::from_utf8(bytes).map_err(Error::serialize)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
