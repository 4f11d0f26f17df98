//! refmap CLI
//!
//! Command-line interface for managing URL-to-path mappings.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use refmap_extract::ExtractionConfig;
use refmap_store::{
    export_mappings, migrate, ExportFormat, MappingStore, MigrationOptions, StoreOptions,
    UrlMapping,
};

const DEFAULT_CONFIG: &str = "url-references.json";

/// refmap - URL-to-path mapping management
#[derive(Parser, Debug)]
#[command(name = "refmap")]
#[command(version, about = "Manage bidirectional URL-to-path mappings", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty configuration file
    Init {
        /// Output file path (.json, .yaml, or .yml)
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        path: PathBuf,
    },
    /// Add a new URL-to-path mapping
    Add {
        /// Title of the mapping
        #[arg(short, long)]
        title: String,
        /// Published URL
        #[arg(short, long)]
        url: String,
        /// Local filesystem path
        #[arg(short, long)]
        path: String,
        /// Extract metadata from the local file
        #[arg(short, long)]
        extract: bool,
        /// Base URL for internal/external link classification
        #[arg(long)]
        base_url: Option<String>,
        /// Config file path
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
    /// Print the published URL for a local path
    GetUrl {
        local_path: String,
        /// Config file path
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
    /// Print the local path for a published URL
    GetPath {
        url: String,
        /// Config file path
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
    /// List all mappings
    List {
        /// Output format: table, json, or yaml
        #[arg(short, long, default_value = "table")]
        format: String,
        /// Config file path
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
    /// Validate the mapping collection
    Validate {
        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Config file path
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
    /// Export mappings as JSON, YAML, or CSV
    Export {
        /// Export format: json, yaml, or csv
        #[arg(short, long, default_value = "json")]
        format: String,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Config file path
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
    /// Extract metadata from a document and print it as JSON
    Extract {
        /// Document to extract from
        path: PathBuf,
        /// Base URL for internal/external link classification
        #[arg(long)]
        base_url: Option<String>,
        /// Reading speed in words per minute
        #[arg(long)]
        reading_speed: Option<u32>,
    },
    /// Migrate a v1 configuration file to the v2 layout
    Migrate {
        /// Configuration file to migrate
        input: PathBuf,
        /// Output path; defaults to rewriting the input in place
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Skip the pre-migration backup
        #[arg(long)]
        no_backup: bool,
        /// Directory backups go to
        #[arg(long, default_value = migrate::DEFAULT_BACKUP_DIR)]
        backup_dir: PathBuf,
        /// Delete old backups beyond this count after migrating
        #[arg(long)]
        keep_backups: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match Args::parse().command {
        Command::Init { path } => init(&path),
        Command::Add {
            title,
            url,
            path,
            extract,
            base_url,
            config,
        } => add(&config, title, url, path, extract, base_url).await,
        Command::GetUrl { local_path, config } => get_url(&config, &local_path),
        Command::GetPath { url, config } => get_path(&config, &url),
        Command::List { format, config } => list(&config, &format),
        Command::Validate { json, config } => validate(&config, json),
        Command::Export {
            format,
            output,
            config,
        } => export(&config, &format, output.as_deref()),
        Command::Extract {
            path,
            base_url,
            reading_speed,
        } => extract(&path, base_url, reading_speed).await,
        Command::Migrate {
            input,
            output,
            no_backup,
            backup_dir,
            keep_backups,
        } => run_migrate(&input, output.as_deref(), no_backup, backup_dir, keep_backups),
    }
}

fn load_store(config: &Path) -> Result<MappingStore> {
    MappingStore::load(config, &StoreOptions::default())
        .with_context(|| format!("Failed to load {}", config.display()))
}

fn init(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("File already exists: {}", path.display());
    }
    MappingStore::new().save(path)?;
    println!("Created {}", path.display());
    Ok(())
}

async fn add(
    config: &Path,
    title: String,
    url: String,
    path: String,
    extract: bool,
    base_url: Option<String>,
) -> Result<()> {
    let mut store = load_store(config)?;

    if extract {
        let extraction = ExtractionConfig {
            base_url,
            ..Default::default()
        };
        store
            .insert_with_extraction(&title, url, path, extraction)
            .await?;
    } else {
        store.insert(UrlMapping::new(&title, url, path))?;
    }

    store.save(config)?;
    println!("Added mapping: {title}");
    Ok(())
}

fn get_url(config: &Path, local_path: &str) -> Result<()> {
    let store = load_store(config)?;
    match store.url_for_path(local_path) {
        Some(url) => {
            println!("{url}");
            Ok(())
        }
        None => bail!("No URL found for path: {local_path}"),
    }
}

fn get_path(config: &Path, url: &str) -> Result<()> {
    let store = load_store(config)?;
    match store.path_for_url(url) {
        Some(path) => {
            println!("{path}");
            Ok(())
        }
        None => bail!("No local path found for URL: {url}"),
    }
}

fn list(config: &Path, format: &str) -> Result<()> {
    let store = load_store(config)?;
    let mappings = store.mappings();

    if mappings.is_empty() {
        println!("No mappings found.");
        return Ok(());
    }

    match format.to_ascii_lowercase().as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(mappings)?),
        "yaml" => print!("{}", serde_yaml::to_string(mappings)?),
        "table" => {
            println!("\nURL Mappings:\n");
            for (i, mapping) in mappings.iter().enumerate() {
                println!("{}. {}", i + 1, mapping.title);
                println!("   URL:  {}", mapping.url);
                println!("   Path: {}", mapping.local_path);
                if let Some(updated) = mapping.last_updated {
                    println!("   Last Updated: {}", updated.to_rfc3339());
                }
                println!();
            }
            println!("Total: {} mapping(s)", mappings.len());
        }
        other => bail!("Unsupported format '{other}'. Use 'table', 'json', or 'yaml'."),
    }
    Ok(())
}

fn validate(config: &Path, json: bool) -> Result<()> {
    // Validation is the point here, so load leniently and report everything.
    let options = StoreOptions {
        validate_on_load: false,
        ..Default::default()
    };
    let store = MappingStore::load(config, &options)
        .with_context(|| format!("Failed to load {}", config.display()))?;
    let report = store.validate();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        if !report.is_valid() {
            std::process::exit(1);
        }
        return Ok(());
    }

    if !report.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &report.warnings {
            println!("  [{}] {}", warning.kind, warning.message);
        }
    }

    if !report.is_valid() {
        println!("\nErrors:");
        for error in &report.errors {
            println!("  [{}] {}", error.kind, error.message);
        }
        std::process::exit(1);
    }

    println!("\nAll mappings are valid");
    Ok(())
}

fn export(config: &Path, format: &str, output: Option<&Path>) -> Result<()> {
    let store = load_store(config)?;
    let format: ExportFormat = format.parse()?;
    let rendered = export_mappings(store.mappings(), format)?;

    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            println!("Exported to {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

async fn extract(
    path: &Path,
    base_url: Option<String>,
    reading_speed: Option<u32>,
) -> Result<()> {
    let mut config = ExtractionConfig {
        base_url,
        ..Default::default()
    };
    if let Some(wpm) = reading_speed {
        config.reading_speed = wpm;
    }

    let metadata = refmap_extract::extract_metadata(path, config).await?;
    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}

fn run_migrate(
    input: &Path,
    output: Option<&Path>,
    no_backup: bool,
    backup_dir: PathBuf,
    keep_backups: Option<usize>,
) -> Result<()> {
    let output = output.unwrap_or(input);
    let options = MigrationOptions {
        backup: !no_backup,
        backup_dir: backup_dir.clone(),
    };

    let report = migrate::migrate_config_file(input, output, &options)?;

    for warning in &report.warnings {
        println!("Warning: {warning}");
    }
    if let Some(backup) = &report.backup_path {
        println!("Backup written to {}", backup.display());
    }
    println!(
        "Migrated {} mapping(s) to {}",
        report.migrated_count,
        output.display()
    );

    if let Some(keep) = keep_backups {
        let deleted = migrate::cleanup_old_backups(&backup_dir, keep)?;
        if deleted > 0 {
            println!("Deleted {deleted} old backup(s)");
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
