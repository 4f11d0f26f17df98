//! The in-memory mapping store.
//!
//! [`MappingStore`] keeps the mappings in insertion order and maintains two
//! hash indexes over them, so URL-to-path and path-to-URL lookups are O(1).
//! Path index keys are lexically normalized, so `./a/b.md` and `a/x/../b.md`
//! address the same mapping. A store loaded with `auto_save` set writes
//! itself back to its configuration file after every mutation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use refmap_core::normalize_path;
use refmap_extract::{ExtractedMetadata, ExtractionConfig};

use crate::error::{Error, Result};
use crate::mapping::UrlMapping;

/// Bidirectional URL-to-path mapping store.
#[derive(Debug, Clone, Default)]
pub struct MappingStore {
    mappings: Vec<UrlMapping>,
    url_index: HashMap<String, usize>,
    path_index: HashMap<String, usize>,
    allow_duplicates: bool,
    auto_save: bool,
    save_path: Option<PathBuf>,
    // Envelope timestamps from the loaded file, so saving keeps `createdAt`.
    stamp: Option<crate::persist::ConfigStamp>,
}

/// Options for [`MappingStore::load`].
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Accept duplicate URLs and paths instead of rejecting them.
    pub allow_duplicates: bool,
    /// Run a validation sweep after loading and fail on errors.
    pub validate_on_load: bool,
    /// Write the store back to the loaded file after every mutation.
    pub auto_save: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            allow_duplicates: false,
            validate_on_load: true,
            auto_save: false,
        }
    }
}

/// Index key for a local path.
fn path_key(path: &str) -> String {
    normalize_path(Path::new(path)).to_string_lossy().into_owned()
}

impl MappingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing mappings.
    ///
    /// With `allow_duplicates` set, later mappings shadow earlier ones in the
    /// indexes but all of them stay in the list.
    pub fn from_mappings(mappings: Vec<UrlMapping>, allow_duplicates: bool) -> Self {
        let mut store = Self {
            mappings,
            allow_duplicates,
            ..Self::default()
        };
        store.rebuild_indexes();
        store
    }

    /// Load a store from a configuration file.
    ///
    /// v1 layouts migrate in memory (see [`crate::migrate`]). With
    /// `validate_on_load` set, a collection with validation errors refuses
    /// to load.
    pub fn load(path: &std::path::Path, options: &StoreOptions) -> Result<Self> {
        let config = crate::persist::load_config(path)?;
        let mut store = Self::from_mappings(config.mappings, options.allow_duplicates);
        if options.validate_on_load && !store.is_empty() {
            let report = store.validate();
            if !report.is_valid() {
                return Err(Error::ValidationFailed {
                    details: report.error_summary(),
                });
            }
        }
        store.auto_save = options.auto_save;
        store.save_path = Some(path.to_path_buf());
        store.stamp = config.metadata;
        Ok(store)
    }

    /// Set the file [`save`](Self::save) and auto-save write to.
    pub fn set_save_path(&mut self, path: impl Into<PathBuf>) {
        self.save_path = Some(path.into());
    }

    /// Persist after a mutation, when auto-save is on and a path is known.
    fn autosave(&self) -> Result<()> {
        if !self.auto_save {
            return Ok(());
        }
        match &self.save_path {
            Some(path) => self.save(path),
            None => Err(Error::NoSavePath),
        }
    }

    /// Save the store to a configuration file, format by extension.
    ///
    /// Envelope timestamps loaded with the store are passed through, so
    /// `createdAt` survives load-save cycles.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let config = crate::persist::ConfigFile {
            version: None,
            mappings: self.mappings.clone(),
            metadata: self.stamp.clone(),
        };
        crate::persist::save_config(path, &config)
    }

    /// Validate the current mapping collection.
    pub fn validate(&self) -> crate::validate::ValidationReport {
        crate::validate::validate_mappings(&self.mappings)
    }

    fn rebuild_indexes(&mut self) {
        self.url_index.clear();
        self.path_index.clear();
        for (i, mapping) in self.mappings.iter().enumerate() {
            self.url_index.insert(mapping.url.clone(), i);
            self.path_index.insert(path_key(&mapping.local_path), i);
        }
    }

    /// Number of mappings.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Whether the store holds no mappings.
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// All mappings in insertion order.
    pub fn mappings(&self) -> &[UrlMapping] {
        &self.mappings
    }

    /// Consume the store, yielding its mappings.
    pub fn into_mappings(self) -> Vec<UrlMapping> {
        self.mappings
    }

    /// Look up the published URL for a local path.
    pub fn url_for_path(&self, local_path: &str) -> Option<&str> {
        self.path_index
            .get(&path_key(local_path))
            .map(|&i| self.mappings[i].url.as_str())
    }

    /// Look up the local path for a published URL.
    pub fn path_for_url(&self, url: &str) -> Option<&str> {
        self.url_index
            .get(url)
            .map(|&i| self.mappings[i].local_path.as_str())
    }

    /// Get the full mapping for a published URL.
    pub fn get(&self, url: &str) -> Option<&UrlMapping> {
        self.url_index.get(url).map(|&i| &self.mappings[i])
    }

    /// Add a mapping.
    ///
    /// Stamps `last_updated` if the mapping has none. Rejects URLs and
    /// normalized paths already present unless the store allows duplicates.
    pub fn insert(&mut self, mut mapping: UrlMapping) -> Result<()> {
        let key = path_key(&mapping.local_path);
        if !self.allow_duplicates {
            if self.url_index.contains_key(&mapping.url) {
                return Err(Error::DuplicateUrl { url: mapping.url });
            }
            if self.path_index.contains_key(&key) {
                return Err(Error::DuplicatePath {
                    path: mapping.local_path,
                });
            }
        }

        if mapping.last_updated.is_none() {
            mapping.touch();
        }

        let i = self.mappings.len();
        self.url_index.insert(mapping.url.clone(), i);
        self.path_index.insert(key, i);
        self.mappings.push(mapping);
        self.autosave()
    }

    /// Modify the mapping for a URL in place.
    ///
    /// The closure may change any field, the URL and path included; both
    /// indexes and the timestamp are refreshed afterwards.
    pub fn update<F>(&mut self, url: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut UrlMapping),
    {
        let &i = self.url_index.get(url).ok_or_else(|| Error::UnknownUrl {
            url: url.to_string(),
        })?;

        let old_key = path_key(&self.mappings[i].local_path);
        f(&mut self.mappings[i]);
        self.mappings[i].touch();

        let new_key = path_key(&self.mappings[i].local_path);
        if new_key != old_key {
            self.path_index.remove(&old_key);
            self.path_index.insert(new_key, i);
        }
        if self.mappings[i].url != url {
            self.url_index.remove(url);
            self.url_index.insert(self.mappings[i].url.clone(), i);
        }
        self.autosave()
    }

    /// Merge freshly extracted metadata into the mapping for a URL.
    ///
    /// Fields present in `update` overwrite; absent fields keep their
    /// current values.
    pub fn merge_metadata(&mut self, url: &str, update: ExtractedMetadata) -> Result<()> {
        self.update(url, |mapping| mapping.extracted.merge(update))
    }

    /// Add a mapping, populating its metadata by extracting from the file at
    /// `local_path`.
    pub async fn insert_with_extraction(
        &mut self,
        title: impl Into<String>,
        url: impl Into<String>,
        local_path: impl Into<String>,
        config: ExtractionConfig,
    ) -> Result<()> {
        let local_path = local_path.into();
        let extracted = refmap_extract::extract_metadata(&local_path, config).await?;
        self.insert(UrlMapping::new(title, url, local_path).with_extracted(extracted))
    }

    /// Re-extract metadata from a mapping's file and merge it in.
    pub async fn refresh_metadata(&mut self, url: &str, config: ExtractionConfig) -> Result<()> {
        let local_path = self
            .path_for_url(url)
            .ok_or_else(|| Error::UnknownUrl {
                url: url.to_string(),
            })?
            .to_string();
        let extracted = refmap_extract::extract_metadata(&local_path, config).await?;
        self.merge_metadata(url, extracted)
    }

    /// Remove the mapping for a URL, returning it if it existed.
    pub fn remove(&mut self, url: &str) -> Result<Option<UrlMapping>> {
        let Some(&i) = self.url_index.get(url) else {
            return Ok(None);
        };
        let mapping = self.mappings.remove(i);
        // Positions after the removed entry shifted down.
        self.rebuild_indexes();
        self.autosave()?;
        Ok(Some(mapping))
    }
}

// ============================================================================
// Tests
// ============================================================================
