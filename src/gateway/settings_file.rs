//! TOML-file settings storage.
//!
//! Persists the manual income figures as a flat string map in a small TOML
//! file, read-modify-write on every update. A missing or unparsable file
//! reads as empty; the settings holder turns that into its defaults.

use crate::errors::{Error, Result};
use crate::gateway::SettingsStore;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Settings store backed by a TOML file of `key = "value"` pairs.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    /// Creates a store over the given file path. The file is created on
    /// first write.
    #[must_use]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn load_table(&self) -> BTreeMap<String, String> {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        match toml::from_str(&contents) {
            Ok(table) => table,
            Err(e) => {
                warn!("Ignoring unparsable settings file {:?}: {}", self.path, e);
                BTreeMap::new()
            }
        }
    }
}

impl SettingsStore for FileSettingsStore {
    fn read(&self, key: &str) -> Option<String> {
        self.load_table().get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut table = self.load_table();
        table.insert(key.to_string(), value.to_string());
        let contents = toml::to_string(&table)
            .map_err(|e| Error::Config(format!("Failed to serialize settings: {e}")))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, contents)?;
        Ok(())
    }
}
