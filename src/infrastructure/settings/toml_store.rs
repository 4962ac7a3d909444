//! TOML settings file
//!
//! Persists the settings at `<config_dir>/catsync/settings.toml`:
//!
//! ```toml
//! [Options]
//! CatalogServer = "WSDOT"
//! Publisher = "WSDOT"
//!
//! [Settings]
//! CacheUpdateFrequency = "2"
//! ```
//!
//! Values are always strings. Writes go through a temp file that is renamed
//! into place while holding an exclusive lock on `settings.lock`.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::domain::ports::{SettingsError, SettingsStore};

type Sections = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug)]
pub struct TomlSettingsStore {
    path: PathBuf,
    sections: Sections,
    dirty: bool,
}

impl TomlSettingsStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let sections = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| SettingsError::AccessError {
                message: e.to_string(),
            })?;
            toml::from_str(&content).map_err(|e| SettingsError::Corrupted {
                path: path.clone(),
                message: e.to_string(),
            })?
        } else {
            Sections::new()
        };

        Ok(Self {
            path,
            sections,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn write_to_disk(&self) -> Result<(), SettingsError> {
        let access = |e: std::io::Error| SettingsError::AccessError {
            message: e.to_string(),
        };

        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        fs::create_dir_all(parent).map_err(access)?;

        let content =
            toml::to_string_pretty(&self.sections).map_err(|e| SettingsError::SerializationError {
                message: e.to_string(),
            })?;

        let mut temp = tempfile::NamedTempFile::new_in(parent).map_err(access)?;
        temp.write_all(content.as_bytes()).map_err(access)?;
        temp.persist(&self.path).map_err(|e| access(e.error))?;
        Ok(())
    }
}

impl SettingsStore for TomlSettingsStore {
    fn get(&self, section: &str, key: &str) -> Option<String> {
        self.sections.get(section)?.get(key).cloned()
    }

    fn set(&mut self, section: &str, key: &str, value: &str) {
        let entries = self.sections.entry(section.to_string()).or_default();
        if entries.get(key).map(String::as_str) != Some(value) {
            entries.insert(key.to_string(), value.to_string());
            self.dirty = true;
        }
    }

    fn remove(&mut self, section: &str, key: &str) {
        if let Some(entries) = self.sections.get_mut(section) {
            if entries.remove(key).is_some() {
                self.dirty = true;
            }
            if entries.is_empty() {
                self.sections.remove(section);
            }
        }
    }

    fn keys(&self, section: &str) -> Vec<String> {
        self.sections
            .get(section)
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn flush(&mut self) -> Result<(), SettingsError> {
        if !self.dirty && self.path.exists() {
            return Ok(());
        }

        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(|e| SettingsError::AccessError {
                message: e.to_string(),
            })?;
        }
        let lock_file = fs::File::create(&lock_path).map_err(|e| SettingsError::AccessError {
            message: e.to_string(),
        })?;
        lock_file
            .lock_exclusive()
            .map_err(|e| SettingsError::AccessError {
                message: e.to_string(),
            })?;

        let result = self.write_to_disk();

        let _ = lock_file.unlock();
        if result.is_ok() {
            self.dirty = false;
            debug!(path = %self.path.display(), "settings saved");
        }
        result
    }
}
