//! In-memory settings store for tests

use std::collections::BTreeMap;

use crate::domain::ports::{SettingsError, SettingsStore};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySettingsStore {
    sections: BTreeMap<String, BTreeMap<String, String>>,
    flushes: usize,
    fail_flushes: bool,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `flush` calls
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    /// Make every following `flush` fail, as a read-only settings file would.
    pub fn fail_flushes(&mut self, fail: bool) {
        self.fail_flushes = fail;
    }

    pub fn sections(&self) -> &BTreeMap<String, BTreeMap<String, String>> {
        &self.sections
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, section: &str, key: &str) -> Option<String> {
        self.sections.get(section)?.get(key).cloned()
    }

    fn set(&mut self, section: &str, key: &str, value: &str) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, section: &str, key: &str) {
        if let Some(entries) = self.sections.get_mut(section) {
            entries.remove(key);
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
        if self.fail_flushes {
            return Err(SettingsError::AccessError {
                message: "settings are read-only".to_string(),
            });
        }
        self.flushes += 1;
        Ok(())
    }
}
