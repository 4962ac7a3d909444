//! SettingsStore port - sectioned key/value persistence
//!
//! Writes are buffered by the implementation and made durable by `flush`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings access error: {message}")]
    AccessError { message: String },

    #[error("settings serialization error: {message}")]
    SerializationError { message: String },

    #[error("settings file corrupted at {}: {message}", path.display())]
    Corrupted { path: PathBuf, message: String },
}

pub trait SettingsStore {
    fn get(&self, section: &str, key: &str) -> Option<String>;

    fn set(&mut self, section: &str, key: &str, value: &str);

    fn remove(&mut self, section: &str, key: &str);

    /// Keys present in `section`, in a stable order
    fn keys(&self, section: &str) -> Vec<String>;

    fn flush(&mut self) -> Result<(), SettingsError>;

    fn get_i64(&self, section: &str, key: &str) -> Option<i64> {
        self.get(section, key).and_then(|v| v.trim().parse().ok())
    }

    fn set_i64(&mut self, section: &str, key: &str, value: i64) {
        self.set(section, key, &value.to_string());
    }
}
