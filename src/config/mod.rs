//! Configuration for catsync
//!
//! Sources, highest priority first:
//! 1. Environment variables (CATSYNC_*)
//! 2. The file passed with `--config`
//! 3. User config (`<config_dir>/catsync/config.toml`)
//! 4. Built-in defaults

mod loader;
mod types;

pub use loader::{user_config_path, ConfigWarning};
pub use types::{
    AppConfig, CacheConfig, ChecksumConfig, Config, SettingsConfig, BUILTIN_CHECKSUM,
};
