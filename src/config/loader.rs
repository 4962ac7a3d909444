//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::application::sync::SwapStrategy;
use crate::error::{CatalogError, CatalogResult};

use super::types::Config;

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{suggestion}'?)")?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> CatalogResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| CatalogError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// `<config_dir>/catsync/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("catsync").join("config.toml"))
}

/// Explicit path, then user config, then defaults. Environment overrides are applied last.
///
/// An explicit path must exist; a broken user config is an error too.
pub fn discover(explicit: Option<&Path>) -> CatalogResult<(Config, Vec<ConfigWarning>)> {
    if let Some(path) = explicit {
        let (config, warnings) = load_with_warnings(path)?;
        return Ok((with_env_overrides(config), warnings));
    }

    if let Some(user_config) = user_config_path().filter(|p| p.exists()) {
        let (config, warnings) = load_with_warnings(&user_config)?;
        return Ok((with_env_overrides(config), warnings));
    }

    Ok((with_env_overrides(Config::default()), Vec::new()))
}

/// Apply environment variable overrides (CATSYNC_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |name| std::env::var(name).ok())
}

pub(super) fn apply_overrides(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(name) = var("CATSYNC_APP_NAME").filter(|v| !v.trim().is_empty()) {
        config.app.name = name.trim().to_string();
    }

    if let Some(version) = var("CATSYNC_APP_VERSION").filter(|v| !v.trim().is_empty()) {
        config.app.version = version.trim().to_string();
    }

    if let Some(root) = var("CATSYNC_CACHE_ROOT").filter(|v| !v.is_empty()) {
        config.cache.root = Some(PathBuf::from(root));
    }

    if let Some(path) = var("CATSYNC_SETTINGS_PATH").filter(|v| !v.is_empty()) {
        config.settings.path = Some(PathBuf::from(path));
    }

    if let Some(tool) = var("CATSYNC_CHECKSUM_TOOL").filter(|v| !v.is_empty()) {
        config.checksum.tool = tool;
    }

    // CATSYNC_ASSUME_CURRENT
    if let Some(val) = var("CATSYNC_ASSUME_CURRENT") {
        config.cache.assume_current_without_checksums =
            !matches!(val.trim().to_lowercase().as_str(), "" | "0" | "false" | "no");
    }

    // CATSYNC_SWAP
    if let Some(val) = var("CATSYNC_SWAP") {
        config.cache.swap = match val.trim().to_lowercase().as_str() {
            "versioned-pointer" | "versioned" => SwapStrategy::VersionedPointer,
            _ => SwapStrategy::RenameBackup,
        };
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

pub(super) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "app",
        "name",
        "version",
        "template_extension",
        "master_library_file",
        "template_subfolder",
        "install_dir",
        "cache",
        "root",
        "assume_current_without_checksums",
        "swap",
        "checksum",
        "tool",
        "settings",
        "path",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
