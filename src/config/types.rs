//! Configuration types

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::application::sync::SwapStrategy;
use crate::catalog::ServerContext;
use crate::domain::entities::AppProfile;
use crate::domain::ports::ChecksumVerifier;
use crate::domain::value_objects::CatalogVersion;
use crate::error::{CatalogError, CatalogResult};
use crate::infrastructure::checksum::{ExternalChecksum, ManifestChecksum};

use super::loader::{self, ConfigWarning};

/// Value of `checksum.tool` selecting the in-process manifest verifier
pub const BUILTIN_CHECKSUM: &str = "builtin";

/// Host application facts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub name: String,
    pub version: String,
    pub template_extension: String,
    pub master_library_file: String,
    pub template_subfolder: String,
    /// Folder holding `Configurations/`. Defaults to the executable's folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "PGSuper".to_string(),
            version: "8.0.0".to_string(),
            template_extension: "pgt".to_string(),
            master_library_file: "WSDOT.lbr".to_string(),
            template_subfolder: "WorkgroupTemplates".to_string(),
            install_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    pub assume_current_without_checksums: bool,
    pub swap: SwapStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecksumConfig {
    /// `builtin` or the path of an md5deep-compatible program
    pub tool: String,
}

impl Default for ChecksumConfig {
    fn default() -> Self {
        Self {
            tool: BUILTIN_CHECKSUM.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub checksum: ChecksumConfig,

    #[serde(default)]
    pub settings: SettingsConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> CatalogResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Explicit file, then the user config, then defaults; env overrides last.
    pub fn discover(explicit: Option<&Path>) -> CatalogResult<(Self, Vec<ConfigWarning>)> {
        loader::discover(explicit)
    }

    /// Apply environment variable overrides (CATSYNC_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    pub fn install_dir(&self) -> PathBuf {
        self.app.install_dir.clone().unwrap_or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }

    pub fn cache_root(&self) -> PathBuf {
        self.cache.root.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(&self.app.name)
        })
    }

    pub fn settings_path(&self) -> PathBuf {
        self.settings.path.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("catsync")
                .join("settings.toml")
        })
    }

    pub fn app_profile(&self) -> CatalogResult<AppProfile> {
        let version: CatalogVersion =
            self.app
                .version
                .parse()
                .map_err(|e| CatalogError::InvalidConfig {
                    file: PathBuf::from("app.version"),
                    message: format!("{e}"),
                })?;

        let mut profile = AppProfile::new(
            self.app.name.clone(),
            version,
            &self.install_dir(),
            self.cache_root(),
        );
        profile.template_extension = self.app.template_extension.clone();
        profile.template_subfolder = self.app.template_subfolder.clone();
        if profile.master_library_file != self.app.master_library_file {
            profile.default_master_library = profile
                .default_master_library
                .with_file_name(&self.app.master_library_file);
            profile.master_library_file = self.app.master_library_file.clone();
        }
        profile.assume_current_without_checksums = self.cache.assume_current_without_checksums;
        Ok(profile)
    }

    pub fn checksum_verifier(&self) -> Arc<dyn ChecksumVerifier> {
        let tool = self.checksum.tool.trim();
        if tool.is_empty() || tool.eq_ignore_ascii_case(BUILTIN_CHECKSUM) {
            Arc::new(ManifestChecksum::new())
        } else {
            Arc::new(ExternalChecksum::new(tool))
        }
    }

    /// Server context with network transports and the configured verifier.
    pub fn server_context(&self) -> CatalogResult<ServerContext> {
        Ok(ServerContext::new(self.app_profile()?).with_checksum(self.checksum_verifier()))
    }
}
