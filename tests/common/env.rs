//! Isolated environments for library-level and CLI tests

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use catsync::application::sync::{load_cache_state, CacheSynchronizer};
use catsync::catalog::{CatalogServerRegistry, ServerContext};
use catsync::config::Config;
use catsync::domain::entities::CacheState;
use catsync::infrastructure::TomlSettingsStore;

/// Install folder, cache root and settings file under one temp dir
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let env = Self { dir };
        let bundled = env.install_dir().join("Configurations");
        std::fs::create_dir_all(bundled.join("PGSuper")).unwrap();
        std::fs::write(bundled.join("WSDOT.lbr"), "bundled library").unwrap();
        env
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn install_dir(&self) -> PathBuf {
        self.path("install")
    }

    pub fn cache_root(&self) -> PathBuf {
        self.path("cache")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.path("settings.toml")
    }

    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.app.install_dir = Some(self.install_dir());
        config.cache.root = Some(self.cache_root());
        config.settings.path = Some(self.settings_path());
        config
    }

    pub fn context(&self) -> ServerContext {
        self.config().server_context().unwrap()
    }

    pub fn synchronizer(&self) -> CacheSynchronizer {
        CacheSynchronizer::new(self.context())
    }

    pub fn store(&self) -> TomlSettingsStore {
        TomlSettingsStore::open(self.settings_path()).unwrap()
    }

    /// Registry and cache state as a fresh process would load them.
    pub fn load(&self) -> (TomlSettingsStore, CatalogServerRegistry, CacheState) {
        let store = self.store();
        let profile = self.config().app_profile().unwrap();
        let registry = CatalogServerRegistry::load_from_store(&store, &profile.app_name);
        let state = load_cache_state(&store, &profile);
        (store, registry, state)
    }
}

/// Result of running the catsync binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs `catsync` with a config file pointing into a temp dir
pub struct CliEnv {
    pub env: TestEnv,
    config_path: PathBuf,
}

impl CliEnv {
    pub fn new() -> Self {
        let env = TestEnv::new();
        let config_path = env.path("config.toml");
        let config = format!(
            "[app]\nname = \"PGSuper\"\nversion = \"8.0.0\"\ninstall_dir = {:?}\n\n[cache]\nroot = {:?}\n\n[settings]\npath = {:?}\n",
            env.install_dir().display().to_string(),
            env.cache_root().display().to_string(),
            env.settings_path().display().to_string(),
        );
        std::fs::write(&config_path, config).unwrap();
        Self { env, config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = Command::new(env!("CARGO_BIN_EXE_catsync"))
            .arg("--config")
            .arg(&self.config_path)
            .args(args)
            .env_remove("CATSYNC_LOG")
            .env_remove("CATSYNC_CACHE_ROOT")
            .env_remove("CATSYNC_SETTINGS_PATH")
            .env_remove("CATSYNC_APP_NAME")
            .env_remove("CATSYNC_APP_VERSION")
            .env_remove("CATSYNC_CHECKSUM_TOOL")
            .env_remove("CATSYNC_ASSUME_CURRENT")
            .env_remove("CATSYNC_SWAP")
            .output()
            .unwrap();

        TestResult {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let mut full = vec!["--json"];
        full.extend_from_slice(args);
        let result = self.run(&full);
        assert!(result.success, "catsync {args:?} failed: {}", result.stderr);
        let last = result.stdout.lines().last().unwrap_or_default().to_string();
        serde_json::from_str(&last).unwrap()
    }
}
