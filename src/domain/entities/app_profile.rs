//! The application a configuration cache belongs to

use std::path::{Path, PathBuf};

use crate::domain::value_objects::CatalogVersion;

/// Static facts about the host application: naming conventions on the
/// catalog server, bundled defaults and where the cache lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppProfile {
    pub app_name: String,
    pub app_version: CatalogVersion,
    /// Extension (without dot) of template files copied from template trees
    pub template_extension: String,
    pub master_library_file: String,
    pub template_subfolder: String,
    pub default_master_library: PathBuf,
    pub default_template_folder: PathBuf,
    pub cache_root: PathBuf,
    /// Local file-system servers without checksum sidecars report "up to date"
    pub assume_current_without_checksums: bool,
}

impl AppProfile {
    /// Profile with the conventional layout under `install_dir` and `cache_root`.
    pub fn new(
        app_name: impl Into<String>,
        app_version: CatalogVersion,
        install_dir: &Path,
        cache_root: PathBuf,
    ) -> Self {
        let app_name = app_name.into();
        let master_library_file = "WSDOT.lbr".to_string();
        let configurations = install_dir.join("Configurations");
        Self {
            default_master_library: configurations.join(&master_library_file),
            default_template_folder: configurations.join(&app_name),
            template_extension: "pgt".to_string(),
            template_subfolder: "WorkgroupTemplates".to_string(),
            master_library_file,
            app_name,
            app_version,
            cache_root,
            assume_current_without_checksums: false,
        }
    }

    /// `<App>Packages.ini`
    pub fn descriptor_file_name(&self) -> String {
        format!("{}Packages.ini", self.app_name)
    }

    /// `<App>.pgz`
    pub fn bundle_file_name(&self) -> String {
        format!("{}.pgz", self.app_name)
    }

    /// Folder readers use.
    pub fn live_folder(&self) -> PathBuf {
        self.cache_root.join("Cache")
    }

    /// Sibling of the live folder holding the previous content during an update.
    pub fn backup_folder(&self) -> PathBuf {
        self.cache_root.join("Cache_Save")
    }

    pub fn lock_path(&self) -> PathBuf {
        self.cache_root.join(".catsync.lock")
    }

    pub fn cached_master_library(&self, folder: &Path) -> PathBuf {
        folder.join(&self.master_library_file)
    }

    pub fn cached_template_folder(&self, folder: &Path) -> PathBuf {
        folder.join(&self.template_subfolder)
    }

    pub fn cached_bundle(&self, folder: &Path) -> PathBuf {
        folder.join(self.bundle_file_name())
    }

    /// True when `path` has the template extension (case-insensitive).
    pub fn is_template_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(self.template_extension.trim_start_matches('.')))
    }
}
