//! What the local configuration cache holds and how it is refreshed

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::AppProfile;
use crate::domain::value_objects::{SharedResourceType, UpdateFrequency};

/// Cache settings, loaded at startup and mutated only by the cache synchronizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheState {
    pub shared_resource_type: SharedResourceType,
    pub frequency: UpdateFrequency,
    /// Name of the selected catalog server
    pub server: String,
    pub publisher: String,
    /// Empty when the publisher ships templates only
    pub master_library_cache: PathBuf,
    pub template_folder_cache: PathBuf,
    /// Where the cached library came from (remote URL or default path)
    pub master_library_url: String,
    pub last_update: Option<DateTime<Utc>>,
}

impl CacheState {
    /// Fresh state pointing at the application's bundled configuration.
    pub fn built_in(profile: &AppProfile) -> Self {
        Self {
            shared_resource_type: SharedResourceType::UseBuiltInDefaults,
            frequency: UpdateFrequency::default(),
            server: String::new(),
            publisher: String::new(),
            master_library_cache: profile.default_master_library.clone(),
            template_folder_cache: profile.default_template_folder.clone(),
            master_library_url: profile.default_master_library.display().to_string(),
            last_update: None,
        }
    }

    pub fn point_at_defaults(&mut self, profile: &AppProfile) {
        self.master_library_cache = profile.default_master_library.clone();
        self.template_folder_cache = profile.default_template_folder.clone();
        self.master_library_url = profile.default_master_library.display().to_string();
    }
}
