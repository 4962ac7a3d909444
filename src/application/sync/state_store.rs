//! Cache state persistence in the settings store

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::domain::entities::{AppProfile, CacheState};
use crate::domain::ports::{SettingsError, SettingsStore};
use crate::domain::value_objects::{SharedResourceType, UpdateFrequency};

pub const SETTINGS_SECTION: &str = "Settings";
pub const OPTIONS_SECTION: &str = "Options";

pub const SHARED_RESOURCE_TYPE_KEY: &str = "SharedResourceType";
pub const UPDATE_FREQUENCY_KEY: &str = "CacheUpdateFrequency";
pub const LAST_UPDATE_KEY: &str = "LastCacheUpdate";
pub const CATALOG_SERVER_KEY: &str = "CatalogServer";
pub const PUBLISHER_KEY: &str = "Publisher";
pub const MASTER_LIBRARY_CACHE_KEY: &str = "MasterLibraryCache";
pub const TEMPLATES_CACHE_KEY: &str = "WorkgroupTemplatesCache";
pub const MASTER_LIBRARY_URL_KEY: &str = "MasterLibraryURL";

/// Read the cache state, filling gaps with the built-in defaults.
pub fn load_cache_state(store: &dyn SettingsStore, profile: &AppProfile) -> CacheState {
    let mut state = CacheState::built_in(profile);

    if let Some(code) = store.get_i64(SETTINGS_SECTION, SHARED_RESOURCE_TYPE_KEY) {
        state.shared_resource_type = SharedResourceType::from_code(code);
    }
    if let Some(frequency) = store
        .get_i64(SETTINGS_SECTION, UPDATE_FREQUENCY_KEY)
        .and_then(UpdateFrequency::from_code)
    {
        state.frequency = frequency;
    }
    state.last_update = store
        .get_i64(SETTINGS_SECTION, LAST_UPDATE_KEY)
        .filter(|secs| *secs > 0)
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));

    if let Some(server) = store.get(OPTIONS_SECTION, CATALOG_SERVER_KEY) {
        state.server = server;
    }
    if let Some(publisher) = store.get(OPTIONS_SECTION, PUBLISHER_KEY) {
        state.publisher = publisher;
    }
    if let Some(path) = store.get(OPTIONS_SECTION, MASTER_LIBRARY_CACHE_KEY) {
        state.master_library_cache = PathBuf::from(path);
    }
    if let Some(path) = store.get(OPTIONS_SECTION, TEMPLATES_CACHE_KEY) {
        state.template_folder_cache = PathBuf::from(path);
    }
    if let Some(url) = store.get(OPTIONS_SECTION, MASTER_LIBRARY_URL_KEY) {
        state.master_library_url = url;
    }

    state
}

/// Write every field of `state` and flush.
pub fn save_cache_state(store: &mut dyn SettingsStore, state: &CacheState) -> Result<(), SettingsError> {
    store.set_i64(
        SETTINGS_SECTION,
        SHARED_RESOURCE_TYPE_KEY,
        state.shared_resource_type.code(),
    );
    store.set_i64(SETTINGS_SECTION, UPDATE_FREQUENCY_KEY, state.frequency.code());
    store.set_i64(
        SETTINGS_SECTION,
        LAST_UPDATE_KEY,
        state.last_update.map_or(0, |t| t.timestamp()),
    );

    store.set(OPTIONS_SECTION, CATALOG_SERVER_KEY, &state.server);
    store.set(OPTIONS_SECTION, PUBLISHER_KEY, &state.publisher);
    store.set(
        OPTIONS_SECTION,
        MASTER_LIBRARY_CACHE_KEY,
        &state.master_library_cache.to_string_lossy(),
    );
    store.set(
        OPTIONS_SECTION,
        TEMPLATES_CACHE_KEY,
        &state.template_folder_cache.to_string_lossy(),
    );
    store.set(OPTIONS_SECTION, MASTER_LIBRARY_URL_KEY, &state.master_library_url);

    store.flush()
}
