//! Upgrade settings written by older releases
//!
//! Older stores listed servers as `Servers/Count = N` plus lettered keys
//! `A`, `B`, ... holding `name!address`, and kept a single local
//! configuration under `Options/UserFolder` and
//! `Options/MasterLibraryFileName`.

use tracing::{info, warn};

use super::state_store::{CATALOG_SERVER_KEY, OPTIONS_SECTION, PUBLISHER_KEY};
use crate::catalog::{decode_creation_string, ServerKind, SERVERS_SECTION};
use crate::domain::ports::{SettingsError, SettingsStore};

pub const LOCAL_FILES_SERVER: &str = "Local Files";

const COUNT_KEY: &str = "Count";
const USER_FOLDER_KEY: &str = "UserFolder";
const LIBRARY_FILE_KEY: &str = "MasterLibraryFileName";

/// What a migration run changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Names of servers rewritten from lettered keys
    pub servers: Vec<String>,
    /// True when a local configuration became the `Local Files` server
    pub local_files: bool,
}

impl MigrationReport {
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty() && !self.local_files
    }
}

fn lettered_key(index: usize) -> Option<String> {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'A' + i).to_string())
}

/// Rewrite old-style entries in place. Running it twice changes nothing.
pub fn migrate_legacy_settings(store: &mut dyn SettingsStore) -> Result<MigrationReport, SettingsError> {
    let mut report = MigrationReport::default();

    if let Some(count) = store.get(SERVERS_SECTION, COUNT_KEY) {
        let count = count.trim().parse::<usize>().unwrap_or(0);
        let mut migrated = Vec::new();

        for index in 0..count {
            let Some(key) = lettered_key(index) else {
                warn!(index, "too many legacy servers, ignoring the rest");
                break;
            };
            let Some(value) = store.get(SERVERS_SECTION, &key) else {
                continue;
            };
            match decode_creation_string(&value) {
                Ok(decoded) => {
                    let name = decoded.name.unwrap_or_else(|| key.clone());
                    migrated.push((key, name, decoded.kind));
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "dropping unreadable legacy server");
                    store.remove(SERVERS_SECTION, &key);
                }
            }
        }

        store.remove(SERVERS_SECTION, COUNT_KEY);
        for (key, _, _) in &migrated {
            store.remove(SERVERS_SECTION, key);
        }
        for (_, name, kind) in migrated {
            store.set(SERVERS_SECTION, &name, &kind.creation_string());
            report.servers.push(name);
        }
    }

    if let Some(folder) = store.get(OPTIONS_SECTION, USER_FOLDER_KEY) {
        let library = store
            .get(OPTIONS_SECTION, LIBRARY_FILE_KEY)
            .unwrap_or_default();
        if !folder.trim().is_empty() {
            let kind = ServerKind::LocalFileSystem {
                library_file: library.trim().to_string(),
                template_folder: folder.trim().to_string(),
            };
            store.set(SERVERS_SECTION, LOCAL_FILES_SERVER, &kind.creation_string());
            if store.get(OPTIONS_SECTION, CATALOG_SERVER_KEY).is_none() {
                store.set(OPTIONS_SECTION, CATALOG_SERVER_KEY, LOCAL_FILES_SERVER);
                store.set(OPTIONS_SECTION, PUBLISHER_KEY, LOCAL_FILES_SERVER);
            }
            report.local_files = true;
        }
        store.remove(OPTIONS_SECTION, USER_FOLDER_KEY);
        store.remove(OPTIONS_SECTION, LIBRARY_FILE_KEY);
    }

    if !report.is_empty() {
        store.flush()?;
        info!(
            servers = report.servers.len(),
            local_files = report.local_files,
            "migrated legacy settings"
        );
    }
    Ok(report)
}
