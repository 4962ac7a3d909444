//! Named collection of catalog servers
//!
//! Servers persist in the `Servers` section of the settings store, one key
//! per server name holding its creation string. Two built-in servers are
//! always present after a load.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::creation::decode_creation_string;
use super::server::CatalogServer;
use crate::domain::ports::{SettingsError, SettingsStore};
use crate::error::{CatalogError, CatalogResult};

pub const SERVERS_SECTION: &str = "Servers";

/// Name of the built-in FTP server
pub const BUILT_IN_FTP_SERVER: &str = "WSDOT";

/// Name of the built-in HTTP server
pub const BUILT_IN_HTTP_SERVER: &str = "WSDOT (HTTP)";

/// The two servers every registry carries.
pub fn built_in_servers(app_name: &str) -> [CatalogServer; 2] {
    [
        CatalogServer::ftp(
            BUILT_IN_FTP_SERVER,
            format!("ftp://ftp.wsdot.wa.gov/public/Bridge/Software/{app_name}/"),
        ),
        CatalogServer::http(
            BUILT_IN_HTTP_SERVER,
            format!("https://www.wsdot.wa.gov/eesc/bridge/software/{app_name}/"),
        ),
    ]
}

#[derive(Debug, Clone, Default)]
pub struct CatalogServerRegistry {
    servers: BTreeMap<String, CatalogServer>,
}

impl CatalogServerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding only the built-in servers.
    pub fn with_built_ins(app_name: &str) -> Self {
        let mut registry = Self::new();
        registry.add_built_ins(app_name);
        registry
    }

    /// Insert `server`, replacing any server with the same name.
    pub fn add(&mut self, server: CatalogServer) {
        if self.servers.contains_key(server.name()) {
            debug!(server = %server.name(), "replacing catalog server");
        }
        self.servers.insert(server.name().to_string(), server);
    }

    pub fn remove(&mut self, name: &str) -> Option<CatalogServer> {
        self.servers.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&CatalogServer> {
        self.servers.get(name)
    }

    /// Like `get`, but a missing server is a `ServerNotFound` error.
    pub fn require(&self, name: &str) -> CatalogResult<&CatalogServer> {
        self.get(name).ok_or_else(|| CatalogError::ServerNotFound {
            name: name.to_string(),
        })
    }

    /// All servers ordered by name
    pub fn get_all(&self) -> Vec<&CatalogServer> {
        self.servers.values().collect()
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.servers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Read every server from the store, then add missing built-ins.
    ///
    /// Entries that do not decode are logged and skipped.
    pub fn load_from_store(store: &dyn SettingsStore, app_name: &str) -> Self {
        let mut registry = Self::new();
        for key in store.keys(SERVERS_SECTION) {
            let Some(value) = store.get(SERVERS_SECTION, &key) else {
                continue;
            };
            match decode_creation_string(&value) {
                Ok(decoded) => {
                    let name = decoded.name.unwrap_or(key);
                    registry.add(CatalogServer::new(name, decoded.kind));
                }
                Err(e) => warn!(key = %key, error = %e, "ignoring catalog server definition"),
            }
        }
        registry.add_built_ins(app_name);
        registry
    }

    /// Replace the store's `Servers` section with this registry.
    pub fn save_to_store(&self, store: &mut dyn SettingsStore) -> Result<(), SettingsError> {
        for key in store.keys(SERVERS_SECTION) {
            if !self.servers.contains_key(&key) {
                store.remove(SERVERS_SECTION, &key);
            }
        }
        for (name, server) in &self.servers {
            store.set(SERVERS_SECTION, name, &server.creation_string());
        }
        store.flush()
    }

    fn add_built_ins(&mut self, app_name: &str) {
        for server in built_in_servers(app_name) {
            if !self.is_defined(server.name()) {
                self.add(server);
            }
        }
    }
}
