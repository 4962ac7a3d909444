//! Session Factory
//!
//! Wires the configuration, the settings store, the server registry and the
//! cache synchronizer together for one command invocation.

use crate::application::sync::{
    load_cache_state, migrate_legacy_settings, CacheSynchronizer,
};
use crate::catalog::{CatalogServerRegistry, ServerContext};
use crate::config::Config;
use crate::domain::entities::CacheState;
use crate::error::CatalogResult;
use crate::infrastructure::TomlSettingsStore;

/// Everything a command needs, loaded from disk
#[derive(Debug)]
pub struct Session {
    pub config: Config,
    pub store: TomlSettingsStore,
    pub registry: CatalogServerRegistry,
    pub state: CacheState,
    pub sync: CacheSynchronizer,
}

impl Session {
    /// Open with network transports and the configured checksum verifier.
    pub fn open(config: Config) -> CatalogResult<Self> {
        let ctx = config.server_context()?;
        Self::with_context(config, ctx)
    }

    /// Open with caller-supplied capabilities.
    pub fn with_context(config: Config, ctx: ServerContext) -> CatalogResult<Self> {
        let mut store = TomlSettingsStore::open(config.settings_path())?;
        migrate_legacy_settings(&mut store)?;

        let registry = CatalogServerRegistry::load_from_store(&store, &ctx.profile.app_name);
        let state = load_cache_state(&store, &ctx.profile);
        let sync = CacheSynchronizer::new(ctx).with_swap_strategy(config.cache.swap);

        Ok(Self {
            config,
            store,
            registry,
            state,
            sync,
        })
    }

    pub fn context(&self) -> &ServerContext {
        self.sync.context()
    }

    /// Persist the registry after an edit.
    pub fn save_registry(&mut self) -> CatalogResult<()> {
        self.registry.save_to_store(&mut self.store)?;
        Ok(())
    }
}
