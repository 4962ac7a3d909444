//! Cache Synchronization Use Case
//!
//! Decides when the cache is due, asks the selected server whether it
//! changed, and repopulates the cache with all-or-nothing visibility.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use tracing::{debug, error, info, warn};

use crate::catalog::{CatalogServerRegistry, ServerContext};
use crate::domain::entities::CacheState;
use crate::domain::ports::{ConfigurationsListener, NoopListener, SettingsStore};
use crate::domain::services::is_time_to_update_cache;
use crate::domain::value_objects::SharedResourceType;
use crate::error::{CatalogError, CatalogResult};
use crate::infrastructure::fs::LocalFs;

use super::options::{LibrarySetup, UpdateOptions};
use super::result::UpdateOutcome;
use super::state_store::save_cache_state;
use super::swap::{CacheSwap, SwapStrategy};

/// Cache paths produced by one population run
struct ResolvedPaths {
    master_library_cache: PathBuf,
    template_folder_cache: PathBuf,
    master_library_url: String,
}

pub struct CacheSynchronizer {
    ctx: ServerContext,
    swap: SwapStrategy,
    fs: LocalFs,
    listener: Box<dyn ConfigurationsListener>,
    clock: fn() -> DateTime<Utc>,
}

impl CacheSynchronizer {
    pub fn new(ctx: ServerContext) -> Self {
        Self {
            ctx,
            swap: SwapStrategy::default(),
            fs: LocalFs::new(),
            listener: Box::new(NoopListener),
            clock: Utc::now,
        }
    }

    pub fn with_swap_strategy(mut self, swap: SwapStrategy) -> Self {
        self.swap = swap;
        self
    }

    pub fn with_listener(mut self, listener: Box<dyn ConfigurationsListener>) -> Self {
        self.listener = listener;
        self
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn context(&self) -> &ServerContext {
        &self.ctx
    }

    /// Folder holding the cache readers currently use.
    pub fn live_folder(&self) -> PathBuf {
        self.swap.live_folder(&self.ctx.profile)
    }

    pub fn is_time_to_update_cache(&self, state: &CacheState) -> bool {
        is_time_to_update_cache(state, (self.clock)())
    }

    /// Ask `server_name` whether `publisher` changed relative to `cache_folder`.
    pub fn are_updates_pending(
        &self,
        registry: &CatalogServerRegistry,
        server_name: &str,
        publisher: &str,
        cache_folder: &Path,
    ) -> CatalogResult<bool> {
        let server = registry.require(server_name)?;
        server.check_for_updates(&self.ctx, publisher, cache_folder)
    }

    /// Repopulate the cache for `state`, restoring the previous cache on failure.
    ///
    /// The new paths and timestamp are saved to `store` before the new
    /// content goes live; only then are they written to `state` and the
    /// listener notified. On failure `state` and `store` keep what they had.
    pub fn do_cache_update(
        &self,
        state: &mut CacheState,
        registry: &CatalogServerRegistry,
        store: &mut dyn SettingsStore,
    ) -> CatalogResult<()> {
        let lock = self.lock_cache()?;
        let result = self.update_locked(state, registry, store);
        if let Err(e) = lock.unlock() {
            warn!(error = %e, "could not release the cache lock");
        }
        result
    }

    fn update_locked(
        &self,
        state: &mut CacheState,
        registry: &CatalogServerRegistry,
        store: &mut dyn SettingsStore,
    ) -> CatalogResult<()> {
        let swap = self.swap.begin(&self.ctx.profile, self.fs)?;

        let paths = match self.fill(state, registry, swap.working_folder()) {
            Ok(paths) => paths,
            Err(e) => {
                warn!(error = %e, "cache update failed, restoring previous cache");
                self.abandon(swap, state, store);
                return Err(e);
            }
        };

        let mut updated = state.clone();
        updated.master_library_cache = paths.master_library_cache;
        updated.template_folder_cache = paths.template_folder_cache;
        updated.master_library_url = paths.master_library_url;
        updated.last_update = Some((self.clock)());

        if let Err(e) = save_cache_state(store, &updated) {
            warn!(error = %e, "could not save settings, restoring previous cache");
            self.abandon(swap, state, store);
            if let Err(again) = save_cache_state(store, state) {
                debug!(error = %again, "settings still not writable");
            }
            return Err(e.into());
        }

        match swap.commit() {
            Ok(live) => {
                *state = updated;
                self.listener.configurations_changed(state);
                info!(
                    source = %state.shared_resource_type,
                    live = %live.display(),
                    "configuration cache updated"
                );
                Ok(())
            }
            Err(e) => {
                if let Err(save) = save_cache_state(store, state) {
                    error!(error = %save, "could not restore saved settings");
                }
                Err(e.into())
            }
        }
    }

    /// Roll `swap` back. If the previous cache cannot be restored, fall back
    /// to built-in defaults.
    fn abandon(&self, swap: CacheSwap, state: &mut CacheState, store: &mut dyn SettingsStore) {
        let Err(restore) = swap.rollback() else {
            return;
        };
        error!(error = %restore, "could not restore previous cache, falling back to built-in defaults");
        state.shared_resource_type = SharedResourceType::UseBuiltInDefaults;
        state.point_at_defaults(&self.ctx.profile);
        self.listener.configurations_changed(state);
        if let Err(save) = save_cache_state(store, state) {
            error!(error = %save, "could not save settings");
        }
    }

    /// The periodic "update cache" flow.
    ///
    /// `confirm` is asked before a pending update is applied. Any failure
    /// switches the cache back to built-in defaults before it is returned.
    pub fn update_cache(
        &self,
        state: &mut CacheState,
        registry: &CatalogServerRegistry,
        store: &mut dyn SettingsStore,
        options: UpdateOptions,
        confirm: &mut dyn FnMut(&CacheState) -> bool,
    ) -> CatalogResult<UpdateOutcome> {
        if state.shared_resource_type == SharedResourceType::UseBuiltInDefaults {
            return Ok(UpdateOutcome::NotDue);
        }
        if !options.force && !self.is_time_to_update_cache(state) {
            debug!(frequency = %state.frequency, "cache update not due");
            return Ok(UpdateOutcome::NotDue);
        }

        let live = self.live_folder();
        let pending = match self.are_updates_pending(registry, &state.server, &state.publisher, &live) {
            Ok(pending) => pending,
            Err(e) => return Err(self.degrade(state, registry, store, e)),
        };

        if !pending {
            state.last_update = Some((self.clock)());
            save_cache_state(store, state)?;
            info!(server = %state.server, publisher = %state.publisher, "configuration cache is current");
            return Ok(UpdateOutcome::UpToDate);
        }

        if !confirm(state) {
            info!("configuration update declined");
            return Ok(UpdateOutcome::Declined);
        }

        match self.do_cache_update(state, registry, store) {
            Ok(()) => Ok(UpdateOutcome::Updated),
            Err(e) => Err(self.degrade(state, registry, store, e)),
        }
    }

    /// Switch to built-in defaults and refresh the cache.
    pub fn restore_defaults(
        &self,
        state: &mut CacheState,
        registry: &CatalogServerRegistry,
        store: &mut dyn SettingsStore,
    ) -> CatalogResult<()> {
        state.shared_resource_type = SharedResourceType::UseBuiltInDefaults;
        self.do_cache_update(state, registry, store)
    }

    /// Apply a new library choice; the previous choice comes back if the update fails.
    pub fn apply_library_setup(
        &self,
        state: &mut CacheState,
        registry: &CatalogServerRegistry,
        store: &mut dyn SettingsStore,
        setup: LibrarySetup,
    ) -> CatalogResult<()> {
        let before = state.clone();
        let remote = setup.shared_resource_type == SharedResourceType::UseRemoteServer;
        let changed = state.shared_resource_type != setup.shared_resource_type
            || (remote && (state.server != setup.server || state.publisher != setup.publisher));

        state.shared_resource_type = setup.shared_resource_type;
        state.frequency = setup.frequency;
        if remote {
            state.server = setup.server;
            state.publisher = setup.publisher;
        }

        let result = if changed {
            self.do_cache_update(state, registry, store)
        } else {
            save_cache_state(store, state).map_err(Into::into)
        };

        if result.is_err() {
            *state = before;
            if let Err(save) = save_cache_state(store, state) {
                warn!(error = %save, "could not save restored settings");
            }
        }
        result
    }

    fn degrade(
        &self,
        state: &mut CacheState,
        registry: &CatalogServerRegistry,
        store: &mut dyn SettingsStore,
        err: CatalogError,
    ) -> CatalogError {
        warn!(error = %err, "configuration update failed, reverting to built-in defaults");
        if let Err(restore) = self.restore_defaults(state, registry, store) {
            error!(error = %restore, "could not restore built-in defaults");
        }
        err
    }

    fn fill(
        &self,
        state: &CacheState,
        registry: &CatalogServerRegistry,
        folder: &Path,
    ) -> CatalogResult<ResolvedPaths> {
        let profile = &self.ctx.profile;
        match state.shared_resource_type {
            SharedResourceType::UseBuiltInDefaults => Ok(ResolvedPaths {
                master_library_cache: profile.default_master_library.clone(),
                template_folder_cache: profile.default_template_folder.clone(),
                master_library_url: profile.default_master_library.display().to_string(),
            }),
            SharedResourceType::UseRemoteServer => {
                let server = registry.require(&state.server)?;
                server.populate_catalog(&self.ctx, &state.publisher, folder)?;
                let url = server.get_master_library_url(&self.ctx, &state.publisher)?;
                let master_library_cache = if url.is_empty() {
                    PathBuf::new()
                } else {
                    profile.cached_master_library(folder)
                };
                Ok(ResolvedPaths {
                    master_library_cache,
                    template_folder_cache: profile.cached_template_folder(folder),
                    master_library_url: url,
                })
            }
        }
    }

    fn lock_cache(&self) -> CatalogResult<File> {
        let profile = &self.ctx.profile;
        fs::create_dir_all(&profile.cache_root)?;
        let lock = File::create(profile.lock_path())?;
        lock.lock_exclusive()?;
        Ok(lock)
    }
}

impl std::fmt::Debug for CacheSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheSynchronizer")
            .field("ctx", &self.ctx)
            .field("swap", &self.swap)
            .finish_non_exhaustive()
    }
}
