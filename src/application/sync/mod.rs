//! Cache Synchronization
//!
//! Keeps the local configuration cache in step with the selected catalog
//! server.
//!
//! This module handles:
//! - Deciding whether a check is due under the update frequency
//! - Asking the server whether the cached content changed
//! - Replacing the cache with rollback on failure
//! - Persisting the cache state and upgrading old settings

mod migrate;
mod options;
mod result;
mod state_store;
mod swap;
mod use_case;


pub use migrate::{migrate_legacy_settings, MigrationReport, LOCAL_FILES_SERVER};
pub use options::{LibrarySetup, UpdateOptions};
pub use result::UpdateOutcome;
pub use state_store::{load_cache_state, save_cache_state};
pub use swap::{CacheSwap, SwapStrategy};
pub use use_case::CacheSynchronizer;
