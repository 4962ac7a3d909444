//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports) and the catalog servers
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `CacheSynchronizer` - update checks, cache population with rollback, library setup

pub mod sync;

pub use sync::{
    load_cache_state, migrate_legacy_settings, save_cache_state, CacheSynchronizer, LibrarySetup,
    MigrationReport, SwapStrategy, UpdateOptions, UpdateOutcome,
};
