//! catsync - configuration catalog and cache synchronization
//!
//! Engineering desktop applications ship a master library and a set of
//! project templates. catsync lets users point the application at a
//! catalog server (FTP, HTTP or a shared folder) instead, keeps a local
//! cache of the chosen publisher's configuration, and refreshes that cache
//! on a schedule with all-or-nothing replacement.

pub mod application;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

// Re-exports for convenience
pub use application::sync::{CacheSynchronizer, LibrarySetup, UpdateOptions, UpdateOutcome};
pub use catalog::{CatalogServer, CatalogServerRegistry, ServerContext, ServerKind};
pub use config::Config;
pub use domain::entities::{AppProfile, CacheState, Descriptor, PublisherEntry};
pub use error::{CatalogError, CatalogResult, FailureKind};
