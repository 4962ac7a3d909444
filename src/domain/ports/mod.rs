//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod archive_extractor;
pub mod checksum_verifier;
pub mod configurations_listener;
pub mod settings_store;
pub mod transport;

pub use archive_extractor::{ArchiveExtractor, ExtractError};
pub use checksum_verifier::{ChecksumOutcome, ChecksumVerifier};
pub use configurations_listener::{ConfigurationsListener, NoopListener};
pub use settings_store::{SettingsError, SettingsStore};
pub use transport::{EntryKind, RemoteEntry, Transport, TransportError, TransportResult};
