//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `transport/` - FTP, HTTP, file system and in-memory transports
//! - `checksum/` - built-in manifest and external md5deep-style verifiers
//! - `archive` - tar+gzip bundle extraction
//! - `settings/` - TOML file and in-memory settings stores
//! - `fs/` - local folder helpers for the cache swap

pub mod archive;
pub mod checksum;
pub mod fs;
pub mod settings;
pub mod transport;

pub use archive::TarGzExtractor;
pub use checksum::{ExternalChecksum, ManifestChecksum};
pub use fs::LocalFs;
pub use settings::{MemorySettingsStore, TomlSettingsStore};
pub use transport::{FileTransport, FtpTransport, HttpTransport, MemoryTransport};
