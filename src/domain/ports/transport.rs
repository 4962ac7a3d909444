//! Transport port - fetch bytes and list folders at a location
//!
//! Locations are URLs for network transports and plain paths for the
//! local file system. Implementations:
//! - `FtpTransport` - anonymous FTP
//! - `HttpTransport` - HTTP(S) with a single redirect
//! - `FileTransport` - local or mounted file system
//! - `MemoryTransport` - in-memory for testing

use std::path::Path;

use thiserror::Error;

pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid location: {message}")]
    InvalidUrl { message: String },

    #[error("not found")]
    NotFound,

    #[error("connection failed: {message}")]
    Connection { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder,
}

/// One child of a listed folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl RemoteEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn folder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Folder,
        }
    }
}

pub trait Transport: Send + Sync {
    /// Read the whole resource at `location`
    fn fetch(&self, location: &str) -> TransportResult<Vec<u8>>;

    /// List the immediate children of the folder at `location`
    fn list(&self, folder: &str) -> TransportResult<Vec<RemoteEntry>>;

    /// Download `location` into the local file `dest`
    fn fetch_to(&self, location: &str, dest: &Path) -> TransportResult<()> {
        let bytes = self.fetch(location)?;
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(dest, bytes)?;
        Ok(())
    }

    /// Probe for existence. Connection failures are errors, absence is `false`.
    fn exists(&self, location: &str) -> TransportResult<bool> {
        match self.fetch(location) {
            Ok(_) => Ok(true),
            Err(TransportError::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
