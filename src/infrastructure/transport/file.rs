//! Local or mounted file system transport

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::domain::ports::{RemoteEntry, Transport, TransportError, TransportResult};

/// Plain file copies. Locations are paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTransport;

impl FileTransport {
    pub fn new() -> Self {
        Self
    }
}

fn classify(err: std::io::Error) -> TransportError {
    if err.kind() == ErrorKind::NotFound {
        TransportError::NotFound
    } else {
        TransportError::Io(err)
    }
}

impl Transport for FileTransport {
    fn fetch(&self, location: &str) -> TransportResult<Vec<u8>> {
        fs::read(location).map_err(classify)
    }

    fn list(&self, folder: &str) -> TransportResult<Vec<RemoteEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(folder).map_err(classify)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type()?.is_dir() {
                entries.push(RemoteEntry::folder(name));
            } else {
                entries.push(RemoteEntry::file(name));
            }
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn fetch_to(&self, location: &str, dest: &Path) -> TransportResult<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(location, dest).map_err(classify)?;
        Ok(())
    }

    fn exists(&self, location: &str) -> TransportResult<bool> {
        Ok(Path::new(location).exists())
    }
}
