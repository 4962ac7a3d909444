//! Local folder operations used by the cache swap

use std::fs;
use std::io::{self, Write};
use std::path::Path;

#[cfg(windows)]
use tracing::warn;

/// Folder-level helpers over the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }

    /// Recursively delete `path`. Absence is not an error.
    pub fn remove_dir_if_exists(&self, path: &Path) -> io::Result<()> {
        match fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Delete everything inside `path`, keeping the folder itself.
    pub fn wipe_contents(&self, path: &Path) -> io::Result<()> {
        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                fs::remove_dir_all(entry.path())?;
            } else {
                fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }

    pub fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    /// Create `path` and mark it hidden where the platform has such a flag.
    pub fn create_hidden_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)?;
        mark_hidden(path);
        Ok(())
    }

    /// Replace `path` with `content` via a sibling temp file and rename.
    pub fn write_atomic(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        fs::create_dir_all(parent)?;
        let mut temp = tempfile::NamedTempFile::new_in(parent)?;
        temp.write_all(content)?;
        temp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(windows)]
fn mark_hidden(path: &Path) {
    let status = std::process::Command::new("attrib")
        .arg("+h")
        .arg(path)
        .status();
    match status {
        Ok(s) if s.success() => {}
        Ok(s) => warn!(path = %path.display(), code = ?s.code(), "could not hide folder"),
        Err(e) => warn!(path = %path.display(), error = %e, "could not hide folder"),
    }
}

#[cfg(not(windows))]
fn mark_hidden(_path: &Path) {}
