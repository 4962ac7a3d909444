//! Bundle archives: gzip-compressed tar
//!
//! Entries are unpacked with `unpack_in`, which refuses paths that escape
//! the destination folder.

use std::fs::File;
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::debug;

use crate::domain::ports::{ArchiveExtractor, ExtractError};

#[derive(Debug, Clone, Copy, Default)]
pub struct TarGzExtractor;

impl TarGzExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ArchiveExtractor for TarGzExtractor {
    fn extract(&self, archive: &Path, dest: &Path) -> Result<usize, ExtractError> {
        let file = File::open(archive).map_err(|e| ExtractError::Open {
            path: archive.display().to_string(),
            message: e.to_string(),
        })?;
        let mut tar = tar::Archive::new(GzDecoder::new(file));
        let entries = tar.entries().map_err(|e| ExtractError::Open {
            path: archive.display().to_string(),
            message: e.to_string(),
        })?;

        let extract = |e: std::io::Error| ExtractError::Extract {
            message: e.to_string(),
        };

        let mut files = 0;
        for entry in entries {
            let mut entry = entry.map_err(extract)?;
            let is_file = entry.header().entry_type().is_file();
            let unpacked = entry.unpack_in(dest).map_err(extract)?;
            if is_file && unpacked {
                files += 1;
            }
        }

        if files == 0 {
            return Err(ExtractError::Empty {
                path: archive.display().to_string(),
            });
        }
        debug!(archive = %archive.display(), files, "archive extracted");
        Ok(files)
    }
}
