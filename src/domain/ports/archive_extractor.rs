//! ArchiveExtractor port - unpack a bundle archive into a folder

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("error opening archive {path}: {message}")]
    Open { path: String, message: String },

    #[error("error extracting files: {message}")]
    Extract { message: String },

    #[error("no files were found in archive {path}")]
    Empty { path: String },
}

pub trait ArchiveExtractor: Send + Sync {
    /// Extract every entry of `archive` below `dest`, returning the number of files written.
    fn extract(&self, archive: &Path, dest: &Path) -> Result<usize, ExtractError>;
}
