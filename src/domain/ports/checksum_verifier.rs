//! ChecksumVerifier port - compare a checksum sidecar against local content
//!
//! The sidecar format belongs to the implementation; callers only hand
//! over the two paths.

use std::path::Path;

use crate::error::CatalogResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumOutcome {
    Match,
    Mismatch,
}

impl ChecksumOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, ChecksumOutcome::Match)
    }
}

pub trait ChecksumVerifier: Send + Sync {
    /// Compare `sidecar` with the file or folder at `target`.
    ///
    /// A missing target is a mismatch, not an error.
    fn compare(&self, sidecar: &Path, target: &Path) -> CatalogResult<ChecksumOutcome>;
}
