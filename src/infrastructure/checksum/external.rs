//! External md5deep-compatible checksum program
//!
//! Runs `<tool> -x <sidecar> [-r] <target>`. In negative-match mode the tool
//! prints every file whose digest is not in the sidecar, so a clean exit with
//! no output is a match.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::domain::ports::{ChecksumOutcome, ChecksumVerifier};
use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone)]
pub struct ExternalChecksum {
    tool: PathBuf,
}

impl ExternalChecksum {
    pub fn new(tool: impl Into<PathBuf>) -> Self {
        Self { tool: tool.into() }
    }

    pub fn tool(&self) -> &Path {
        &self.tool
    }
}

impl ChecksumVerifier for ExternalChecksum {
    fn compare(&self, sidecar: &Path, target: &Path) -> CatalogResult<ChecksumOutcome> {
        if !target.exists() {
            return Ok(ChecksumOutcome::Mismatch);
        }

        let mut command = Command::new(&self.tool);
        command.arg("-x").arg(sidecar);
        if target.is_dir() {
            command.arg("-r");
        }
        command.arg(target);

        let output = command.output().map_err(|e| match e.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => CatalogError::MissingChecksumTool {
                tool: self.tool.clone(),
            },
            _ => CatalogError::Io(e),
        })?;

        let unmatched = String::from_utf8_lossy(&output.stdout);
        debug!(
            tool = %self.tool.display(),
            status = ?output.status.code(),
            unmatched = unmatched.lines().count(),
            "external checksum finished"
        );

        if output.status.success() && unmatched.trim().is_empty() {
            Ok(ChecksumOutcome::Match)
        } else {
            Ok(ChecksumOutcome::Mismatch)
        }
    }
}
