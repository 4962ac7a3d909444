//! Built-in SHA-256 manifest checksums
//!
//! A manifest sidecar has one line per file:
//!
//! ```text
//! 3a7bd3e2360a3d29eea436fcfb7e44c735d117c42d1c1835420b6b9942dd4f1b  WSDOT.lbr
//! 9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08  Girders/I-Beam.pgt
//! ```
//!
//! Paths are relative to the target folder (or the bare file name for a
//! file target) and always use `/`. Lines starting with `#` or `%` are
//! ignored. A folder matches when the set of (path, digest) pairs is equal;
//! a file matches when its digest is listed.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;
use walkdir::WalkDir;

use crate::domain::ports::{ChecksumOutcome, ChecksumVerifier};
use crate::error::{CatalogError, CatalogResult};

type Manifest = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestChecksum;

impl ManifestChecksum {
    pub fn new() -> Self {
        Self
    }

    /// Write a manifest of `target` to `sidecar`, returning the number of files listed.
    pub fn generate(&self, target: &Path, sidecar: &Path) -> CatalogResult<usize> {
        self.generate_filtered(target, sidecar, |_| true)
    }

    /// Like `generate`, listing only folder entries accepted by `include`.
    pub fn generate_filtered(
        &self,
        target: &Path,
        sidecar: &Path,
        include: impl Fn(&Path) -> bool,
    ) -> CatalogResult<usize> {
        let mut manifest = digest_target(target)?;
        if target.is_dir() {
            manifest.retain(|path, _| include(Path::new(path)));
        }
        if manifest.is_empty() {
            return Err(CatalogError::FileNotFound {
                location: target.display().to_string(),
            });
        }
        let mut content = String::new();
        for (path, digest) in &manifest {
            content.push_str(&format!("{digest}  {path}\n"));
        }
        if let Some(parent) = sidecar.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(sidecar, content)?;
        Ok(manifest.len())
    }
}

impl ChecksumVerifier for ManifestChecksum {
    fn compare(&self, sidecar: &Path, target: &Path) -> CatalogResult<ChecksumOutcome> {
        if !target.exists() {
            return Ok(ChecksumOutcome::Mismatch);
        }
        let expected = read_manifest(sidecar)?;

        // A cached file may be stored under a different name than the published one.
        let matches = if target.is_file() {
            let digest = digest_file(target)?;
            expected.values().any(|d| *d == digest)
        } else {
            let actual = digest_target(target)?;
            !actual.is_empty() && expected == actual
        };

        if matches {
            Ok(ChecksumOutcome::Match)
        } else {
            debug!(
                sidecar = %sidecar.display(),
                target = %target.display(),
                entries = expected.len(),
                "checksum mismatch"
            );
            Ok(ChecksumOutcome::Mismatch)
        }
    }
}

fn read_manifest(sidecar: &Path) -> CatalogResult<Manifest> {
    let content = fs::read_to_string(sidecar).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CatalogError::FileNotFound {
            location: sidecar.display().to_string(),
        },
        _ => CatalogError::Io(e),
    })?;

    let mut manifest = Manifest::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('%') {
            continue;
        }
        if let Some((digest, path)) = line.split_once(char::is_whitespace) {
            manifest.insert(
                normalize(path.trim_start_matches([' ', '\t', '*'])),
                digest.to_ascii_lowercase(),
            );
        }
    }
    Ok(manifest)
}

fn digest_target(target: &Path) -> CatalogResult<Manifest> {
    let mut manifest = Manifest::new();
    if target.is_file() {
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        manifest.insert(name, digest_file(target)?);
        return Ok(manifest);
    }

    for entry in WalkDir::new(target).sort_by_file_name() {
        let entry = entry.map_err(|e| CatalogError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(target)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .into_owned();
        manifest.insert(normalize(&relative), digest_file(entry.path())?);
    }
    Ok(manifest)
}

fn digest_file(path: &Path) -> CatalogResult<String> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

fn normalize(path: &str) -> String {
    path.replace('\\', "/").trim_start_matches("./").to_string()
}
