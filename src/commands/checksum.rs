//! `catsync checksum` handler
//!
//! Publishing helper: writes the sidecar a catalog server serves next to a
//! library file or template folder.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::json;

use catsync::catalog::{SIDECAR_EXTENSION, TEMPLATE_FOLDER_SIDECAR};
use catsync::config::Config;
use catsync::infrastructure::ManifestChecksum;
use catsync::presentation::output::print_json;
use catsync::presentation::OutputFormat;

pub fn cmd_checksum(
    config: &Config,
    target: &Path,
    sidecar: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let checksum = ManifestChecksum::new();
    let sidecar = sidecar
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_sidecar(target));

    let count = if target.is_dir() {
        let profile = config.app_profile()?;
        checksum.generate_filtered(target, &sidecar, |p| profile.is_template_file(p))
    } else {
        checksum.generate(target, &sidecar)
    }
    .with_context(|| format!("could not checksum {}", target.display()))?;

    match format {
        OutputFormat::Json => print_json(&json!({
            "type": "checksum",
            "target": target,
            "sidecar": sidecar,
            "files": count,
        })),
        OutputFormat::Text => println!(
            "Wrote {} ({count} file{})",
            sidecar.display(),
            if count == 1 { "" } else { "s" }
        ),
    }
    Ok(())
}

/// `<folder>/WorkgroupTemplates.md5` for folders, `<file>.md5` for files.
fn default_sidecar(target: &Path) -> PathBuf {
    if target.is_dir() {
        target.join(TEMPLATE_FOLDER_SIDECAR)
    } else {
        let mut name = target.as_os_str().to_os_string();
        name.push(SIDECAR_EXTENSION);
        PathBuf::from(name)
    }
}
