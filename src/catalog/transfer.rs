//! Copying catalog resources into a cache folder

use std::path::Path;

use tracing::{debug, trace};

use super::url::join_location;
use crate::domain::entities::AppProfile;
use crate::domain::ports::{EntryKind, Transport, TransportError};
use crate::error::{CatalogError, CatalogResult};

/// Download one resource to `dest`, creating parent folders.
pub fn download_file(transport: &dyn Transport, location: &str, dest: &Path) -> CatalogResult<()> {
    trace!(%location, dest = %dest.display(), "downloading");
    transport
        .fetch_to(location, dest)
        .map_err(|e| CatalogError::from_transport(location, e))
}

/// Copy every template file below `folder` into `dest`, keeping subfolders.
///
/// Only files with the profile's template extension are copied. Returns
/// the number of files written.
pub fn download_templates(
    transport: &dyn Transport,
    folder: &str,
    dest: &Path,
    profile: &AppProfile,
) -> CatalogResult<usize> {
    let entries = transport.list(folder).map_err(|e| match e {
        TransportError::NotFound => CatalogError::FileNotFound {
            location: folder.to_string(),
        },
        other => CatalogError::from_transport(folder, other),
    })?;

    let mut copied = 0;
    for entry in entries {
        if entry.name == "." || entry.name == ".." || entry.name.is_empty() {
            continue;
        }
        let location = join_location(folder, &entry.name);
        let target = dest.join(&entry.name);
        match entry.kind {
            EntryKind::Folder => {
                std::fs::create_dir_all(&target)?;
                let sub = format!("{location}{}", separator_for(folder));
                copied += download_templates(transport, &sub, &target, profile)?;
            }
            EntryKind::File if profile.is_template_file(Path::new(&entry.name)) => {
                download_file(transport, &location, &target)?;
                copied += 1;
            }
            EntryKind::File => debug!(%location, "skipping non-template file"),
        }
    }
    Ok(copied)
}

fn separator_for(folder: &str) -> char {
    if folder.ends_with('\\') {
        '\\'
    } else {
        '/'
    }
}
