//! All-or-nothing replacement of the cache folder
//!
//! Two strategies:
//!
//! - `RenameBackup`: move `Cache` aside to `Cache_Save`, fill a fresh
//!   `Cache`, and move the backup back if anything fails.
//! - `VersionedPointer`: fill `versions/<stamp>/` and switch the one-line
//!   `CURRENT` pointer file once the new content is complete.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::entities::AppProfile;
use crate::infrastructure::fs::LocalFs;

const VERSIONS_FOLDER: &str = "versions";
const POINTER_FILE: &str = "CURRENT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SwapStrategy {
    #[default]
    RenameBackup,
    VersionedPointer,
}

impl SwapStrategy {
    /// Folder readers should currently use.
    pub fn live_folder(&self, profile: &AppProfile) -> PathBuf {
        match self {
            SwapStrategy::RenameBackup => profile.live_folder(),
            SwapStrategy::VersionedPointer => {
                read_pointer(&profile.cache_root).unwrap_or_else(|| profile.live_folder())
            }
        }
    }

    /// Set aside the current content and prepare an empty working folder.
    pub fn begin(&self, profile: &AppProfile, fs: LocalFs) -> io::Result<CacheSwap> {
        match self {
            SwapStrategy::RenameBackup => begin_rename(profile, fs),
            SwapStrategy::VersionedPointer => begin_versioned(profile, fs),
        }
    }
}

/// An update in progress. Finish with `commit` or `rollback`.
#[derive(Debug)]
pub struct CacheSwap {
    fs: LocalFs,
    working: PathBuf,
    state: SwapState,
}

#[derive(Debug)]
enum SwapState {
    Renamed { prior: PriorCache },
    Versioned { root: PathBuf, previous: Option<PathBuf> },
}

/// What happened to the live folder when a rename swap began
#[derive(Debug)]
enum PriorCache {
    /// Moved aside to this backup folder
    Moved(PathBuf),
    /// Could not be moved; its contents were deleted in place
    WipedInPlace,
    /// There was no live folder
    Absent,
}

impl CacheSwap {
    /// Folder to populate. Becomes the live folder on commit.
    pub fn working_folder(&self) -> &Path {
        &self.working
    }

    /// Make the working folder live and discard the previous content.
    pub fn commit(self) -> io::Result<PathBuf> {
        match self.state {
            SwapState::Renamed { prior } => {
                if let PriorCache::Moved(backup) = prior {
                    if let Err(e) = self.fs.remove_dir_if_exists(&backup) {
                        warn!(backup = %backup.display(), error = %e, "could not delete cache backup");
                    }
                }
            }
            SwapState::Versioned { root, previous } => {
                let pointer = self.working.to_string_lossy().into_owned();
                if let Err(e) = self
                    .fs
                    .write_atomic(&root.join(POINTER_FILE), pointer.as_bytes())
                {
                    let _ = self.fs.remove_dir_if_exists(&self.working);
                    return Err(e);
                }
                if let Some(previous) = previous.filter(|p| *p != self.working) {
                    if let Err(e) = self.fs.remove_dir_if_exists(&previous) {
                        warn!(previous = %previous.display(), error = %e, "could not delete old cache version");
                    }
                }
            }
        }
        Ok(self.working)
    }

    /// Discard the working folder and put the previous content back.
    ///
    /// `Err` means the previous content could not be restored.
    pub fn rollback(self) -> io::Result<()> {
        self.fs.remove_dir_if_exists(&self.working)?;
        match self.state {
            SwapState::Renamed {
                prior: PriorCache::Moved(backup),
            } => {
                self.fs.rename(&backup, &self.working)?;
                debug!(live = %self.working.display(), "previous cache restored");
            }
            SwapState::Renamed {
                prior: PriorCache::WipedInPlace,
            } => {
                // only the empty folder can come back
                fs::create_dir_all(&self.working)?;
            }
            SwapState::Renamed {
                prior: PriorCache::Absent,
            }
            | SwapState::Versioned { .. } => {}
        }
        Ok(())
    }
}

fn begin_rename(profile: &AppProfile, fs: LocalFs) -> io::Result<CacheSwap> {
    begin_rename_with(profile, fs, |live| fs.create_hidden_dir(live))
}

fn begin_rename_with(
    profile: &AppProfile,
    fs: LocalFs,
    create_live: impl FnOnce(&Path) -> io::Result<()>,
) -> io::Result<CacheSwap> {
    let live = profile.live_folder();
    let backup = profile.backup_folder();

    fs.remove_dir_if_exists(&backup)?;

    let prior = if live.exists() {
        match fs.rename(&live, &backup) {
            Ok(()) => PriorCache::Moved(backup),
            Err(e) => {
                warn!(
                    live = %live.display(),
                    error = %e,
                    "could not move cache aside, clearing it in place without rollback"
                );
                fs.wipe_contents(&live)?;
                PriorCache::WipedInPlace
            }
        }
    } else {
        PriorCache::Absent
    };

    if let Err(e) = create_live(&live) {
        if let PriorCache::Moved(backup) = &prior {
            if let Err(restore) = fs.rename(backup, &live) {
                warn!(
                    backup = %backup.display(),
                    error = %restore,
                    "could not put the previous cache back"
                );
            }
        }
        return Err(e);
    }

    Ok(CacheSwap {
        fs,
        working: live,
        state: SwapState::Renamed { prior },
    })
}

fn begin_versioned(profile: &AppProfile, fs: LocalFs) -> io::Result<CacheSwap> {
    let root = profile.cache_root.clone();
    let previous = read_pointer(&root);

    let versions = root.join(VERSIONS_FOLDER);
    let stamp = Utc::now().format("%Y%m%dT%H%M%S%.f").to_string();
    let mut working = versions.join(&stamp);
    let mut suffix = 1;
    while working.exists() {
        working = versions.join(format!("{stamp}-{suffix}"));
        suffix += 1;
    }
    fs.create_hidden_dir(&working)?;

    Ok(CacheSwap {
        fs,
        working,
        state: SwapState::Versioned { root, previous },
    })
}

fn read_pointer(root: &Path) -> Option<PathBuf> {
    let content = fs::read_to_string(root.join(POINTER_FILE)).ok()?;
    let target = PathBuf::from(content.trim());
    (!content.trim().is_empty() && target.is_dir()).then_some(target)
}
