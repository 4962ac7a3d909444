//! In-memory transport for tests
//!
//! Resources are keyed by their full location string. Folders exist
//! implicitly whenever a resource lives below them.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::domain::ports::{RemoteEntry, Transport, TransportError, TransportResult};

#[derive(Debug, Default)]
pub struct MemoryTransport {
    resources: Mutex<BTreeMap<String, Vec<u8>>>,
    fetches: Mutex<HashMap<String, usize>>,
    offline: AtomicBool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, location: impl Into<String>, content: impl AsRef<[u8]>) {
        self.resources
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(location.into(), content.as_ref().to_vec());
    }

    pub fn remove(&self, location: &str) {
        self.resources
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(location);
    }

    /// Make every call fail with a connection error.
    pub fn fail_connections(&self, offline: bool) {
        self.offline.store(offline, Ordering::Relaxed);
    }

    /// Number of `fetch` calls made for `location`
    pub fn fetch_count(&self, location: &str) -> usize {
        self.fetches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(location)
            .copied()
            .unwrap_or(0)
    }

    /// Total `fetch` calls across all locations
    pub fn total_fetches(&self) -> usize {
        self.fetches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .sum()
    }

    fn check_online(&self) -> TransportResult<()> {
        if self.offline.load(Ordering::Relaxed) {
            return Err(TransportError::Connection {
                message: "memory transport is offline".to_string(),
            });
        }
        Ok(())
    }
}

fn folder_prefix(folder: &str) -> String {
    if folder.ends_with('/') || folder.ends_with('\\') {
        folder.to_string()
    } else {
        format!("{folder}/")
    }
}

impl Transport for MemoryTransport {
    fn fetch(&self, location: &str) -> TransportResult<Vec<u8>> {
        *self
            .fetches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(location.to_string())
            .or_default() += 1;
        self.check_online()?;

        self.resources
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(location)
            .cloned()
            .ok_or(TransportError::NotFound)
    }

    fn list(&self, folder: &str) -> TransportResult<Vec<RemoteEntry>> {
        self.check_online()?;
        let prefix = folder_prefix(folder);
        let resources = self.resources.lock().unwrap_or_else(PoisonError::into_inner);

        let mut files = Vec::new();
        let mut folders = BTreeSet::new();
        for key in resources.keys() {
            let Some(rest) = key.strip_prefix(&prefix) else {
                continue;
            };
            match rest.split_once(['/', '\\']) {
                Some((child, _)) => {
                    folders.insert(child.to_string());
                }
                None => files.push(RemoteEntry::file(rest)),
            }
        }

        if files.is_empty() && folders.is_empty() {
            return Err(TransportError::NotFound);
        }
        files.extend(folders.into_iter().map(RemoteEntry::folder));
        Ok(files)
    }

    fn exists(&self, location: &str) -> TransportResult<bool> {
        self.check_online()?;
        let prefix = folder_prefix(location);
        let resources = self.resources.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(resources.contains_key(location) || resources.keys().any(|k| k.starts_with(&prefix)))
    }
}
