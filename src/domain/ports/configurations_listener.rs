//! Consumer of the "available configurations" view
//!
//! Notified after the cache has been successfully repopulated so it can
//! rescan templates (the host application's File | New list).

use crate::domain::entities::CacheState;

pub trait ConfigurationsListener {
    fn configurations_changed(&self, state: &CacheState);
}

/// Listener for hosts without a configurations view.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl ConfigurationsListener for NoopListener {
    fn configurations_changed(&self, _state: &CacheState) {}
}
