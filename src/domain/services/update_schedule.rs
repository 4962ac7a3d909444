//! When the cache should be checked against its server

use chrono::{DateTime, Utc};

use crate::domain::entities::CacheState;
use crate::domain::value_objects::{SharedResourceType, UpdateFrequency};

/// Earliest time a periodic policy allows the next check.
///
/// `None` for Never/Always. A cache that was never updated is due
/// immediately (the Unix epoch is used as its last update).
pub fn next_update_due(
    frequency: UpdateFrequency,
    last_update: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    let interval = frequency.interval()?;
    let last = last_update.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    Some(last.checked_add_signed(interval).unwrap_or(DateTime::<Utc>::MAX_UTC))
}

pub fn is_time_to_update_cache(state: &CacheState, now: DateTime<Utc>) -> bool {
    if state.shared_resource_type == SharedResourceType::UseBuiltInDefaults {
        return false;
    }

    match state.frequency {
        UpdateFrequency::Never => false,
        UpdateFrequency::Always => true,
        periodic => next_update_due(periodic, state.last_update).is_some_and(|due| due <= now),
    }
}
