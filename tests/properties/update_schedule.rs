//! Property tests for the cache update schedule.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use catsync::domain::entities::{AppProfile, CacheState};
use catsync::domain::services::is_time_to_update_cache;
use catsync::domain::value_objects::{CatalogVersion, SharedResourceType, UpdateFrequency};

fn remote_state(frequency: UpdateFrequency, last_update: Option<DateTime<Utc>>) -> CacheState {
    let profile = AppProfile::new(
        "PGSuper",
        CatalogVersion::new(8, 0, 0),
        Path::new("/opt/pgsuper"),
        PathBuf::from("/tmp/cache"),
    );
    let mut state = CacheState::built_in(&profile);
    state.shared_resource_type = SharedResourceType::UseRemoteServer;
    state.frequency = frequency;
    state.last_update = last_update;
    state
}

fn frequency() -> impl Strategy<Value = UpdateFrequency> {
    prop::sample::select(UpdateFrequency::ALL.to_vec())
}

fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    // 2001 .. 2033
    (1_000_000_000i64..2_000_000_000).prop_map(|s| Utc.timestamp_opt(s, 0).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: once a check is due it stays due as time passes.
    #[test]
    fn property_due_is_monotonic(
        freq in frequency(),
        last in instant(),
        now in instant(),
        later_secs in 0i64..100_000_000
    ) {
        let state = remote_state(freq, Some(last));
        if is_time_to_update_cache(&state, now) {
            prop_assert!(is_time_to_update_cache(&state, now + Duration::seconds(later_secs)));
        }
    }

    /// PROPERTY: Never is never due, Always is always due, built-in defaults are never due.
    #[test]
    fn property_fixed_policies(last in proptest::option::of(instant()), now in instant()) {
        prop_assert!(!is_time_to_update_cache(&remote_state(UpdateFrequency::Never, last), now));
        prop_assert!(is_time_to_update_cache(&remote_state(UpdateFrequency::Always, last), now));

        let mut built_in = remote_state(UpdateFrequency::Always, last);
        built_in.shared_resource_type = SharedResourceType::UseBuiltInDefaults;
        prop_assert!(!is_time_to_update_cache(&built_in, now));
    }

    /// PROPERTY: a periodic cache is due exactly when its interval has elapsed.
    #[test]
    fn property_periodic_threshold(
        freq in prop::sample::select(vec![
            UpdateFrequency::Daily,
            UpdateFrequency::Weekly,
            UpdateFrequency::Monthly,
        ]),
        last in instant(),
        offset in -1_000_000i64..1_000_000
    ) {
        let interval = freq.interval().unwrap();
        let now = last + interval + Duration::seconds(offset);
        let state = remote_state(freq, Some(last));
        prop_assert_eq!(is_time_to_update_cache(&state, now), offset >= 0);
    }

    /// PROPERTY: a cache that was never updated is due under every periodic policy.
    #[test]
    fn property_never_updated_is_due(now in instant()) {
        for freq in [UpdateFrequency::Daily, UpdateFrequency::Weekly, UpdateFrequency::Monthly] {
            prop_assert!(is_time_to_update_cache(&remote_state(freq, None), now));
        }
    }
}
