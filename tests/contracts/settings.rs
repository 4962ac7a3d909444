//! Persisted settings contracts
//!
//! The settings file layout is read by older releases too; its shape is
//! pinned with inline snapshots.

use std::fs;

use chrono::{TimeZone, Utc};

use catsync::application::sync::save_cache_state;
use catsync::domain::value_objects::{SharedResourceType, UpdateFrequency};

use crate::common::*;

#[test]
fn contract_cache_state_layout() {
    let env = TestEnv::new();
    let (mut store, _, mut state) = env.load();
    state.shared_resource_type = SharedResourceType::UseRemoteServer;
    state.frequency = UpdateFrequency::Weekly;
    state.server = "WSDOT".into();
    state.publisher = "Acme".into();
    state.master_library_cache = "/cache/Cache/WSDOT.lbr".into();
    state.template_folder_cache = "/cache/Cache/WorkgroupTemplates".into();
    state.master_library_url = "ftp://ftp.acme.example/WSDOT.lbr".into();
    state.last_update = Some(Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap());

    save_cache_state(&mut store, &state).unwrap();

    let saved = fs::read_to_string(env.settings_path()).unwrap();
    insta::assert_snapshot!(saved, @r###"
    [Options]
    CatalogServer = "WSDOT"
    MasterLibraryCache = "/cache/Cache/WSDOT.lbr"
    MasterLibraryURL = "ftp://ftp.acme.example/WSDOT.lbr"
    Publisher = "Acme"
    WorkgroupTemplatesCache = "/cache/Cache/WorkgroupTemplates"

    [Settings]
    CacheUpdateFrequency = "3"
    LastCacheUpdate = "1736928000"
    SharedResourceType = "1"
    "###);
}

#[test]
fn contract_state_round_trips_through_settings_file() {
    let env = TestEnv::new();
    let (mut store, _, mut state) = env.load();
    state.shared_resource_type = SharedResourceType::UseRemoteServer;
    state.frequency = UpdateFrequency::Monthly;
    state.server = "Office".into();
    state.publisher = "Acme".into();
    state.last_update = Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap());
    save_cache_state(&mut store, &state).unwrap();

    let (_, _, reloaded) = env.load();
    assert_eq!(reloaded, state);
}
