//! Cache replacement contracts
//!
//! A failed cache update must leave the previous cache exactly as it was
//! and must not touch the recorded paths or timestamp.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use catsync::application::sync::{LibrarySetup, SwapStrategy};
use catsync::catalog::{decode_creation_string, CatalogServer};
use catsync::domain::ports::SettingsStore;
use catsync::domain::value_objects::{SharedResourceType, UpdateFrequency};
use catsync::infrastructure::MemorySettingsStore;

use crate::common::*;

fn snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            (
                e.path().strip_prefix(root).unwrap().display().to_string(),
                fs::read(e.path()).unwrap(),
            )
        })
        .collect()
}

fn local_catalog() -> TestCatalog {
    TestCatalog::builder()
        .with_library("library v1")
        .with_template("Slab.pgt", "slab v1")
        .with_template("Girders/I-Beam.pgt", "ibeam v1")
        .with_sidecars()
        .build()
}

fn server_for(catalog: &TestCatalog) -> CatalogServer {
    let decoded = decode_creation_string(&catalog.file_system_creation()).unwrap();
    CatalogServer::new("Local", decoded.kind)
}

mod failed_update_is_invisible {
    use super::*;

    fn run(strategy: SwapStrategy) {
        let env = TestEnv::new();
        let catalog = local_catalog();
        let sync = env.synchronizer().with_swap_strategy(strategy);
        let (mut store, mut registry, mut state) = env.load();
        registry.add(server_for(&catalog));

        sync.apply_library_setup(
            &mut state,
            &registry,
            &mut store,
            LibrarySetup::remote("Local", "Local", UpdateFrequency::Daily),
        )
        .unwrap();
        let live = sync.live_folder();
        let before = snapshot(&live);
        let state_before = state.clone();
        assert!(!before.is_empty());

        // the library disappears from the server
        fs::remove_file(catalog.library()).unwrap();
        let err = sync.do_cache_update(&mut state, &registry, &mut store);

        assert!(err.is_err());
        assert_eq!(sync.live_folder(), live);
        assert_eq!(snapshot(&live), before, "cache content changed");
        assert_eq!(state, state_before, "cache state changed");
    }

    #[test]
    fn contract_rename_backup_restores_previous_cache() {
        run(SwapStrategy::RenameBackup);
    }

    #[test]
    fn contract_versioned_pointer_keeps_previous_cache() {
        run(SwapStrategy::VersionedPointer);
    }
}

mod first_failed_update {
    use super::*;

    fn run(strategy: SwapStrategy) {
        let env = TestEnv::new();
        let catalog = local_catalog();
        fs::remove_file(catalog.library()).unwrap();
        let sync = env.synchronizer().with_swap_strategy(strategy);
        let (mut store, mut registry, mut state) = env.load();
        registry.add(server_for(&catalog));
        state.shared_resource_type = SharedResourceType::UseRemoteServer;
        state.server = "Local".into();
        state.publisher = "Local".into();
        let state_before = state.clone();

        let result = sync.do_cache_update(&mut state, &registry, &mut store);

        assert!(result.is_err());
        assert_eq!(state, state_before);
        assert!(!env.cache_root().join("Cache").exists(), "live folder was created");
        assert!(!env.cache_root().join("Cache_Save").exists());
        assert!(snapshot(&env.cache_root().join("versions")).is_empty());
    }

    #[test]
    fn contract_rename_backup_leaves_no_cache_behind() {
        run(SwapStrategy::RenameBackup);
    }

    #[test]
    fn contract_versioned_pointer_leaves_no_cache_behind() {
        run(SwapStrategy::VersionedPointer);
    }
}

mod unsaved_update_is_invisible {
    use super::*;

    #[test]
    fn contract_settings_write_failure_keeps_state_and_cache() {
        let env = TestEnv::new();
        let catalog = local_catalog();
        let sync = env.synchronizer();
        let (_, mut registry, mut state) = env.load();
        registry.add(server_for(&catalog));
        let mut store = MemorySettingsStore::new();
        store.fail_flushes(true);
        let before = state.clone();

        let result = sync.apply_library_setup(
            &mut state,
            &registry,
            &mut store,
            LibrarySetup::remote("Local", "Local", UpdateFrequency::Weekly),
        );

        assert!(result.is_err());
        assert_eq!(state, before);
        assert!(!sync.live_folder().join("WSDOT.lbr").exists());
        assert_eq!(store.get("Settings", "SharedResourceType").as_deref(), Some("0"));
        assert_eq!(store.get("Options", "CatalogServer").as_deref(), Some(""));
    }

    #[test]
    fn contract_settings_write_failure_restores_previous_cache() {
        let env = TestEnv::new();
        let catalog = local_catalog();
        let sync = env.synchronizer();
        let (mut store, mut registry, mut state) = env.load();
        registry.add(server_for(&catalog));
        sync.apply_library_setup(
            &mut state,
            &registry,
            &mut store,
            LibrarySetup::remote("Local", "Local", UpdateFrequency::Daily),
        )
        .unwrap();
        let live = sync.live_folder();
        let before = snapshot(&live);
        let state_before = state.clone();

        catalog.republish("WSDOT.lbr", "library v2");
        let mut read_only = MemorySettingsStore::new();
        read_only.fail_flushes(true);
        let result = sync.do_cache_update(&mut state, &registry, &mut read_only);

        assert!(result.is_err());
        assert_eq!(state, state_before);
        assert_eq!(snapshot(&live), before);
    }
}

mod failed_setup_reverts_choice {
    use super::*;

    #[test]
    fn contract_unknown_publisher_keeps_previous_choice() {
        let env = TestEnv::new();
        let catalog = TestCatalog::builder()
            .with_bundle("PGSuper.pgz", &[("WSDOT.lbr", "bundle library")])
            .with_descriptor(
                "PGSuperPackages.ini",
                "[Acme]\nFormat=pgz\nVersion_8.0_PgzFiles={root}/bundles/PGSuper.pgz\n",
            )
            .build();
        let sync = env.synchronizer();
        let (mut store, mut registry, mut state) = env.load();
        let decoded = decode_creation_string(&catalog.ini_creation()).unwrap();
        registry.add(CatalogServer::new("Office", decoded.kind));

        let before = state.clone();
        let result = sync.apply_library_setup(
            &mut state,
            &registry,
            &mut store,
            LibrarySetup::remote("Office", "Nobody", UpdateFrequency::Weekly),
        );

        assert!(result.is_err());
        assert_eq!(state, before);
        assert_eq!(
            state.shared_resource_type,
            SharedResourceType::UseBuiltInDefaults
        );

        // the reverted choice is what a new process sees
        let (_, _, reloaded) = env.load();
        assert_eq!(reloaded.shared_resource_type, before.shared_resource_type);
        assert_eq!(reloaded.frequency, before.frequency);
    }
}
