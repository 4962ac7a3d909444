//! A publisher distributes compressed bundles listed in a catalog descriptor.

use std::fs;

use crate::common::*;

const DESCRIPTOR: &str = "\
[Acme]
Format=pgz
WebLink=https://acme.example/bridge
Version_7.0_PgzFiles={root}/bundles/acme-7.pgz
Version_8.0_PgzFiles={root}/bundles/acme-8.pgz
Version_9.0_PgzFiles={root}/bundles/acme-9.pgz

[OldStyle]
Version_8.0_MasterLibrary={root}/WSDOT.lbr
Version_8.0_WorkgroupTemplates={root}/Templates

[TooNew]
Format=pgz
Version_10.0_PgzFiles={root}/bundles/acme-9.pgz
";

fn acme_catalog() -> TestCatalog {
    TestCatalog::builder()
        .with_library("legacy library")
        .with_template("Slab.pgt", "legacy slab")
        .with_bundle(
            "acme-7.pgz",
            &[("WSDOT.lbr", "acme 7"), ("WorkgroupTemplates/Slab.pgt", "slab 7")],
        )
        .with_bundle(
            "acme-8.pgz",
            &[
                ("WSDOT.lbr", "acme 8"),
                ("WorkgroupTemplates/Slab.pgt", "slab 8"),
                ("WorkgroupTemplates/Girders/I-Beam.pgt", "ibeam 8"),
            ],
        )
        .with_bundle(
            "acme-9.pgz",
            &[("WSDOT.lbr", "acme 9"), ("WorkgroupTemplates/Slab.pgt", "slab 9")],
        )
        .with_descriptor("PGSuperPackages.ini", DESCRIPTOR)
        .build()
}

#[test]
fn scenario_publishers_follow_application_version() {
    let cli = CliEnv::new();
    let catalog = acme_catalog();
    assert!(cli.run(&["servers", "add", "Acme", &catalog.ini_creation()]).success);

    let publishers = cli.run_json(&["publishers", "Acme"]);
    let names: Vec<&str> = publishers["publishers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Acme", "OldStyle"]);
    assert_eq!(
        publishers["publishers"][0]["web_link"],
        "https://acme.example/bridge"
    );
}

#[test]
fn scenario_bundle_is_downloaded_verified_and_extracted() {
    let cli = CliEnv::new();
    let catalog = acme_catalog();
    assert!(cli.run(&["servers", "add", "Acme", &catalog.ini_creation()]).success);

    let used = cli.run_json(&["use", "Acme", "Acme"]);
    let live = cli.env.cache_root().join("Cache");
    assert_eq!(fs::read_to_string(live.join("WSDOT.lbr")).unwrap(), "acme 8");
    assert_eq!(
        fs::read_to_string(live.join("WorkgroupTemplates/Girders/I-Beam.pgt")).unwrap(),
        "ibeam 8"
    );
    assert!(live.join("PGSuper.pgz").exists());
    assert_eq!(
        used["state"]["master_library_url"],
        catalog.bundle("acme-8.pgz").display().to_string()
    );

    let check = cli.run_json(&["check"]);
    assert_eq!(check["pending"], false);
}

#[test]
fn scenario_tampered_bundle_is_rejected() {
    let cli = CliEnv::new();
    let catalog = acme_catalog();
    assert!(cli.run(&["servers", "add", "Acme", &catalog.ini_creation()]).success);

    // the bundle no longer matches its published checksum
    fs::copy(catalog.bundle("acme-7.pgz"), catalog.bundle("acme-8.pgz")).unwrap();
    let result = cli.run(&["use", "Acme", "Acme"]);

    assert!(!result.success);
    assert!(result.stderr.contains("checksum"), "{}", result.stderr);
    let status = cli.run_json(&["status"]);
    assert_eq!(status["state"]["shared_resource_type"], "use-built-in-defaults");
}

#[test]
fn scenario_legacy_publisher_rejected_on_folder_catalog() {
    let cli = CliEnv::new();
    let catalog = acme_catalog();
    assert!(cli.run(&["servers", "add", "Acme", &catalog.ini_creation()]).success);

    let result = cli.run(&["use", "Acme", "OldStyle"]);
    assert!(!result.success);
    assert!(result.stderr.contains("only pgz compressed catalogs"), "{}", result.stderr);
}

#[test]
fn scenario_missing_descriptor_is_fetch_failure() {
    let cli = CliEnv::new();
    let empty = TestCatalog::builder().build();
    assert!(cli.run(&["servers", "add", "Empty", &empty.ini_creation()]).success);

    let result = cli.run(&["--json", "publishers", "Empty"]);
    assert!(!result.success);
    let error: serde_json::Value =
        serde_json::from_str(result.stdout.lines().last().unwrap()).unwrap();
    assert_eq!(error["kind"], "catalog_fetch_failure");
    assert_eq!(error["network"], false);
}
