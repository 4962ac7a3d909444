//! A team publishes its library and templates on a shared folder.

use std::fs;

use crate::common::*;

fn team_catalog() -> TestCatalog {
    TestCatalog::builder()
        .with_library("team library v1")
        .with_template("Slab.pgt", "slab v1")
        .with_template("Girders/I-Beam.pgt", "ibeam v1")
        .with_template("README.txt", "not a template")
        .with_sidecars()
        .build()
}

#[test]
fn scenario_select_check_and_refresh_shared_folder() {
    let cli = CliEnv::new();
    let catalog = team_catalog();

    let added = cli.run(&["servers", "add", "Team", &catalog.file_system_creation()]);
    assert!(added.success, "{}", added.stderr);

    let publishers = cli.run_json(&["publishers", "Team"]);
    assert_eq!(publishers["publishers"][0]["name"], "Team");

    let used = cli.run(&["use", "Team", "Team", "--frequency", "always"]);
    assert!(used.success, "{}", used.stderr);

    let live = cli.env.cache_root().join("Cache");
    assert_eq!(
        fs::read_to_string(live.join("WSDOT.lbr")).unwrap(),
        "team library v1"
    );
    assert!(live.join("WorkgroupTemplates/Girders/I-Beam.pgt").exists());
    assert!(!live.join("WorkgroupTemplates/README.txt").exists());

    let check = cli.run_json(&["check"]);
    assert_eq!(check["due"], true);
    assert_eq!(check["pending"], false);

    let update = cli.run_json(&["update", "--yes"]);
    assert_eq!(update["outcome"], "up-to-date");

    catalog.republish("Templates/Slab.pgt", "slab v2");
    let check = cli.run_json(&["check"]);
    assert_eq!(check["pending"], true);

    let update = cli.run_json(&["update", "--yes"]);
    assert_eq!(update["outcome"], "updated");
    assert_eq!(
        fs::read_to_string(live.join("WorkgroupTemplates/Slab.pgt")).unwrap(),
        "slab v2"
    );
    assert!(!cli.env.cache_root().join("Cache_Save").exists());
}

#[test]
fn scenario_update_without_yes_is_declined_when_not_interactive() {
    let cli = CliEnv::new();
    let catalog = team_catalog();
    cli.run(&["servers", "add", "Team", &catalog.file_system_creation()]);
    assert!(cli.run(&["use", "Team", "Team"]).success);

    catalog.republish("WSDOT.lbr", "team library v2");
    let result = cli.run(&["update", "--force"]);

    assert!(result.success, "{}", result.stderr);
    assert!(result.stderr.contains("--yes"));
    assert_eq!(
        fs::read_to_string(cli.env.cache_root().join("Cache/WSDOT.lbr")).unwrap(),
        "team library v1"
    );
}

#[test]
fn scenario_vanished_share_falls_back_to_defaults() {
    let cli = CliEnv::new();
    let catalog = team_catalog();
    cli.run(&["servers", "add", "Team", &catalog.file_system_creation()]);
    assert!(cli.run(&["use", "Team", "Team", "--frequency", "always"]).success);

    catalog.republish("WSDOT.lbr", "team library v2");
    fs::remove_dir_all(catalog.templates()).unwrap();
    let result = cli.run(&["update", "--yes"]);
    assert!(!result.success);

    let status = cli.run_json(&["status"]);
    assert_eq!(status["state"]["shared_resource_type"], "use-built-in-defaults");
}

#[test]
fn scenario_use_defaults_switches_back() {
    let cli = CliEnv::new();
    let catalog = team_catalog();
    cli.run(&["servers", "add", "Team", &catalog.file_system_creation()]);
    assert!(cli.run(&["use", "Team", "Team"]).success);

    let result = cli.run_json(&["use-defaults"]);
    assert_eq!(result["state"]["shared_resource_type"], "use-built-in-defaults");
    assert_eq!(result["state"]["server"], "Team");
}

#[test]
fn scenario_checksum_command_writes_template_manifest() {
    let cli = CliEnv::new();
    let catalog = TestCatalog::builder()
        .with_library("lib")
        .with_template("Slab.pgt", "slab")
        .with_template("notes.txt", "skip me")
        .build();

    let templates = catalog.templates();
    let result = cli.run_json(&["checksum", templates.to_str().unwrap()]);
    assert_eq!(result["files"], 1);

    let manifest = fs::read_to_string(templates.join("WorkgroupTemplates.md5")).unwrap();
    assert!(manifest.contains("Slab.pgt"));
    assert!(!manifest.contains("notes.txt"));
}
