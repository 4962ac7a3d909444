//! Settings written by older releases are upgraded on first use.

use std::fs;

use crate::common::*;

#[test]
fn scenario_lettered_servers_and_local_folder_are_migrated() {
    let cli = CliEnv::new();
    let catalog = TestCatalog::builder()
        .with_library("old library")
        .with_template("Slab.pgt", "old slab")
        .build();

    fs::write(
        cli.env.settings_path(),
        format!(
            "[Options]\nUserFolder = {:?}\nMasterLibraryFileName = {:?}\n\n[Servers]\nCount = \"2\"\nA = \"Acme!ftp://ftp.acme.example/pgsuper/\"\nB = \"FTP|Mirror|ftp://mirror.example/\"\n",
            catalog.templates().display().to_string(),
            catalog.library().display().to_string(),
        ),
    )
    .unwrap();

    let servers = cli.run_json(&["servers", "list"]);
    let listed: Vec<(String, String)> = servers["servers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| {
            (
                s["name"].as_str().unwrap().to_string(),
                s["creation"].as_str().unwrap().to_string(),
            )
        })
        .collect();

    assert!(listed.contains(&("Acme".into(), "FTP|ftp://ftp.acme.example/pgsuper/".into())));
    assert!(listed.contains(&("Mirror".into(), "FTP|ftp://mirror.example/".into())));
    assert!(listed.contains(&(
        "Local Files".into(),
        catalog.file_system_creation()
    )));

    let saved = fs::read_to_string(cli.env.settings_path()).unwrap();
    assert!(!saved.contains("Count"));
    assert!(!saved.contains("UserFolder"));
    assert!(saved.contains("CatalogServer = \"Local Files\""));
}

#[test]
fn scenario_migrated_local_files_can_be_used() {
    let cli = CliEnv::new();
    let catalog = TestCatalog::builder()
        .with_library("old library")
        .with_template("Slab.pgt", "old slab")
        .build();
    fs::write(
        cli.env.settings_path(),
        format!(
            "[Options]\nUserFolder = {:?}\nMasterLibraryFileName = {:?}\n",
            catalog.templates().display().to_string(),
            catalog.library().display().to_string(),
        ),
    )
    .unwrap();

    let used = cli.run(&["use", "Local Files", "Local Files"]);
    assert!(used.success, "{}", used.stderr);
    assert_eq!(
        fs::read_to_string(cli.env.cache_root().join("Cache/WSDOT.lbr")).unwrap(),
        "old library"
    );
}
