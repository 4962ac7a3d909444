//! A fresh install uses the bundled configuration and never goes online.

use crate::common::*;

#[test]
fn scenario_fresh_install_status_is_built_in() {
    let cli = CliEnv::new();

    let status = cli.run_json(&["status"]);
    assert_eq!(status["type"], "status");
    assert_eq!(status["state"]["shared_resource_type"], "use-built-in-defaults");
    assert_eq!(
        status["state"]["master_library_cache"],
        cli.env
            .install_dir()
            .join("Configurations")
            .join("WSDOT.lbr")
            .display()
            .to_string()
    );
}

#[test]
fn scenario_update_on_built_in_defaults_is_not_due() {
    let cli = CliEnv::new();

    // --force would reach the built-in servers if the defaults were not honored
    let update = cli.run_json(&["update", "--force", "--yes"]);
    assert_eq!(update["outcome"], "not-due");

    let check = cli.run_json(&["check"]);
    assert_eq!(check["due"], false);
    assert_eq!(check["pending"], false);
}

#[test]
fn scenario_built_in_servers_are_listed() {
    let cli = CliEnv::new();

    let result = cli.run(&["servers", "list"]);
    assert!(result.success, "{}", result.stderr);
    assert!(result.stdout.contains("WSDOT "));
    assert!(result
        .stdout
        .contains("ftp://ftp.wsdot.wa.gov/public/Bridge/Software/PGSuper/"));
    assert!(result.stdout.contains("WSDOT (HTTP)"));
}

#[test]
fn scenario_unknown_server_reports_hint() {
    let cli = CliEnv::new();

    let result = cli.run(&["servers", "test", "Nowhere"]);
    assert!(!result.success);
    assert!(result.stderr.contains("'Nowhere' is not defined"), "{}", result.stderr);
    assert!(result.stderr.contains("catsync servers list"));
}

#[test]
fn scenario_unknown_config_key_warns() {
    let cli = CliEnv::new();
    let mut config = std::fs::read_to_string(cli.config_path()).unwrap();
    config.push_str("\n[checksum]\ntol = \"builtin\"\n");
    std::fs::write(cli.config_path(), config).unwrap();

    let result = cli.run(&["status"]);
    assert!(result.success, "{}", result.stderr);
    assert!(result.stderr.contains("unknown config key 'tol'"), "{}", result.stderr);
    assert!(result.stderr.contains("did you mean 'tool'"));
}
