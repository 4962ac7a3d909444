//! catsync CLI - configuration catalog and cache synchronization
//!
//! Usage: catsync <COMMAND>
//!
//! Commands:
//!   servers      Manage catalog server definitions
//!   publishers   List the publishers a server offers
//!   check        Report whether updates are due or pending
//!   update       Refresh the configuration cache
//!   use          Select a publisher on a catalog server
//!   use-defaults Switch back to the bundled configuration
//!   status       Show the current cache state
//!   checksum     Write a checksum sidecar (publishing helper)

mod commands;

use anyhow::{Context, Result};
use clap::Parser;

use catsync::config::Config;
use catsync::presentation::output::{error_hint, error_json, print_json};
use catsync::presentation::{Cli, OutputFormat};
use catsync::CatalogError;

fn main() -> Result<()> {
    let cli = Cli::parse();
    catsync::logging::init(cli.verbose);

    let format = OutputFormat::from_flag(cli.json);
    let (config, warnings) =
        Config::discover(cli.config.as_deref()).context("failed to load configuration")?;
    for warning in &warnings {
        eprintln!("Warning: {warning}");
    }

    let result = commands::run(cli.command, config, format);

    if let Err(err) = &result {
        if let Some(catalog_err) = err.downcast_ref::<CatalogError>() {
            match format {
                OutputFormat::Json => print_json(&error_json(catalog_err)),
                OutputFormat::Text => {
                    if let Some(hint) = error_hint(catalog_err) {
                        eprintln!("Hint: {hint}");
                    }
                }
            }
        }
    }
    result
}
