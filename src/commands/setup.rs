//! `catsync use` and `catsync use-defaults` handlers

use anyhow::{Context, Result};
use serde_json::json;

use catsync::application::sync::LibrarySetup;
use catsync::domain::value_objects::UpdateFrequency;
use catsync::presentation::output::print_json;
use catsync::presentation::{OutputFormat, Session};

pub fn cmd_use(
    session: &mut Session,
    server: String,
    publisher: String,
    frequency: Option<UpdateFrequency>,
    format: OutputFormat,
) -> Result<()> {
    let frequency = frequency.unwrap_or(session.state.frequency);
    let setup = LibrarySetup::remote(server.clone(), publisher.clone(), frequency);

    let Session {
        sync,
        state,
        registry,
        store,
        ..
    } = session;
    sync.apply_library_setup(state, registry, store, setup)
        .with_context(|| format!("could not switch to '{publisher}' on '{server}'"))?;

    match format {
        OutputFormat::Json => print_json(&json!({ "type": "library_setup", "state": state })),
        OutputFormat::Text => println!(
            "Now using '{publisher}' from '{server}' (updates: {frequency})."
        ),
    }
    Ok(())
}

pub fn cmd_use_defaults(session: &mut Session, format: OutputFormat) -> Result<()> {
    let Session {
        sync,
        state,
        registry,
        store,
        ..
    } = session;
    sync.restore_defaults(state, registry, store)?;

    match format {
        OutputFormat::Json => print_json(&json!({ "type": "library_setup", "state": state })),
        OutputFormat::Text => println!("Now using the configuration bundled with the application."),
    }
    Ok(())
}
