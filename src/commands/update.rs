//! `catsync update` handler

use anyhow::Result;
use dialoguer::Confirm;
use is_terminal::IsTerminal;

use catsync::application::sync::UpdateOptions;
use catsync::domain::entities::CacheState;
use catsync::presentation::output::{outcome_json, print_json, render_outcome};
use catsync::presentation::{OutputFormat, Session};

pub fn cmd_update(session: &mut Session, force: bool, yes: bool, format: OutputFormat) -> Result<()> {
    let interactive = !yes && format == OutputFormat::Text && std::io::stdin().is_terminal();
    let mut confirm = |state: &CacheState| -> bool {
        if yes {
            return true;
        }
        if !interactive {
            eprintln!("Updates are available. Re-run with --yes to apply them.");
            return false;
        }
        Confirm::new()
            .with_prompt(format!(
                "Configuration updates from '{}' ({}) are available. Update now?",
                state.server, state.publisher
            ))
            .default(true)
            .interact()
            .unwrap_or(false)
    };

    let Session {
        sync,
        state,
        registry,
        store,
        ..
    } = session;
    let outcome = sync.update_cache(state, registry, store, UpdateOptions { force }, &mut confirm)?;

    match format {
        OutputFormat::Json => print_json(&outcome_json(outcome, state)),
        OutputFormat::Text => print!("{}", render_outcome(outcome, state)),
    }
    Ok(())
}
