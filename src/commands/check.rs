//! `catsync check` handler
//!
//! Read-only: reports whether a check is due and whether the server changed,
//! without touching the cache.

use anyhow::Result;
use serde_json::json;

use catsync::domain::value_objects::SharedResourceType;
use catsync::presentation::output::print_json;
use catsync::presentation::{OutputFormat, Session};

pub fn cmd_check(session: &Session, format: OutputFormat) -> Result<()> {
    let state = &session.state;

    if state.shared_resource_type == SharedResourceType::UseBuiltInDefaults {
        match format {
            OutputFormat::Json => print_json(&json!({
                "type": "check",
                "source": state.shared_resource_type,
                "due": false,
                "pending": false,
            })),
            OutputFormat::Text => println!("Using built-in defaults; nothing to check."),
        }
        return Ok(());
    }

    let due = session.sync.is_time_to_update_cache(state);
    let live = session.sync.live_folder();
    let pending = session.sync.are_updates_pending(
        &session.registry,
        &state.server,
        &state.publisher,
        &live,
    )?;

    match format {
        OutputFormat::Json => print_json(&json!({
            "type": "check",
            "source": state.shared_resource_type,
            "server": state.server,
            "publisher": state.publisher,
            "due": due,
            "pending": pending,
        })),
        OutputFormat::Text => {
            println!(
                "Server '{}', publisher '{}' (frequency: {})",
                state.server, state.publisher, state.frequency
            );
            println!("  Check due:       {}", if due { "yes" } else { "no" });
            println!("  Updates pending: {}", if pending { "yes" } else { "no" });
        }
    }
    Ok(())
}
