//! `catsync status` handler

use anyhow::Result;

use catsync::presentation::output::{print_json, render_status, status_json};
use catsync::presentation::{OutputFormat, Session};

pub fn cmd_status(session: &Session, format: OutputFormat) -> Result<()> {
    let live = session.sync.live_folder();
    match format {
        OutputFormat::Json => print_json(&status_json(&session.state, &live)),
        OutputFormat::Text => print!("{}", render_status(&session.state, &live)),
    }
    Ok(())
}
