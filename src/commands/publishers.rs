//! `catsync publishers` handler

use anyhow::Result;

use catsync::presentation::output::{print_json, publishers_json, render_publishers, PublisherLine};
use catsync::presentation::{OutputFormat, Session};

pub fn cmd_publishers(session: &Session, server_name: &str, format: OutputFormat) -> Result<()> {
    let ctx = session.context();
    let server = session.registry.require(server_name)?;

    let mut lines = Vec::new();
    for name in server.get_publishers(ctx)? {
        let web_link = server.get_web_link(ctx, &name)?;
        lines.push(PublisherLine { name, web_link });
    }

    match format {
        OutputFormat::Json => print_json(&publishers_json(server_name, &lines)),
        OutputFormat::Text => print!("{}", render_publishers(server_name, &lines)),
    }
    Ok(())
}
