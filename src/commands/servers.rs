//! `catsync servers` handlers

use anyhow::{Context, Result};
use serde_json::json;

use catsync::catalog::{decode_creation_string, CatalogServer};
use catsync::domain::value_objects::SharedResourceType;
use catsync::presentation::output::{
    print_json, probe_json, render_probe, render_servers, servers_json,
};
use catsync::presentation::{OutputFormat, ServersAction, Session};
use catsync::CatalogError;

pub fn cmd_servers(session: &mut Session, action: ServersAction, format: OutputFormat) -> Result<()> {
    match action {
        ServersAction::List => {
            let servers = session.registry.get_all();
            let selected = selected_server(session);
            match format {
                OutputFormat::Json => print_json(&servers_json(&servers, selected)),
                OutputFormat::Text => print!("{}", render_servers(&servers, selected)),
            }
            Ok(())
        }
        ServersAction::Add { name, creation } => {
            let decoded = decode_creation_string(&creation)
                .with_context(|| format!("invalid server definition for '{name}'"))?;
            let replaced = session.registry.is_defined(&name);
            session.registry.add(CatalogServer::new(name.clone(), decoded.kind));
            session.save_registry()?;

            match format {
                OutputFormat::Json => print_json(&json!({
                    "type": "server_added",
                    "name": name,
                    "replaced": replaced,
                })),
                OutputFormat::Text if replaced => println!("Replaced server '{name}'."),
                OutputFormat::Text => println!("Added server '{name}'."),
            }
            Ok(())
        }
        ServersAction::Remove { name } => {
            if session.registry.remove(&name).is_none() {
                return Err(CatalogError::ServerNotFound { name }.into());
            }
            session.save_registry()?;

            let in_use = selected_server(session) == Some(name.as_str());
            match format {
                OutputFormat::Json => print_json(&json!({
                    "type": "server_removed",
                    "name": name,
                    "in_use": in_use,
                })),
                OutputFormat::Text => {
                    println!("Removed server '{name}'.");
                    if in_use {
                        eprintln!(
                            "Warning: '{name}' is the selected server; the next update will fall back to built-in defaults."
                        );
                    }
                }
            }
            Ok(())
        }
        ServersAction::Test { name } => {
            let server = session.registry.require(&name)?;
            let probe = server.test_server(session.context());
            match format {
                OutputFormat::Json => print_json(&probe_json(&name, &probe)),
                OutputFormat::Text => print!("{}", render_probe(&name, &probe)),
            }
            if probe.reachable {
                Ok(())
            } else {
                anyhow::bail!("server '{name}' is not reachable")
            }
        }
    }
}

fn selected_server(session: &Session) -> Option<&str> {
    (session.state.shared_resource_type == SharedResourceType::UseRemoteServer)
        .then_some(session.state.server.as_str())
}
