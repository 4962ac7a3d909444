//! Output Rendering
//!
//! Text views return `String`s so they can be tested; JSON views return
//! `serde_json::Value`s printed one per line.

use serde_json::{json, Value};

use crate::application::sync::UpdateOutcome;
use crate::catalog::{CatalogServer, ServerProbe};
use crate::domain::entities::CacheState;
use crate::domain::value_objects::SharedResourceType;
use crate::error::CatalogError;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub fn print_json(value: &Value) {
    println!("{value}");
}

pub fn render_status(state: &CacheState, live: &std::path::Path) -> String {
    let mut out = String::new();
    match state.shared_resource_type {
        SharedResourceType::UseBuiltInDefaults => {
            out.push_str("Using the configuration bundled with the application\n");
        }
        SharedResourceType::UseRemoteServer => {
            out.push_str(&format!(
                "Using publisher '{}' from server '{}'\n",
                state.publisher, state.server
            ));
        }
    }
    out.push_str(&format!("  Update frequency: {}\n", state.frequency));
    out.push_str(&format!(
        "  Last update:      {}\n",
        state
            .last_update
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "never".to_string())
    ));
    if state.master_library_cache.as_os_str().is_empty() {
        out.push_str("  Master library:   (none)\n");
    } else {
        out.push_str(&format!(
            "  Master library:   {}\n",
            state.master_library_cache.display()
        ));
    }
    out.push_str(&format!(
        "  Templates:        {}\n",
        state.template_folder_cache.display()
    ));
    if state.shared_resource_type == SharedResourceType::UseRemoteServer {
        out.push_str(&format!("  Library source:   {}\n", state.master_library_url));
        out.push_str(&format!("  Cache folder:     {}\n", live.display()));
    }
    out
}

pub fn status_json(state: &CacheState, live: &std::path::Path) -> Value {
    json!({
        "type": "status",
        "state": state,
        "cache_folder": live,
    })
}

pub fn render_servers(servers: &[&CatalogServer], selected: Option<&str>) -> String {
    if servers.is_empty() {
        return "No catalog servers defined.\n".to_string();
    }
    let width = servers.iter().map(|s| s.name().len()).max().unwrap_or(0);
    let tag_width = servers.iter().map(|s| s.kind().tag().len()).max().unwrap_or(0);
    let mut out = String::new();
    for server in servers {
        let marker = if Some(server.name()) == selected { "*" } else { " " };
        out.push_str(&format!(
            "{marker} {:width$}  {:tag_width$}  {}\n",
            server.name(),
            server.kind().tag(),
            server.kind().describe()
        ));
    }
    out
}

pub fn servers_json(servers: &[&CatalogServer], selected: Option<&str>) -> Value {
    let list: Vec<Value> = servers
        .iter()
        .map(|s| {
            json!({
                "name": s.name(),
                "creation": s.creation_string(),
                "server": s.kind(),
                "selected": Some(s.name()) == selected,
            })
        })
        .collect();
    json!({ "type": "servers", "servers": list })
}

pub fn render_probe(name: &str, probe: &ServerProbe) -> String {
    if probe.reachable {
        format!("[OK] {name}: {}\n", probe.message)
    } else {
        format!("[FAIL] {name}: {}\n", probe.message)
    }
}

pub fn probe_json(name: &str, probe: &ServerProbe) -> Value {
    json!({
        "type": "server_test",
        "server": name,
        "reachable": probe.reachable,
        "message": probe.message,
    })
}

/// One publisher with its optional web link
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PublisherLine {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_link: Option<String>,
}

pub fn render_publishers(server: &str, publishers: &[PublisherLine]) -> String {
    if publishers.is_empty() {
        return format!("Server '{server}' lists no publishers for this version.\n");
    }
    let mut out = String::new();
    for p in publishers {
        match &p.web_link {
            Some(link) => out.push_str(&format!("  {}  <{link}>\n", p.name)),
            None => out.push_str(&format!("  {}\n", p.name)),
        }
    }
    out
}

pub fn publishers_json(server: &str, publishers: &[PublisherLine]) -> Value {
    json!({ "type": "publishers", "server": server, "publishers": publishers })
}

pub fn render_outcome(outcome: UpdateOutcome, state: &CacheState) -> String {
    match outcome {
        UpdateOutcome::NotDue => format!(
            "No check due (frequency: {}). Use --force to check now.\n",
            state.frequency
        ),
        UpdateOutcome::UpToDate => "Configuration cache is up to date.\n".to_string(),
        UpdateOutcome::Declined => "Update skipped.\n".to_string(),
        UpdateOutcome::Updated => format!(
            "Configuration cache updated from '{}' ({}).\n",
            state.server, state.publisher
        ),
    }
}

pub fn outcome_json(outcome: UpdateOutcome, state: &CacheState) -> Value {
    json!({ "type": "update", "outcome": outcome, "state": state })
}

/// Extra line shown under an error, if any.
pub fn error_hint(err: &CatalogError) -> Option<&'static str> {
    if err.is_network_error() {
        return Some("Check your network connection and try again.");
    }
    match err {
        CatalogError::ServerNotFound { .. } => {
            Some("Run `catsync servers list` to see the defined servers.")
        }
        CatalogError::MissingChecksumTool { .. } => {
            Some("Set `checksum.tool = \"builtin\"` or install the checksum program.")
        }
        _ => None,
    }
}

pub fn error_json(err: &CatalogError) -> Value {
    json!({
        "type": "error",
        "kind": err.kind(),
        "message": err.to_string(),
        "network": err.is_network_error(),
    })
}
