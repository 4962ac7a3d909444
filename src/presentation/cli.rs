//! CLI Argument Parsing
//!
//! Global flags (`--config`, `--json`, `--verbose`) are inherited by all subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::value_objects::UpdateFrequency;

/// catsync - configuration catalog and cache synchronization
#[derive(Parser, Debug)]
#[command(name = "catsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to <config_dir>/catsync/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage catalog server definitions
    Servers {
        #[command(subcommand)]
        action: ServersAction,
    },

    /// List the publishers a server offers
    Publishers {
        /// Server name
        server: String,
    },

    /// Report whether the cache is due for a check and whether updates are pending
    Check,

    /// Check the selected server and refresh the cache when it changed
    Update {
        /// Check now regardless of the update frequency
        #[arg(short, long)]
        force: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Use a publisher's configuration from a catalog server
    Use {
        /// Server name
        server: String,

        /// Publisher name
        publisher: String,

        /// How often to check for updates
        #[arg(long, value_parser = parse_frequency)]
        frequency: Option<UpdateFrequency>,
    },

    /// Switch back to the configuration bundled with the application
    UseDefaults,

    /// Show the current cache state
    Status,

    /// Write a checksum sidecar for a file or template folder (publishing helper)
    Checksum {
        /// File or folder to hash
        target: PathBuf,

        /// Sidecar to write (defaults to <target>.md5)
        sidecar: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ServersAction {
    /// List defined servers
    List,

    /// Define or replace a server
    Add {
        /// Server name
        name: String,

        /// Creation string, e.g. `FTP|ftp://host/path/` or `FILSYS|lib|templates`
        creation: String,
    },

    /// Remove a server definition
    Remove {
        /// Server name
        name: String,
    },

    /// Probe a server's connectivity
    Test {
        /// Server name
        name: String,
    },
}

fn parse_frequency(s: &str) -> Result<UpdateFrequency, String> {
    s.parse()
}
