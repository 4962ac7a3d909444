//! Command handlers for the `catsync` binary

pub mod check;
pub mod checksum;
pub mod publishers;
pub mod servers;
pub mod setup;
pub mod status;
pub mod update;

use anyhow::Result;

use catsync::config::Config;
use catsync::presentation::{Commands, OutputFormat, Session};

pub fn run(command: Commands, config: Config, format: OutputFormat) -> Result<()> {
    if let Commands::Checksum { target, sidecar } = &command {
        return checksum::cmd_checksum(&config, target, sidecar.as_deref(), format);
    }

    let mut session = Session::open(config)?;
    match command {
        Commands::Servers { action } => servers::cmd_servers(&mut session, action, format),
        Commands::Publishers { server } => publishers::cmd_publishers(&session, &server, format),
        Commands::Check => check::cmd_check(&session, format),
        Commands::Update { force, yes } => update::cmd_update(&mut session, force, yes, format),
        Commands::Use {
            server,
            publisher,
            frequency,
        } => setup::cmd_use(&mut session, server, publisher, frequency, format),
        Commands::UseDefaults => setup::cmd_use_defaults(&mut session, format),
        Commands::Status => status::cmd_status(&session, format),
        Commands::Checksum { .. } => Ok(()),
    }
}
