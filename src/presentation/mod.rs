//! Presentation Layer
//!
//! - `cli` - argument parsing (via clap)
//! - `factory` - loads a `Session` with its dependencies wired up
//! - `output` - text and JSON rendering

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{Cli, Commands, ServersAction};
pub use factory::Session;
pub use output::OutputFormat;
