//! Domain Services
//!
//! Stateless logic over domain types.

pub mod descriptor_parser;
pub mod update_schedule;

pub use descriptor_parser::{parse_descriptor, VersionSet};
pub use update_schedule::{is_time_to_update_cache, next_update_due};
