//! Settings store implementations

mod memory;
mod toml_store;

pub use memory::MemorySettingsStore;
pub use toml_store::TomlSettingsStore;
