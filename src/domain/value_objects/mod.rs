//! Domain Value Objects
//!
//! Immutable value types that represent catalog and cache concepts.

mod catalog_version;
mod resource_location;
mod shared_resource;
mod update_frequency;

pub use catalog_version::{CatalogVersion, VersionParseError};
pub use resource_location::{CatalogFormat, ResourceLocation};
pub use shared_resource::SharedResourceType;
pub use update_frequency::UpdateFrequency;
