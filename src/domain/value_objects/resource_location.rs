//! Where a publisher's configuration lives on its server

use serde::{Deserialize, Serialize};

/// Packaging declared by a descriptor section's `Format` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CatalogFormat {
    /// Master library file plus a template folder
    #[default]
    Legacy,
    /// Single compressed archive holding both
    Bundle,
}

impl CatalogFormat {
    /// `pgz` (any case) selects the bundle format; anything else is legacy.
    pub fn from_descriptor_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("pgz") => CatalogFormat::Bundle,
            _ => CatalogFormat::Legacy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum ResourceLocation {
    Legacy {
        master_library: String,
        template_folder: String,
    },
    Bundle {
        archive: String,
    },
}

impl ResourceLocation {
    pub fn format(&self) -> CatalogFormat {
        match self {
            ResourceLocation::Legacy { .. } => CatalogFormat::Legacy,
            ResourceLocation::Bundle { .. } => CatalogFormat::Bundle,
        }
    }
}
