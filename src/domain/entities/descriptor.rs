//! Parsed catalog descriptor

use serde::Serialize;

use crate::domain::value_objects::{CatalogFormat, ResourceLocation};

/// One publisher offered by a catalog server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublisherEntry {
    pub name: String,
    pub location: ResourceLocation,
    pub web_link: Option<String>,
}

impl PublisherEntry {
    pub fn format(&self) -> CatalogFormat {
        self.location.format()
    }
}

/// Non-fatal problem with one publisher section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptorWarning {
    pub publisher: String,
    pub message: String,
}

/// Publishers in descriptor order, plus the sections that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    publishers: Vec<PublisherEntry>,
    warnings: Vec<DescriptorWarning>,
}

impl Descriptor {
    pub fn new(publishers: Vec<PublisherEntry>, warnings: Vec<DescriptorWarning>) -> Self {
        Self {
            publishers,
            warnings,
        }
    }

    pub fn publishers(&self) -> &[PublisherEntry] {
        &self.publishers
    }

    pub fn publisher_names(&self) -> Vec<String> {
        self.publishers.iter().map(|p| p.name.clone()).collect()
    }

    /// Publisher names compare exactly.
    pub fn get(&self, name: &str) -> Option<&PublisherEntry> {
        self.publishers.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn warnings(&self) -> &[DescriptorWarning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.publishers.is_empty()
    }
}
