//! Inputs to the cache synchronizer

use crate::domain::value_objects::{SharedResourceType, UpdateFrequency};

/// A library choice made by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibrarySetup {
    pub shared_resource_type: SharedResourceType,
    pub frequency: UpdateFrequency,
    pub server: String,
    pub publisher: String,
}

impl LibrarySetup {
    /// Use `publisher` on `server`.
    pub fn remote(
        server: impl Into<String>,
        publisher: impl Into<String>,
        frequency: UpdateFrequency,
    ) -> Self {
        Self {
            shared_resource_type: SharedResourceType::UseRemoteServer,
            frequency,
            server: server.into(),
            publisher: publisher.into(),
        }
    }

    /// Go back to the configuration shipped with the application.
    pub fn built_in(frequency: UpdateFrequency) -> Self {
        Self {
            shared_resource_type: SharedResourceType::UseBuiltInDefaults,
            frequency,
            server: String::new(),
            publisher: String::new(),
        }
    }
}

/// Options for the top-level update flow
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// Check for updates even when the frequency policy says it is not due
    pub force: bool,
}
