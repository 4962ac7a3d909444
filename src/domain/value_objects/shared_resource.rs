//! Where the application takes its configuration from

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SharedResourceType {
    /// Library and templates shipped with the application
    #[default]
    UseBuiltInDefaults,
    /// Library and templates cached from a catalog server
    UseRemoteServer,
}

impl SharedResourceType {
    /// Integer code used in the settings store.
    pub fn code(&self) -> i64 {
        match self {
            SharedResourceType::UseBuiltInDefaults => 0,
            SharedResourceType::UseRemoteServer => 1,
        }
    }

    /// Unrecognized codes fall back to built-in defaults.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => SharedResourceType::UseRemoteServer,
            _ => SharedResourceType::UseBuiltInDefaults,
        }
    }
}

impl std::fmt::Display for SharedResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SharedResourceType::UseBuiltInDefaults => write!(f, "built-in defaults"),
            SharedResourceType::UseRemoteServer => write!(f, "remote server"),
        }
    }
}
