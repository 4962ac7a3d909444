//! Error types for catsync
//!
//! Every failure a catalog server or the cache synchronizer can raise is a
//! `CatalogError`. `CatalogError::kind` folds the ambient variants (I/O,
//! settings) into the classified taxonomy callers switch on.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::domain::ports::{SettingsError, TransportError};

/// Result type alias for catsync operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Main error type for catalog and cache operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Could not reach a server at all
    #[error("network connection failed for {location}: {message}")]
    NetworkConnection { location: String, message: String },

    /// The catalog descriptor could not be fetched or read
    #[error("failed to read the catalog from server '{server}': {message}")]
    CatalogFetchFailure {
        server: String,
        message: String,
        network: bool,
    },

    /// Address or creation string is not understood
    #[error("could not parse '{url}': {message}")]
    UrlParseFailure { url: String, message: String },

    /// External checksum program is not installed
    #[error("checksum tool not found: {}", tool.display())]
    MissingChecksumTool { tool: PathBuf },

    /// A remote or local resource does not exist
    #[error("file not found: {location}")]
    FileNotFound { location: String },

    /// Resource was found but could not be transferred or unpacked
    #[error("download failed for {location}: {message}")]
    DownloadFailure { location: String, message: String },

    /// No server with this name in the registry
    #[error("catalog server '{name}' is not defined")]
    ServerNotFound { name: String },

    /// Descriptor could not be tokenized, or a publisher uses an unsupported layout
    #[error("catalog descriptor error: {message}")]
    DescriptorFormatError { message: String },

    /// Configuration file could not be read or holds an invalid value
    #[error("invalid configuration in {}: {message}", file.display())]
    InvalidConfig { file: PathBuf, message: String },

    /// Anything else
    #[error("unexpected error: {message}")]
    Unknown { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings store error
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Classified failure taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    NetworkConnection,
    CatalogFetchFailure,
    UrlParseFailure,
    MissingChecksumTool,
    FileNotFound,
    DownloadFailure,
    ServerNotFound,
    DescriptorFormatError,
    Unknown,
}

impl CatalogError {
    pub fn unknown(message: impl Into<String>) -> Self {
        CatalogError::Unknown {
            message: message.into(),
        }
    }

    /// Map to the classified taxonomy. Ambient errors count as `Unknown`.
    pub fn kind(&self) -> FailureKind {
        match self {
            CatalogError::NetworkConnection { .. } => FailureKind::NetworkConnection,
            CatalogError::CatalogFetchFailure { .. } => FailureKind::CatalogFetchFailure,
            CatalogError::UrlParseFailure { .. } => FailureKind::UrlParseFailure,
            CatalogError::MissingChecksumTool { .. } => FailureKind::MissingChecksumTool,
            CatalogError::FileNotFound { .. } => FailureKind::FileNotFound,
            CatalogError::DownloadFailure { .. } => FailureKind::DownloadFailure,
            CatalogError::ServerNotFound { .. } => FailureKind::ServerNotFound,
            CatalogError::DescriptorFormatError { .. } => FailureKind::DescriptorFormatError,
            CatalogError::InvalidConfig { .. }
            | CatalogError::Unknown { .. }
            | CatalogError::Io(_)
            | CatalogError::Settings(_) => FailureKind::Unknown,
        }
    }

    /// True when the failure was caused by connectivity rather than content.
    pub fn is_network_error(&self) -> bool {
        match self {
            CatalogError::NetworkConnection { .. } => true,
            CatalogError::CatalogFetchFailure { network, .. } => *network,
            _ => false,
        }
    }

    /// Classify a transport failure for `location`.
    pub fn from_transport(location: &str, err: TransportError) -> Self {
        match err {
            TransportError::InvalidUrl { message } => CatalogError::UrlParseFailure {
                url: location.to_string(),
                message,
            },
            TransportError::NotFound => CatalogError::FileNotFound {
                location: location.to_string(),
            },
            TransportError::Connection { message } => CatalogError::NetworkConnection {
                location: location.to_string(),
                message,
            },
            TransportError::Io(e) => CatalogError::DownloadFailure {
                location: location.to_string(),
                message: e.to_string(),
            },
        }
    }
}
