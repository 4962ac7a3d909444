//! Checksum verifiers

mod external;
mod manifest;

pub use external::ExternalChecksum;
pub use manifest::ManifestChecksum;
