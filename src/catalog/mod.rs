//! Catalog servers and their registry
//!
//! - `CatalogServer` - one named source (FTP, HTTP, file system, file system with descriptor)
//! - `CatalogServerRegistry` - the servers known to this installation
//! - creation strings - the compact persisted form of a server definition

mod context;
mod creation;
mod registry;
mod server;
mod transfer;
pub mod url;

pub use context::ServerContext;
pub use creation::{decode_creation_string, DecodedServer, ServerKind};
pub use registry::{
    built_in_servers, CatalogServerRegistry, BUILT_IN_FTP_SERVER, BUILT_IN_HTTP_SERVER,
    SERVERS_SECTION,
};
pub use server::{
    CatalogServer, DescriptorState, ServerProbe, SIDECAR_EXTENSION, TEMPLATE_FOLDER_SIDECAR,
};
