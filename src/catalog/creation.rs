//! Creation strings: the compact encoding of a server definition
//!
//! ```text
//! FTP|ftp://ftp.example.org/pub/app/
//! HTTP|https://www.example.org/app/
//! FILSYS|\\share\WSDOT.lbr|\\share\Templates
//! FILSYSINI|\\share\catalog\
//! ```
//!
//! Older settings stores may hold a name-embedded form (`FTP|name|addr`,
//! `FILSYS|name|lib|templates`) or the pre-`KIND|` form `name!ftp-address`.
//! Both decode; encoding always produces the unnamed form.

use serde::Serialize;

use crate::error::{CatalogError, CatalogResult};

const FTP_TAG: &str = "FTP";
const HTTP_TAG: &str = "HTTP";
const FILE_SYSTEM_TAG: &str = "FILSYS";
const FILE_SYSTEM_INI_TAG: &str = "FILSYSINI";

/// Transport backend and its address (or paths).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServerKind {
    Ftp {
        address: String,
    },
    Http {
        address: String,
    },
    /// Library file (may be empty) and template folder on a local or mounted drive
    LocalFileSystem {
        library_file: String,
        template_folder: String,
    },
    /// Folder on a local or mounted drive holding a catalog descriptor
    LocalFileSystemIni {
        address: String,
    },
}

impl ServerKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ServerKind::Ftp { .. } => FTP_TAG,
            ServerKind::Http { .. } => HTTP_TAG,
            ServerKind::LocalFileSystem { .. } => FILE_SYSTEM_TAG,
            ServerKind::LocalFileSystemIni { .. } => FILE_SYSTEM_INI_TAG,
        }
    }

    pub fn creation_string(&self) -> String {
        match self {
            ServerKind::Ftp { address }
            | ServerKind::Http { address }
            | ServerKind::LocalFileSystemIni { address } => format!("{}|{}", self.tag(), address),
            ServerKind::LocalFileSystem {
                library_file,
                template_folder,
            } => format!("{}|{}|{}", self.tag(), library_file, template_folder),
        }
    }

    /// Human readable address for listings
    pub fn describe(&self) -> String {
        match self {
            ServerKind::Ftp { address }
            | ServerKind::Http { address }
            | ServerKind::LocalFileSystemIni { address } => address.clone(),
            ServerKind::LocalFileSystem {
                library_file,
                template_folder,
            } if library_file.is_empty() => template_folder.clone(),
            ServerKind::LocalFileSystem {
                library_file,
                template_folder,
            } => format!("{library_file} + {template_folder}"),
        }
    }
}

/// Result of decoding a creation string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedServer {
    /// Present when the string embeds the server's name
    pub name: Option<String>,
    pub kind: ServerKind,
}

pub fn decode_creation_string(encoded: &str) -> CatalogResult<DecodedServer> {
    let invalid = |message: &str| CatalogError::UrlParseFailure {
        url: encoded.to_string(),
        message: message.to_string(),
    };

    if encoded.contains('|') {
        let fields: Vec<&str> = encoded.split('|').map(str::trim).collect();
        let tag = fields[0].to_ascii_uppercase();

        let (name, kind) = match (tag.as_str(), &fields[1..]) {
            (FTP_TAG | HTTP_TAG | FILE_SYSTEM_INI_TAG, [address]) => {
                (None, address_kind(&tag, address))
            }
            (FTP_TAG | HTTP_TAG | FILE_SYSTEM_INI_TAG, [name, address]) => {
                (Some(*name), address_kind(&tag, address))
            }
            (FILE_SYSTEM_TAG, [library, templates]) => (None, file_system_kind(library, templates)),
            (FILE_SYSTEM_TAG, [name, library, templates]) => {
                (Some(*name), file_system_kind(library, templates))
            }
            (FTP_TAG | HTTP_TAG | FILE_SYSTEM_INI_TAG | FILE_SYSTEM_TAG, _) => {
                return Err(invalid("wrong number of fields"))
            }
            _ => return Err(invalid("unknown server type")),
        };

        if name.is_some_and(str::is_empty) {
            return Err(invalid("server name is empty"));
        }
        check_fields(&kind).map_err(|m| invalid(m))?;

        return Ok(DecodedServer {
            name: name.map(str::to_string),
            kind,
        });
    }

    if let Some((name, address)) = encoded.split_once('!') {
        let (name, address) = (name.trim(), address.trim());
        if name.is_empty() {
            return Err(invalid("server name is empty"));
        }
        let kind = ServerKind::Ftp {
            address: address.to_string(),
        };
        check_fields(&kind).map_err(|m| invalid(m))?;
        return Ok(DecodedServer {
            name: Some(name.to_string()),
            kind,
        });
    }

    Err(invalid("not a catalog server definition"))
}

fn address_kind(tag: &str, address: &str) -> ServerKind {
    let address = address.to_string();
    match tag {
        FTP_TAG => ServerKind::Ftp { address },
        HTTP_TAG => ServerKind::Http { address },
        _ => ServerKind::LocalFileSystemIni { address },
    }
}

fn file_system_kind(library: &str, templates: &str) -> ServerKind {
    ServerKind::LocalFileSystem {
        library_file: library.to_string(),
        template_folder: templates.to_string(),
    }
}

fn check_fields(kind: &ServerKind) -> Result<(), &'static str> {
    match kind {
        ServerKind::Ftp { address }
        | ServerKind::Http { address }
        | ServerKind::LocalFileSystemIni { address }
            if address.is_empty() =>
        {
            Err("address is empty")
        }
        ServerKind::LocalFileSystem {
            template_folder, ..
        } if template_folder.is_empty() => Err("template folder is empty"),
        _ => Ok(()),
    }
}
