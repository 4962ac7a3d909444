//! Address normalization for catalog servers
//!
//! Server addresses are typed by people, so they arrive with backslashes,
//! missing schemes and missing trailing separators.

use url::Url;

use crate::error::{CatalogError, CatalogResult};

/// Normalize an FTP address. Folder addresses end in exactly one `/`.
pub fn clean_ftp_url(raw: &str, is_file: bool) -> String {
    clean_network_url(raw, is_file, &["ftp."], "ftp://")
}

/// Normalize an HTTP address. Folder addresses end in exactly one `/`.
pub fn clean_http_url(raw: &str, is_file: bool) -> String {
    clean_network_url(raw, is_file, &["http.", "www."], "http://")
}

fn clean_network_url(raw: &str, is_file: bool, bare_hosts: &[&str], scheme: &str) -> String {
    let mut url = raw.trim().replace('\\', "/");

    let lower = url.to_ascii_lowercase();
    if bare_hosts.iter().any(|h| lower.starts_with(h)) {
        url.insert_str(0, scheme);
    }

    if is_file {
        url
    } else {
        with_trailing_slash(&url)
    }
}

/// Folder paths on the local file system end in a separator.
pub fn clean_folder_path(raw: &str) -> String {
    let path = raw.trim();
    if path.ends_with('/') || path.ends_with('\\') {
        path.to_string()
    } else if path.contains('\\') && !path.contains('/') {
        format!("{path}\\")
    } else {
        format!("{path}/")
    }
}

fn with_trailing_slash(url: &str) -> String {
    format!("{}/", url.trim_end_matches('/'))
}

/// Append `name` to a folder location, network or local.
pub fn join_location(folder: &str, name: &str) -> String {
    if folder.ends_with('/') || folder.ends_with('\\') {
        format!("{folder}{name}")
    } else if folder.is_empty() {
        name.to_string()
    } else {
        format!("{folder}/{name}")
    }
}

/// Parse `location` and require one of `schemes`.
pub fn require_scheme(location: &str, schemes: &[&str]) -> CatalogResult<Url> {
    let url = Url::parse(location).map_err(|e| CatalogError::UrlParseFailure {
        url: location.to_string(),
        message: e.to_string(),
    })?;

    if !schemes.contains(&url.scheme()) {
        return Err(CatalogError::UrlParseFailure {
            url: location.to_string(),
            message: format!(
                "expected a {} address, found '{}'",
                schemes.join("/"),
                url.scheme()
            ),
        });
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(CatalogError::UrlParseFailure {
            url: location.to_string(),
            message: "address has no host".to_string(),
        });
    }

    Ok(url)
}
