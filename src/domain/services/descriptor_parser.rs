//! Catalog descriptor parser
//!
//! A descriptor is an INI-style text file with one section per publisher:
//!
//! ```text
//! [WSDOT]
//! Format=pgz
//! WebLink=https://example.org/bridge
//! Version_3.0_PgzFiles=ftp://example.org/pub/3.0/PGSuper.pgz
//! Version_4.0_PgzFiles=ftp://example.org/pub/4.0/PGSuper.pgz
//! ```
//!
//! Legacy sections carry `Version_<v>_MasterLibrary` and
//! `Version_<v>_WorkgroupTemplates` pairs instead. The entry used for the
//! running application is the greatest version at or below its own
//! version (floor match).
//!
//! Problems inside one section only drop that publisher. A file that cannot
//! be tokenized at all fails the whole parse.
//!
//! A publisher whose versions are all newer than the application ends the
//! parse: it and every section after it are left out, without a warning.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::domain::entities::{Descriptor, DescriptorWarning, PublisherEntry};
use crate::domain::value_objects::{
    CatalogFormat, CatalogVersion, ResourceLocation, VersionParseError,
};
use crate::error::{CatalogError, CatalogResult};

const VERSION_PREFIX: &str = "Version_";
const MASTER_LIBRARY_SUFFIX: &str = "_MasterLibrary";
const TEMPLATES_SUFFIX: &str = "_WorkgroupTemplates";
const BUNDLE_SUFFIX: &str = "_PgzFiles";

/// Version tags found in a section, ordered numerically.
///
/// Numerically equal tags (`3.0` and `3.0.0`) collapse; the first spelling
/// seen is kept because it is the one used to look the value up again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionSet {
    tags: BTreeMap<CatalogVersion, String>,
}

impl VersionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: &str) -> Result<(), VersionParseError> {
        let version: CatalogVersion = tag.parse()?;
        self.tags.entry(version).or_insert_with(|| tag.to_string());
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Tag of the greatest version not exceeding `requested`.
    ///
    /// `None` when every known version is newer than `requested`: the
    /// requested version would sort first and has no predecessor.
    pub fn floor(&self, requested: &CatalogVersion) -> Option<&str> {
        self.tags
            .range(..=requested)
            .next_back()
            .map(|(_, tag)| tag.as_str())
    }
}

#[derive(Debug)]
struct RawSection {
    name: String,
    entries: Vec<(String, String)>,
    malformed: bool,
}

impl RawSection {
    fn value(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }
}

/// Parse descriptor `text` for an application at `app_version`.
pub fn parse_descriptor(text: &str, app_version: &CatalogVersion) -> CatalogResult<Descriptor> {
    let sections = tokenize(text)?;

    let mut publishers: Vec<PublisherEntry> = Vec::new();
    let mut warnings = Vec::new();

    for section in sections {
        if section.malformed {
            debug!(publisher = %section.name, "skipping malformed catalog section");
            continue;
        }
        if publishers.iter().any(|p| p.name == section.name) {
            debug!(publisher = %section.name, "skipping duplicate catalog section");
            continue;
        }

        match parse_section(&section, app_version) {
            SectionOutcome::Publisher(entry) => publishers.push(entry),
            SectionOutcome::Skipped(message) => {
                warn!(publisher = %section.name, %message, "catalog publisher skipped");
                warnings.push(DescriptorWarning {
                    publisher: section.name.clone(),
                    message,
                });
            }
            SectionOutcome::Malformed(reason) => {
                debug!(publisher = %section.name, %reason, "skipping malformed catalog section");
            }
            SectionOutcome::TooNew => {
                debug!(
                    publisher = %section.name,
                    %app_version,
                    "publisher only targets newer versions, ignoring the rest of the catalog"
                );
                break;
            }
        }
    }

    Ok(Descriptor::new(publishers, warnings))
}

enum SectionOutcome {
    Publisher(PublisherEntry),
    /// Reported to the user
    Skipped(String),
    /// Dropped silently
    Malformed(String),
    /// Every version is newer than the application; stops the parse
    TooNew,
}

fn parse_section(section: &RawSection, app_version: &CatalogVersion) -> SectionOutcome {
    let format = CatalogFormat::from_descriptor_value(section.value("Format"));

    let location = match format {
        CatalogFormat::Legacy => {
            let library = match resolve_key(section, MASTER_LIBRARY_SUFFIX, app_version) {
                Ok(r) => r,
                Err(outcome) => return outcome,
            };
            let templates = match resolve_key(section, TEMPLATES_SUFFIX, app_version) {
                Ok(r) => r,
                Err(outcome) => return outcome,
            };

            let library_value = section.value(&library);
            let templates_value = section.value(&templates);
            match (library_value, templates_value) {
                (Some(lib), Some(tmpl)) => ResourceLocation::Legacy {
                    master_library: lib.to_string(),
                    template_folder: tmpl.to_string(),
                },
                _ => {
                    let mut missing = Vec::new();
                    if library_value.is_none() {
                        missing.push(format!("Could not find Master Library Key: {library}"));
                    }
                    if templates_value.is_none() {
                        missing.push(format!(
                            "Could not find Workgroup Template Key: {templates}"
                        ));
                    }
                    return SectionOutcome::Skipped(missing.join("; "));
                }
            }
        }
        CatalogFormat::Bundle => {
            let key = match resolve_key(section, BUNDLE_SUFFIX, app_version) {
                Ok(r) => r,
                Err(outcome) => return outcome,
            };
            match section.value(&key) {
                Some(archive) => ResourceLocation::Bundle {
                    archive: archive.to_string(),
                },
                None => {
                    return SectionOutcome::Skipped(format!(
                        "The Pgz File Key ({key}) was not found in the server's catalog"
                    ))
                }
            }
        }
    };

    SectionOutcome::Publisher(PublisherEntry {
        name: section.name.clone(),
        location,
        web_link: section.value("WebLink").map(str::to_string),
    })
}

/// Find the full key (`Version_<tag><suffix>`) selected by floor match.
fn resolve_key(
    section: &RawSection,
    suffix: &str,
    app_version: &CatalogVersion,
) -> Result<String, SectionOutcome> {
    let mut versions = VersionSet::new();
    for (key, _) in &section.entries {
        let Some(tag) = version_tag(key, suffix) else {
            continue;
        };
        let Some(tag) = tag else {
            return Err(SectionOutcome::Malformed(format!(
                "key '{key}' does not start with {VERSION_PREFIX}"
            )));
        };
        if let Err(e) = versions.insert(tag) {
            return Err(SectionOutcome::Malformed(e.to_string()));
        }
    }

    if versions.is_empty() {
        return Err(SectionOutcome::Skipped(format!(
            "No {VERSION_PREFIX}<version>{suffix} entries were found"
        )));
    }

    match versions.floor(app_version) {
        Some(tag) => Ok(format!("{VERSION_PREFIX}{tag}{suffix}")),
        None => Err(SectionOutcome::TooNew),
    }
}

/// `None` if `key` does not end in `suffix`; `Some(None)` if it does but
/// lacks the version prefix.
fn version_tag<'a>(key: &'a str, suffix: &str) -> Option<Option<&'a str>> {
    let stem_len = key.len().checked_sub(suffix.len())?;
    if !key.is_char_boundary(stem_len) || !key[stem_len..].eq_ignore_ascii_case(suffix) {
        return None;
    }
    let stem = &key[..stem_len];
    let prefix_len = VERSION_PREFIX.len();
    if stem.len() < prefix_len
        || !stem.is_char_boundary(prefix_len)
        || !stem[..prefix_len].eq_ignore_ascii_case(VERSION_PREFIX)
    {
        return Some(None);
    }
    Some(Some(&stem[prefix_len..]))
}

fn tokenize(text: &str) -> CatalogResult<Vec<RawSection>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut sections: Vec<RawSection> = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let Some(name) = rest.strip_suffix(']') else {
                return Err(CatalogError::DescriptorFormatError {
                    message: format!("line {}: unterminated section header", index + 1),
                });
            };
            let name = name.trim();
            sections.push(RawSection {
                name: name.to_string(),
                entries: Vec::new(),
                malformed: name.is_empty(),
            });
            continue;
        }

        let Some(section) = sections.last_mut() else {
            return Err(CatalogError::DescriptorFormatError {
                message: format!("line {}: entry outside of any section", index + 1),
            });
        };

        match line.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                section
                    .entries
                    .push((key.trim().to_string(), unquote(value.trim()).to_string()));
            }
            _ => section.malformed = true,
        }
    }

    Ok(sections)
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
