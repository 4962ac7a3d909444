//! Numeric application/catalog version
//!
//! Versions compare component by component as numbers, so `4.0.11` sorts
//! after `4.0.9`. Tags with fewer than three components are padded with
//! zeros: `3.0` and `3.0.0` are the same version.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("version string '{input}' is not valid: {reason}")]
pub struct VersionParseError {
    pub input: String,
    pub reason: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CatalogVersion {
    major: u32,
    minor: u32,
    patch: u32,
}

impl CatalogVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn patch(&self) -> u32 {
        self.patch
    }
}

impl FromStr for CatalogVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| VersionParseError {
            input: s.to_string(),
            reason,
        };

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(err("empty"));
        }

        let mut parts = [0u32; 3];
        let mut count = 0;
        for token in trimmed.split('.') {
            if count == 3 {
                return Err(err("more than three components"));
            }
            if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
                return Err(err("components must be non-negative integers"));
            }
            parts[count] = token.parse().map_err(|_| err("component out of range"))?;
            count += 1;
        }

        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

impl TryFrom<String> for CatalogVersion {
    type Error = VersionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CatalogVersion> for String {
    fn from(value: CatalogVersion) -> Self {
        value.to_string()
    }
}

impl fmt::Display for CatalogVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
