//! How often the cache is checked against its server

use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UpdateFrequency {
    Never,
    Always,
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl UpdateFrequency {
    pub const ALL: [UpdateFrequency; 5] = [
        UpdateFrequency::Never,
        UpdateFrequency::Always,
        UpdateFrequency::Daily,
        UpdateFrequency::Weekly,
        UpdateFrequency::Monthly,
    ];

    /// Interval for the periodic policies; `None` for Never/Always.
    pub fn interval(&self) -> Option<Duration> {
        match self {
            UpdateFrequency::Never | UpdateFrequency::Always => None,
            UpdateFrequency::Daily => Some(Duration::days(1)),
            UpdateFrequency::Weekly => Some(Duration::days(7)),
            UpdateFrequency::Monthly => Some(Duration::days(30)),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            UpdateFrequency::Never => 0,
            UpdateFrequency::Always => 1,
            UpdateFrequency::Daily => 2,
            UpdateFrequency::Weekly => 3,
            UpdateFrequency::Monthly => 4,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.code() == code)
    }
}

impl FromStr for UpdateFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "never" => Ok(UpdateFrequency::Never),
            "always" => Ok(UpdateFrequency::Always),
            "daily" => Ok(UpdateFrequency::Daily),
            "weekly" => Ok(UpdateFrequency::Weekly),
            "monthly" => Ok(UpdateFrequency::Monthly),
            other => Err(format!(
                "unknown update frequency '{other}' (expected never, always, daily, weekly or monthly)"
            )),
        }
    }
}

impl std::fmt::Display for UpdateFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UpdateFrequency::Never => "never",
            UpdateFrequency::Always => "always",
            UpdateFrequency::Daily => "daily",
            UpdateFrequency::Weekly => "weekly",
            UpdateFrequency::Monthly => "monthly",
        };
        write!(f, "{s}")
    }
}
