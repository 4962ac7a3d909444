//! Outcomes of the cache synchronizer

use serde::Serialize;

/// What the top-level update flow did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateOutcome {
    /// The frequency policy does not call for a check yet
    NotDue,
    /// Checked; the cache matches the server
    UpToDate,
    /// Updates were available but the user declined
    Declined,
    /// The cache was repopulated
    Updated,
}

impl std::fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateOutcome::NotDue => write!(f, "not due"),
            UpdateOutcome::UpToDate => write!(f, "up to date"),
            UpdateOutcome::Declined => write!(f, "declined"),
            UpdateOutcome::Updated => write!(f, "updated"),
        }
    }
}
