// src/error.rs
// =============================================================================
// Run-level errors.
//
// Only a handful of things can stop a check run entirely: a bad starting URL,
// a bad configuration, or a root page that can't be loaded. Everything that
// goes wrong while checking an individual link is NOT an error here - it is
// recorded as a FetchOutcome and ends up in the report instead.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    /// The URL the user gave us could not be parsed or is not http(s)
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The shared HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The root page request failed before we got a response (or timed out)
    #[error("Error fetching URL {url}: {reason}")]
    RootFetch { url: String, reason: String },

    /// The root page answered with a non-success status
    #[error("Error fetching URL {url}: HTTP {status}")]
    RootStatus { url: String, status: u16 },
}

impl CheckError {
    /// True when the failure happened while loading the root page
    pub fn is_root_failure(&self) -> bool {
        matches!(self, CheckError::RootFetch { .. } | CheckError::RootStatus { .. })
    }
}
