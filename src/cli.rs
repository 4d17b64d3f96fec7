// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
// =============================================================================

use clap::Parser;
use link_inspector::config::{DEFAULT_MAX_CONNECTIONS, DEFAULT_SOFT_BUDGET_SECS, DEFAULT_TIMEOUT_SECS};
use link_inspector::{CheckConfig, LinkPolicy};
use std::time::Duration;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "link-inspector",
    version,
    about = "Checks every link on a web page and lists the broken ones",
    long_about = "link-inspector loads a single page, checks each link on it concurrently, \
                  and reports the ones that fail, time out, or return an error status."
)]
pub struct Cli {
    /// Page to check (e.g., https://example.com)
    pub url: String,

    /// Maximum number of links checked at the same time
    #[arg(long, env = "LINK_INSPECTOR_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: usize,

    /// Per-request timeout in seconds
    #[arg(long, env = "LINK_INSPECTOR_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Also check links written as full http(s) URLs
    ///
    /// By default only relative links (like /docs or ../about) are checked
    #[arg(long)]
    pub check_absolute: bool,

    /// Warn when the whole check takes longer than this many seconds
    #[arg(long, default_value_t = DEFAULT_SOFT_BUDGET_SECS)]
    pub budget: u64,

    /// Output results in JSON format instead of a list
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Turns the parsed arguments into an engine configuration
    pub fn to_config(&self) -> CheckConfig {
        let policy = if self.check_absolute {
            LinkPolicy::CheckAll
        } else {
            LinkPolicy::SkipAbsolute
        };

        CheckConfig::default()
            .with_max_connections(self.max_connections)
            .with_timeout(Duration::from_secs(self.timeout))
            .with_link_policy(policy)
            .with_soft_budget(Duration::from_secs(self.budget))
    }
}
