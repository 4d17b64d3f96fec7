// src/checker/mod.rs
// =============================================================================
// This module contains the link checking engine.
//
// Submodules:
// - normalize: Turns raw hrefs into absolute, checkable URLs
// - seen: Makes sure each URL is only fetched once per run
// - http: Makes HTTP requests to check if links are alive
// - schedule: Runs the checks concurrently under a fixed limit
// - report: Collects broken links into the final report
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

mod http;
mod normalize;
mod report;
mod schedule;
mod seen;

// Re-export public items from submodules
// This lets users write `checker::check_links()` instead of
// `checker::schedule::check_links()`
pub use http::{BrokenReason, FetchOutcome, HttpFetcher, LinkFetcher};
pub use normalize::{normalize_href, LinkPolicy};
pub use report::{BrokenLink, BrokenLinkReport};
pub use schedule::check_links;
pub use seen::SeenSet;

pub(crate) use http::categorize_error;
