// src/lib.rs
// =============================================================================
// link-inspector: checks every link on a web page and reports the broken ones.
//
// The library is the engine; src/main.rs is just one front-end for it.
//
// Typical use:
//
//   let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//   let report = link_inspector::check_page(url, &CheckConfig::default(), &tx).await?;
//
// Progress signals (warnings, errors, the final result) arrive on `rx`.
// =============================================================================

pub mod checker;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod page;

pub use checker::{BrokenLink, BrokenLinkReport, BrokenReason, FetchOutcome, LinkPolicy};
pub use config::CheckConfig;
pub use engine::check_page;
pub use error::CheckError;
pub use events::{CheckEvent, EventSink, NullSink};
