// src/page/mod.rs
// =============================================================================
// This module loads the page whose links get checked.
//
// - loader: fetches the root page (the only fetch that can fail a run)
// - html: extracts raw href values from the page
//
// Only a single page is loaded; links are never followed to other pages.
// =============================================================================

mod html;
mod loader;

pub use html::{extract_hrefs, PageLinks};
pub use loader::{load_page, LoadedPage};
