// src/checker/seen.rs
// =============================================================================
// The seen-set: makes sure no URL is fetched twice in one run.
//
// A URL is reserved when its fetch is dispatched, not when it finishes. So a
// second href pointing at the same target is skipped even while the first
// fetch is still waiting on the network.
//
// Rust concepts:
// - Mutex: the check and the insert happen under one lock, so two tasks can
//   never both believe they were first
// - HashSet::insert returns false when the value was already present, which
//   is exactly the check-and-mark we need
// =============================================================================

use std::collections::HashSet;
use std::sync::Mutex;
use url::Url;

#[derive(Debug, Default)]
pub struct SeenSet {
    urls: Mutex<HashSet<String>>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `url` was not seen before, and marks it seen
    pub fn check_and_mark(&self, url: &Url) -> bool {
        // A poisoned lock only means another task panicked mid-insert; the
        // set itself is still usable
        let mut urls = self.urls.lock().unwrap_or_else(|e| e.into_inner());
        urls.insert(url.as_str().to_string())
    }

    pub fn len(&self) -> usize {
        self.urls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
