// src/checker/report.rs
// =============================================================================
// Collects the outcome of a run into a report.
//
// Only broken links are kept; OK links just bump a counter. The report is
// built fresh for every run and handed back to the caller when done.
// =============================================================================

use super::http::{BrokenReason, FetchOutcome};
use serde::{Deserialize, Serialize};
use url::Url;

/// One broken link and why it failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLink {
    pub url: String,
    #[serde(flatten)]
    pub reason: BrokenReason,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrokenLinkReport {
    /// Broken links, in the order their checks completed
    pub broken: Vec<BrokenLink>,
    /// Number of unique URLs actually fetched
    pub checked: usize,
    /// Hrefs that resolved to a URL already being checked
    pub skipped_duplicates: usize,
    /// Hrefs the normalizer rejected
    pub rejected: usize,
    /// Wall-clock time of the whole run, in milliseconds
    pub elapsed_ms: u64,
}

impl BrokenLinkReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one fetch outcome into the report
    pub fn record(&mut self, url: &Url, outcome: FetchOutcome) {
        self.checked += 1;
        if let FetchOutcome::Broken(reason) = outcome {
            self.broken.push(BrokenLink {
                url: url.to_string(),
                reason,
            });
        }
    }

    /// Just the broken URLs
    pub fn urls(&self) -> Vec<String> {
        self.broken.iter().map(|link| link.url.clone()).collect()
    }

    pub fn is_clean(&self) -> bool {
        self.broken.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_broken_outcomes_are_kept() {
        let mut report = BrokenLinkReport::new();
        let ok = Url::parse("http://x.test/a").unwrap();
        let bad = Url::parse("http://x.test/b").unwrap();

        report.record(&ok, FetchOutcome::Ok);
        report.record(&bad, FetchOutcome::Broken(BrokenReason::HttpError { status: 404 }));

        assert_eq!(report.checked, 2);
        assert_eq!(report.urls(), vec!["http://x.test/b".to_string()]);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_json_shape() {
        let mut report = BrokenLinkReport::new();
        let bad = Url::parse("http://x.test/b").unwrap();
        report.record(&bad, FetchOutcome::Broken(BrokenReason::HttpError { status: 404 }));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["broken"][0]["url"], "http://x.test/b");
        assert_eq!(json["broken"][0]["reason"], "http_error");
        assert_eq!(json["broken"][0]["status"], 404);
    }
}
