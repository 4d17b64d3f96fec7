// src/page/loader.rs
// =============================================================================
// Fetches the root page whose links we are going to check.
//
// This is the one fetch that is allowed to fail the whole run: if the page
// can't be loaded there's nothing to check. The same timeout as for
// individual links applies.
//
// Relative hrefs are resolved against the URL we actually ended up on after
// redirects, or against the page's <base href> when it has one - the same
// thing a browser would do.
// =============================================================================

use super::html::extract_hrefs;
use crate::checker::{categorize_error, FetchOutcome};
use crate::error::CheckError;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// A loaded root page, ready for link checking
#[derive(Debug, Clone)]
pub struct LoadedPage {
    /// Final URL after redirects
    pub url: Url,
    /// URL relative hrefs resolve against
    pub base: Url,
    /// Raw anchor hrefs, in document order
    pub hrefs: Vec<String>,
}

// Fetches a web page and extracts its links
//
// Parameters:
//   client: shared HTTP client
//   url: the page to load
//   timeout: per-request timeout
//
// Returns: the loaded page, or a root-level CheckError
pub async fn load_page(client: &Client, url: &Url, timeout: Duration) -> Result<LoadedPage, CheckError> {
    debug!(url = %url, "Loading root page");

    let response = client
        .get(url.clone())
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| root_fetch_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CheckError::RootStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let final_url = response.url().clone();
    let html = response.text().await.map_err(|e| root_fetch_error(url, e))?;

    let links = extract_hrefs(&html);
    let base = resolve_base(&final_url, links.base_href.as_deref());

    debug!(url = %final_url, base = %base, hrefs = links.hrefs.len(), "Root page loaded");

    Ok(LoadedPage {
        url: final_url,
        base,
        hrefs: links.hrefs,
    })
}

// Describes the failure the same way a broken link would be described
fn root_fetch_error(url: &Url, error: reqwest::Error) -> CheckError {
    let reason = match categorize_error(error) {
        FetchOutcome::Broken(reason) => reason.to_string(),
        FetchOutcome::Ok => "unknown error".to_string(),
    };
    CheckError::RootFetch {
        url: url.to_string(),
        reason,
    }
}

// A <base href> only counts if it resolves to an http(s) URL
fn resolve_base(page_url: &Url, base_href: Option<&str>) -> Url {
    base_href
        .and_then(|href| page_url.join(href.trim()).ok())
        .filter(|base| matches!(base.scheme(), "http" | "https"))
        .unwrap_or_else(|| page_url.clone())
}
