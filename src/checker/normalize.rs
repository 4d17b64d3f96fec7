// src/checker/normalize.rs
// =============================================================================
// Turns raw href attribute values into URLs worth checking.
//
// For every href we either produce an absolute, fragment-free http(s) URL or
// reject it. Rejected hrefs are simply skipped - a malformed href is not an
// error, it's just not a link we can check.
//
// We reject:
// - empty hrefs
// - same-page anchors ("#top")
// - javascript: pseudo-links
// - absolute http(s) hrefs, when the policy says to skip them
// - anything that doesn't resolve to http or https (mailto:, tel:, data:...)
//
// Rust concepts:
// - Option<T>: "a URL, or nothing" without needing an error type
// - Enums with Default: a named, overridable policy instead of a magic rule
// =============================================================================

use serde::{Deserialize, Serialize};
use url::Url;

/// Decides whether hrefs that already carry an http(s) scheme get checked
///
/// SkipAbsolute is the historical behavior of this tool: only relative and
/// path-style hrefs are checked, and links written out in full on the page
/// are left alone (even same-site ones). CheckAll checks them too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkPolicy {
    #[default]
    SkipAbsolute,
    CheckAll,
}

// Resolves an href against the page URL
//
// Parameters:
//   base: the URL relative hrefs are resolved against
//   href: the raw attribute value
//   policy: whether absolute http(s) hrefs are accepted
//
// Returns: Some(url) for a checkable link, None otherwise
//
// Examples (base = "http://x.test/docs/page"):
//   "/a"             -> Some("http://x.test/a")
//   "../b#intro"     -> Some("http://x.test/b")
//   "#top"           -> None
//   "http://y.test/" -> None with SkipAbsolute
pub fn normalize_href(base: &Url, href: &str, policy: LinkPolicy) -> Option<Url> {
    // Browsers ignore leading/trailing whitespace in href values
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') || is_javascript(href) {
        return None;
    }

    if policy == LinkPolicy::SkipAbsolute && has_http_scheme(href) {
        return None;
    }

    // join() handles both relative hrefs and absolute ones
    let mut url = base.join(href).ok()?;

    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }

    // Fragments never reach the server, so /a#x and /a#y are the same target
    url.set_fragment(None);
    Some(url)
}

fn is_javascript(href: &str) -> bool {
    href.get(..11)
        .map(|prefix| prefix.eq_ignore_ascii_case("javascript:"))
        .unwrap_or(false)
}

// True when the href is written as a full http:// or https:// URL
fn has_http_scheme(href: &str) -> bool {
    match Url::parse(href) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
