// src/page/html.rs
// =============================================================================
// This module pulls raw href values out of an HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser), so broken markup still
//   parses the way a browser would
//
// Hrefs are returned exactly as written, in document order. Resolving them
// is the normalizer's job.
// =============================================================================

use scraper::{Html, Selector};

/// What we need from a parsed page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    /// href of every <a> element, in document order
    pub hrefs: Vec<String>,
    /// href of the first <base> element, if the page declares one
    pub base_href: Option<String>,
}

// Extracts anchor hrefs (and any <base href>) from HTML content
//
// Example:
//   html = "<a href='/docs'>Docs</a><a href='#top'>Top</a>"
//   result.hrefs = ["/docs", "#top"]
pub fn extract_hrefs(html: &str) -> PageLinks {
    let document = Html::parse_document(html);

    // Both selectors are constants, so parsing can't fail at runtime
    let anchors = Selector::parse("a[href]").expect("static selector is valid");
    let base = Selector::parse("base[href]").expect("static selector is valid");

    let hrefs = document
        .select(&anchors)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect();

    let base_href = document
        .select(&base)
        .next()
        .and_then(|element| element.value().attr("href"))
        .map(str::to_string);

    PageLinks { hrefs, base_href }
}
