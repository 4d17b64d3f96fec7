// src/checker/schedule.rs
// =============================================================================
// Runs link checks concurrently, with a hard cap on how many are in flight.
//
// How it works:
// 1. Normalize every href; rejected ones are dropped
// 2. Reserve each surviving URL in the seen-set; duplicates are dropped
// 3. Feed the unique URLs, in page order, into a stream that runs at most
//    `max_connections` fetches at once (buffer_unordered)
// 4. As each fetch finishes, record its outcome in the report
//
// The stream is only exhausted once every dispatched fetch has returned, so
// the report is never handed back with checks still running.
//
// Rust concepts:
// - Streams: like iterators, but each item may take time to produce
// - buffer_unordered(N): polls up to N futures at once and yields results in
//   completion order
// =============================================================================

use super::http::{BrokenReason, FetchOutcome, LinkFetcher};
use super::normalize::normalize_href;
use super::report::BrokenLinkReport;
use super::seen::SeenSet;
use crate::config::CheckConfig;
use crate::events::EventSink;
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};
use url::Url;

// Checks every href found on a page
//
// Parameters:
//   base: URL the hrefs are resolved against
//   hrefs: raw href values, in document order
//   config: concurrency bound, timeout and link policy
//   fetcher: does the actual checking
//   events: receives a warning for every link that times out
//
// Returns: the broken-link report (never fails; per-link problems are data)
pub async fn check_links<F, E>(
    base: &Url,
    hrefs: &[String],
    config: &CheckConfig,
    fetcher: &F,
    events: &E,
) -> BrokenLinkReport
where
    F: LinkFetcher + ?Sized,
    E: EventSink,
{
    let mut report = BrokenLinkReport::new();
    let seen = SeenSet::new();

    // Reserve URLs up front, so each one is marked before it can be dispatched
    let mut candidates = Vec::new();
    for href in hrefs {
        let Some(url) = normalize_href(base, href, config.link_policy) else {
            report.rejected += 1;
            continue;
        };

        if seen.check_and_mark(&url) {
            candidates.push(url);
        } else {
            report.skipped_duplicates += 1;
        }
    }

    debug!(
        unique = candidates.len(),
        rejected = report.rejected,
        duplicates = report.skipped_duplicates,
        "Dispatching link checks"
    );

    // validate() guarantees this is at least 1, but a zero would stall the
    // stream forever
    let limit = config.max_connections.max(1);
    let timeout = config.timeout;

    let mut outcomes = stream::iter(candidates)
        .map(|url| async move {
            let outcome = fetcher.fetch(&url, timeout).await;
            if matches!(outcome, FetchOutcome::Broken(BrokenReason::Timeout)) {
                warn!(url = %url, "Link check timed out");
                events.warning(format!("Timeout occurred while checking {}", url));
            }
            (url, outcome)
        })
        .buffer_unordered(limit);

    while let Some((url, outcome)) = outcomes.next().await {
        report.record(&url, outcome);
    }

    report
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is `fetcher` a generic `&F` instead of a concrete HttpFetcher?
//    - Tests pass a fake that never touches the network
//    - `?Sized` also allows `&dyn LinkFetcher`
//
// 2. Why not tokio::spawn each check?
//    - buffer_unordered polls all running fetches from this one task
//    - Network waits don't block each other, and we can borrow `fetcher`
//      and `events` instead of wrapping them in Arc
//
// 3. Why reserve URLs before the stream starts?
//    - The seen-set must be marked no later than dispatch; doing it up
//      front means a duplicate can never even be queued
// -----------------------------------------------------------------------------
