// src/engine.rs
// =============================================================================
// One complete check run: load the page, check its links, report.
//
// What happens here:
// 1. Validate the configuration and the starting URL
// 2. Load the root page (a failure here ends the run with an error event)
// 3. Check every link on it, concurrently
// 4. Warn if the run went over its soft time budget
// 5. Emit the result event and hand the report back
//
// No state survives between runs: every call builds its own HTTP client and
// seen-set.
// =============================================================================

use crate::checker::{check_links, BrokenLinkReport, HttpFetcher};
use crate::config::CheckConfig;
use crate::error::CheckError;
use crate::events::{CheckEvent, EventSink};
use crate::page::load_page;
use std::time::Instant;
use tracing::{error, info, warn};
use url::Url;

pub async fn check_page<E: EventSink>(
    url: &str,
    config: &CheckConfig,
    events: &E,
) -> Result<BrokenLinkReport, CheckError> {
    match run(url, config, events).await {
        Ok(report) => Ok(report),
        Err(e) => {
            error!(url = %url, error = %e, "Check run failed");
            events.error(e.to_string());
            Err(e)
        }
    }
}

async fn run<E: EventSink>(
    url: &str,
    config: &CheckConfig,
    events: &E,
) -> Result<BrokenLinkReport, CheckError> {
    let started = Instant::now();
    config.validate()?;
    let root = parse_root_url(url)?;

    info!(
        url = %root,
        max_connections = config.max_connections,
        timeout_secs = config.timeout.as_secs_f64(),
        "Starting link check"
    );

    let fetcher = HttpFetcher::new(&config.user_agent)?;
    let page = load_page(fetcher.client(), &root, config.timeout).await?;

    let mut report = check_links(&page.base, &page.hrefs, config, &fetcher, events).await;

    let elapsed = started.elapsed();
    report.elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    if elapsed > config.soft_budget {
        warn!(elapsed_secs = elapsed.as_secs_f64(), "Run exceeded soft time budget");
        events.warning(format!(
            "Check took {:.1}s, longer than the {}s budget",
            elapsed.as_secs_f64(),
            config.soft_budget.as_secs()
        ));
    }

    info!(
        checked = report.checked,
        broken = report.broken.len(),
        elapsed_ms = report.elapsed_ms,
        "Link check finished"
    );

    events.emit(CheckEvent::Result(report.urls()));
    Ok(report)
}

fn parse_root_url(url: &str) -> Result<Url, CheckError> {
    let parsed = Url::parse(url.trim()).map_err(|e| CheckError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CheckError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::BrokenReason;
    use std::net::SocketAddr;
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    fn drain(rx: &mut mpsc::UnboundedReceiver<CheckEvent>) -> Vec<CheckEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    // A port nothing listens on
    fn dead_addr() -> SocketAddr {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    }

    // A server that accepts connections and never answers
    async fn silent_addr() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        addr
    }

    #[tokio::test]
    async fn test_end_to_end_report() {
        let mut server = mockito::Server::new_async().await;
        let dead = dead_addr();
        let page = format!(
            r##"<html><body>
                <a href="/a">ok</a>
                <a href="/b">missing</a>
                <a href="/a#frag">same as a</a>
                <a href="//{dead}/d">refused</a>
                <a href="http://external.test/e">external</a>
                <a href="#top">top</a>
            </body></html>"##
        );
        let _root = server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(page)
            .create_async()
            .await;
        let a = server.mock("GET", "/a").with_status(200).expect(1).create_async().await;
        let _b = server.mock("GET", "/b").with_status(404).create_async().await;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let report = check_page(&server.url(), &CheckConfig::default(), &tx).await.unwrap();

        a.assert_async().await;

        let b_url = format!("{}/b", server.url());
        let d_url = format!("http://{}/d", dead);
        let mut urls = report.urls();
        urls.sort();
        let mut expected = vec![b_url.clone(), d_url.clone()];
        expected.sort();
        assert_eq!(urls, expected);

        assert_eq!(report.checked, 3);
        assert_eq!(report.skipped_duplicates, 1);
        assert_eq!(report.rejected, 2);

        let b = report.broken.iter().find(|l| l.url == b_url).unwrap();
        assert_eq!(b.reason, BrokenReason::HttpError { status: 404 });
        let d = report.broken.iter().find(|l| l.url == d_url).unwrap();
        assert!(matches!(d.reason, BrokenReason::ConnectionError { .. }));

        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], CheckEvent::Result(list) if list.len() == 2));
    }

    #[tokio::test]
    async fn test_root_failure_aborts_run() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let url = format!("http://{}/", dead_addr());

        let err = check_page(&url, &CheckConfig::default(), &tx).await.unwrap_err();
        assert!(err.is_root_failure());

        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], CheckEvent::Error(msg) if msg.contains("Error fetching URL")));
    }

    #[tokio::test]
    async fn test_root_error_status_checks_nothing() {
        let mut server = mockito::Server::new_async().await;
        let _root = server
            .mock("GET", "/")
            .with_status(500)
            .with_body(r#"<a href="/a">a</a>"#)
            .create_async()
            .await;
        let a = server.mock("GET", "/a").expect(0).create_async().await;

        let err = check_page(&server.url(), &CheckConfig::default(), &crate::NullSink)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::RootStatus { status: 500, .. }));
        a.assert_async().await;
    }

    #[tokio::test]
    async fn test_slow_link_times_out_without_blocking_others() {
        let mut server = mockito::Server::new_async().await;
        let silent = silent_addr().await;
        let page = format!(r#"<a href="//{silent}/slow">slow</a><a href="/ok">ok</a>"#);
        let _root = server
            .mock("GET", "/")
            .with_status(200)
            .with_body(page)
            .create_async()
            .await;
        let ok = server.mock("GET", "/ok").with_status(200).expect(1).create_async().await;

        let config = CheckConfig::default().with_timeout(Duration::from_millis(500));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let report = check_page(&server.url(), &config, &tx).await.unwrap();

        ok.assert_async().await;
        let slow_url = format!("http://{}/slow", silent);
        assert_eq!(report.urls(), vec![slow_url.clone()]);
        assert_eq!(report.broken[0].reason, BrokenReason::Timeout);

        let events = drain(&mut rx);
        assert!(events.contains(&CheckEvent::Warning(format!(
            "Timeout occurred while checking {}",
            slow_url
        ))));
        assert!(matches!(events.last(), Some(CheckEvent::Result(_))));
    }

    #[tokio::test]
    async fn test_soft_budget_overrun_only_warns() {
        let mut server = mockito::Server::new_async().await;
        let _root = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("<p>no links</p>")
            .create_async()
            .await;

        let config = CheckConfig::default().with_soft_budget(Duration::ZERO);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let report = check_page(&server.url(), &config, &tx).await.unwrap();
        assert!(report.is_clean());

        let events = drain(&mut rx);
        assert!(matches!(&events[0], CheckEvent::Warning(msg) if msg.contains("budget")));
        assert_eq!(events[1], CheckEvent::Result(Vec::new()));
    }

    #[tokio::test]
    async fn test_invalid_inputs() {
        let err = check_page("not a url", &CheckConfig::default(), &crate::NullSink)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::InvalidUrl { .. }));

        let err = check_page("ftp://x.test/", &CheckConfig::default(), &crate::NullSink)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::InvalidUrl { .. }));

        let config = CheckConfig::default().with_max_connections(0);
        let err = check_page("http://x.test/", &config, &crate::NullSink).await.unwrap_err();
        assert!(matches!(err, CheckError::InvalidConfig(_)));
    }
}
