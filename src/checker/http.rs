// src/checker/http.rs
// =============================================================================
// This module checks if a single URL is alive by making an HTTP request.
//
// Key functionality:
// - Makes an HTTP GET request with a per-request timeout
// - Reads the whole response body (some failures only show up mid-stream)
// - Classifies the result as OK or Broken, and if broken, why:
//   timeout, HTTP error status, or connection problem
//
// The fetcher sits behind the LinkFetcher trait so the scheduler can be
// driven by something other than a real network (see the scheduler tests).
//
// Rust concepts:
// - Traits: a shared interface that different types can implement
// - async-trait: lets trait methods be async
// - Enums with data: each broken reason carries its own details
// =============================================================================

use crate::error::CheckError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

// Redirects are followed, up to this many hops
const MAX_REDIRECTS: usize = 10;

/// Why a link counts as broken
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum BrokenReason {
    /// No complete response within the timeout
    Timeout,
    /// The server answered with a non-2xx status
    HttpError { status: u16 },
    /// DNS failure, refused connection, TLS problem, redirect loop...
    ConnectionError { message: String },
}

impl std::fmt::Display for BrokenReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrokenReason::Timeout => write!(f, "timeout"),
            BrokenReason::HttpError { status } => write!(f, "HTTP {}", status),
            BrokenReason::ConnectionError { message } => write!(f, "connection error: {}", message),
        }
    }
}

/// The result of checking one link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Ok,
    Broken(BrokenReason),
}

/// Something that can check whether a URL is reachable
///
/// Implementations must never fail: every problem is turned into a
/// FetchOutcome::Broken.
#[async_trait]
pub trait LinkFetcher: Send + Sync {
    async fn fetch(&self, url: &Url, timeout: Duration) -> FetchOutcome;
}

/// The real fetcher, backed by a shared reqwest client
///
/// Client is cheap to clone (it's a reference counter around a connection
/// pool), so every fetch in a run shares the same pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a client with our redirect policy and User-Agent
    pub fn new(user_agent: &str) -> Result<Self, CheckError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(CheckError::Client)?;
        Ok(Self { client })
    }

    /// The underlying client, so the page loader can share its pool
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl LinkFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url, timeout: Duration) -> FetchOutcome {
        debug!(url = %url, "Checking link");

        let response = match self.client.get(url.clone()).timeout(timeout).send().await {
            Ok(response) => response,
            Err(e) => return categorize_error(e),
        };

        let status = response.status();
        if !status.is_success() {
            return FetchOutcome::Broken(BrokenReason::HttpError {
                status: status.as_u16(),
            });
        }

        // Drain the body; the request timeout still applies while streaming
        match response.bytes().await {
            Ok(_) => FetchOutcome::Ok,
            Err(e) => categorize_error(e),
        }
    }
}

// Categorizes the different error types from reqwest
//
// Timeouts get their own reason because the caller reports them separately.
// Everything else is some flavor of "couldn't talk to the server".
pub(crate) fn categorize_error(error: reqwest::Error) -> FetchOutcome {
    if error.is_timeout() {
        return FetchOutcome::Broken(BrokenReason::Timeout);
    }

    let message = if error.is_redirect() {
        "Too many redirects".to_string()
    } else if error.is_connect() {
        format!("Connection failed: {}", root_cause(&error))
    } else {
        root_cause(&error)
    };

    FetchOutcome::Broken(BrokenReason::ConnectionError { message })
}

// reqwest's top-level message is generic ("error sending request"); the
// innermost source usually says what actually happened
fn root_cause(error: &reqwest::Error) -> String {
    let mut source: &dyn std::error::Error = error;
    while let Some(next) = source.source() {
        source = next;
    }
    source.to_string()
}
