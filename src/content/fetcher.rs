//! HTTP fetcher implementation
//!
//! This module handles the single outbound request made per URL:
//! - Building the shared HTTP client (timeout, user agent, compression)
//! - Timing the request up to the arrival of the response
//! - Classifying every failure into a [`FetchFailure`]

use crate::config::ExtractorConfig;
use reqwest::{header, Client};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Why a fetch produced no usable page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("failed to read body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Request(String),
}

/// Settings for the fetch client
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Total per-request timeout, connect through body
    pub timeout: Duration,
    /// Value of the User-Agent header
    pub user_agent: String,
}

impl From<&ExtractorConfig> for FetchSettings {
    fn from(config: &ExtractorConfig) -> Self {
        Self {
            timeout: config.request_timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self::from(&ExtractorConfig::default())
    }
}

/// A successfully fetched page
#[derive(Debug)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status_code: u16,
    /// `Server` header value, if present and readable
    pub server: Option<String>,
    /// Decoded body text
    pub body: String,
    /// Time from sending the request until the response headers arrived
    pub response_time: Duration,
}

/// Builds the HTTP client shared by all workers
///
/// # Example
///
/// ```no_run
/// use phishing_features::content::{build_http_client, FetchSettings};
///
/// let client = build_http_client(&FetchSettings::default()).unwrap();
/// ```
pub fn build_http_client(settings: &FetchSettings) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(settings.user_agent.as_str())
        .timeout(settings.timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with one GET request
///
/// Redirects are followed by the client. Any non-2xx final status is a
/// failure, as is a body that cannot be read within the timeout.
pub async fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage, FetchFailure> {
    let start = Instant::now();
    let response = client.get(url).send().await.map_err(classify_error)?;
    let response_time = start.elapsed();

    let status = response.status();
    if !status.is_success() {
        return Err(FetchFailure::Status(status.as_u16()));
    }

    let final_url = response.url().to_string();
    let server = response
        .headers()
        .get(header::SERVER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    let body = response.text().await.map_err(|e| {
        if e.is_timeout() {
            FetchFailure::Timeout
        } else {
            FetchFailure::Body(e.to_string())
        }
    })?;

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        server,
        body,
        response_time,
    })
}

/// Maps a reqwest send error onto a failure kind
fn classify_error(e: reqwest::Error) -> FetchFailure {
    if e.is_timeout() {
        FetchFailure::Timeout
    } else if e.is_connect() {
        FetchFailure::Connect(e.to_string())
    } else {
        FetchFailure::Request(e.to_string())
    }
}
