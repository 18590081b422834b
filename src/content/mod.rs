//! Content fetching and analysis
//!
//! This module turns a URL into content features through a single HTTP GET:
//! - HTTP fetching with a fixed timeout and user agent
//! - HTML parsing for script and hidden-element counts
//! - A tagged outcome, so a failed fetch is a value rather than an error
//!
//! Analysis never fails past this boundary. Every network or decoding problem
//! becomes [`ContentOutcome::Failed`], whose feature view carries the
//! `response_time = -1` sentinel.

mod fetcher;
mod parser;

pub use fetcher::{build_http_client, fetch_page, FetchFailure, FetchSettings, FetchedPage};
pub use parser::{analyze_html, HtmlSignals, DANGER_SUBSTRINGS};

use crate::config::ExtractorConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Response time recorded when the fetch failed
pub const FAILED_RESPONSE_TIME: f64 = -1.0;

/// Server header value used when none is available
pub const UNKNOWN_SERVER: &str = "Unknown";

/// Features derived from the fetched page
///
/// Always fully populated; see [`ContentFeatures::failed`] for the values
/// used when the fetch did not succeed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentFeatures {
    pub script_count: usize,
    pub hidden_elements_count: usize,
    pub suspicious_scripts_count: usize,
    /// Seconds until the response arrived, or `-1` if the fetch failed
    pub response_time: f64,
    pub server_header: String,
}

impl ContentFeatures {
    /// The sentinel record for a failed fetch
    pub fn failed() -> Self {
        Self {
            script_count: 0,
            hidden_elements_count: 0,
            suspicious_scripts_count: 0,
            response_time: FAILED_RESPONSE_TIME,
            server_header: UNKNOWN_SERVER.to_string(),
        }
    }

    /// Returns true if these values are the failed-fetch sentinel
    pub fn is_fetch_failed(&self) -> bool {
        self.response_time == FAILED_RESPONSE_TIME
    }

    /// Builds features from a fetched page
    pub fn from_page(page: &FetchedPage) -> Self {
        let signals = analyze_html(&page.body);
        Self {
            script_count: signals.script_count,
            hidden_elements_count: signals.hidden_elements_count,
            suspicious_scripts_count: signals.suspicious_scripts_count,
            response_time: page.response_time.as_secs_f64(),
            server_header: page
                .server
                .clone()
                .unwrap_or_else(|| UNKNOWN_SERVER.to_string()),
        }
    }
}

/// Result of analyzing one URL's content
#[derive(Debug, Clone, PartialEq)]
pub enum ContentOutcome {
    /// The page was fetched and analyzed
    Fetched(ContentFeatures),

    /// The fetch failed; the reason has already been logged
    Failed { reason: FetchFailure },
}

impl ContentOutcome {
    /// Returns true if the page was fetched
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    /// Flattens the outcome into features, using the sentinel on failure
    pub fn into_features(self) -> ContentFeatures {
        match self {
            Self::Fetched(features) => features,
            Self::Failed { .. } => ContentFeatures::failed(),
        }
    }
}

/// Produces content features for a URL
///
/// Implementations must be total: every failure is reported through
/// [`ContentOutcome::Failed`], never by panicking or returning an error.
#[async_trait]
pub trait ContentAnalyzer: Send + Sync {
    async fn analyze(&self, url: &str) -> ContentOutcome;
}

/// Content analyzer backed by a real HTTP client
#[derive(Debug, Clone)]
pub struct HttpContentAnalyzer {
    client: Client,
}

impl HttpContentAnalyzer {
    /// Creates an analyzer with its own client
    pub fn new(settings: &FetchSettings) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(settings)?,
        })
    }

    /// Creates an analyzer from the extractor configuration
    pub fn from_config(config: &ExtractorConfig) -> Result<Self, reqwest::Error> {
        Self::new(&FetchSettings::from(config))
    }
}

#[async_trait]
impl ContentAnalyzer for HttpContentAnalyzer {
    async fn analyze(&self, url: &str) -> ContentOutcome {
        match fetch_page(&self.client, url).await {
            Ok(page) => {
                tracing::debug!(
                    url = %url,
                    status = page.status_code,
                    final_url = %page.final_url,
                    "Fetched page in {:.3}s",
                    page.response_time.as_secs_f64()
                );
                ContentOutcome::Fetched(ContentFeatures::from_page(&page))
            }
            Err(reason) => {
                tracing::warn!(url = %url, reason = %reason, "Error fetching URL");
                ContentOutcome::Failed { reason }
            }
        }
    }
}
