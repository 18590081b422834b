//! Lexical URL analysis
//!
//! Structural and statistical features derived from the URL string alone.
//! Nothing here performs I/O, and every function is total: malformed input
//! degrades to zero or empty values instead of an error.

mod domain;
mod entropy;
mod parts;

pub use domain::{decompose_host, HostDecomposition};
pub use entropy::shannon_entropy;
pub use parts::{split_url, ParsedHost, UrlParts};

use crate::config::LexicalConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const IPV4_PATTERN: &str = r"\b(?:\d{1,3}\.){3}\d{1,3}\b";

static IPV4_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IPV4_PATTERN).expect("Failed to compile IPv4 pattern - this is a bug"));

/// Features computed from the URL text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalFeatures {
    /// Number of characters in the URL
    pub length: usize,
    pub is_https: bool,
    /// Registrable label without the public suffix
    pub domain: String,
    pub num_subdomains: usize,
    pub path_length: usize,
    pub num_query_components: usize,
    /// Shannon entropy (bits) of the character distribution
    pub entropy: f64,
    /// A dotted IPv4-like pattern appears anywhere in the URL
    pub contains_ip: bool,
    pub uses_shortening_service: bool,
    pub suspicious_words_count: usize,
    /// Count of `/` characters
    pub url_depth: usize,
    /// Count of `.` characters
    pub tld_count: usize,
    /// Count of characters outside `[A-Za-z0-9_]`
    pub special_char_count: usize,
}

/// Computes [`LexicalFeatures`] with a fixed keyword and shortener vocabulary
///
/// The analyzer holds only immutable lists, so one instance can be shared by
/// reference across every worker.
#[derive(Debug, Clone)]
pub struct LexicalAnalyzer {
    suspicious_words: Vec<String>,
    shortening_services: Vec<String>,
}

impl LexicalAnalyzer {
    /// Creates an analyzer from configured word lists
    pub fn new(config: &LexicalConfig) -> Self {
        Self {
            suspicious_words: config
                .suspicious_words
                .iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
            shortening_services: config
                .shortening_services
                .iter()
                .map(|s| s.trim().trim_end_matches('.').to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    /// Analyzes one URL
    ///
    /// # Examples
    ///
    /// ```
    /// use phishing_features::lexical::LexicalAnalyzer;
    ///
    /// let features = LexicalAnalyzer::default().analyze("http://a.test/confirm-account");
    /// assert!(!features.is_https);
    /// assert_eq!(features.domain, "a");
    /// assert_eq!(features.suspicious_words_count, 2);
    /// assert_eq!(features.url_depth, 3);
    /// ```
    pub fn analyze(&self, url: &str) -> LexicalFeatures {
        let parts = split_url(url);
        let host = parts.host();
        let decomposition = host.as_ref().map(decompose_host).unwrap_or_default();

        LexicalFeatures {
            length: url.chars().count(),
            is_https: parts.is_https(),
            domain: decomposition.domain.clone(),
            num_subdomains: decomposition.num_subdomains(),
            path_length: parts.path.chars().count(),
            num_query_components: count_query_components(parts.query),
            entropy: shannon_entropy(url),
            contains_ip: IPV4_REGEX.is_match(url),
            uses_shortening_service: host
                .as_ref()
                .map(|h| self.is_shortener(h))
                .unwrap_or(false),
            suspicious_words_count: self.count_suspicious_words(url),
            url_depth: url.matches('/').count(),
            tld_count: url.matches('.').count(),
            special_char_count: count_special_chars(url),
        }
    }

    /// Sum over keywords of their non-overlapping occurrences, ignoring case
    pub fn count_suspicious_words(&self, url: &str) -> usize {
        let lowered = url.to_lowercase();
        self.suspicious_words
            .iter()
            .map(|word| lowered.matches(word.as_str()).count())
            .sum()
    }

    fn is_shortener(&self, host: &ParsedHost) -> bool {
        let ParsedHost::Domain(name) = host else {
            return false;
        };

        self.shortening_services.iter().any(|service| {
            name == service
                || name
                    .strip_suffix(service.as_str())
                    .map(|prefix| prefix.ends_with('.'))
                    .unwrap_or(false)
        })
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new(&LexicalConfig::default())
    }
}

fn count_query_components(query: Option<&str>) -> usize {
    match query {
        Some(q) if !q.is_empty() => q.split('&').count(),
        _ => 0,
    }
}

fn count_special_chars(url: &str) -> usize {
    url.chars()
        .filter(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
        .count()
}
