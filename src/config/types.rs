use serde::Deserialize;
use std::time::Duration;

/// Words whose presence in a URL is commonly associated with phishing lures
pub const DEFAULT_SUSPICIOUS_WORDS: [&str; 5] =
    ["confirm", "account", "banking", "secure", "update"];

/// Well-known URL shortening hosts
pub const DEFAULT_SHORTENING_SERVICES: [&str; 3] = ["bit.ly", "goo.gl", "tinyurl.com"];

/// Main configuration structure for the extraction pipeline
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub lexical: LexicalConfig,
    #[serde(default)]
    pub input: Vec<InputSource>,
    pub output: OutputConfig,
}

/// Worker pool and HTTP fetch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum number of extraction tasks in flight
    #[serde(rename = "max-workers", default = "default_max_workers")]
    pub max_workers: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// User-Agent header sent with every fetch
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl ExtractorConfig {
    /// The per-request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Domain parameters for the lexical analyzer
#[derive(Debug, Clone, Deserialize)]
pub struct LexicalConfig {
    /// Keywords counted (case-insensitively) in every URL
    #[serde(rename = "suspicious-words", default = "default_suspicious_words")]
    pub suspicious_words: Vec<String>,

    /// Hosts treated as URL shorteners
    #[serde(rename = "shortening-services", default = "default_shortening_services")]
    pub shortening_services: Vec<String>,
}

impl Default for LexicalConfig {
    fn default() -> Self {
        Self {
            suspicious_words: default_suspicious_words(),
            shortening_services: default_shortening_services(),
        }
    }
}

/// A line-delimited URL list to read
#[derive(Debug, Clone, Deserialize)]
pub struct InputSource {
    /// Path to the `url` / `url,label` file
    pub path: String,

    /// Label used for lines without an explicit one
    #[serde(rename = "default-label", default)]
    pub default_label: u8,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON feature file
    #[serde(rename = "features-path")]
    pub features_path: String,
}

fn default_max_workers() -> u32 {
    30
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_suspicious_words() -> Vec<String> {
    DEFAULT_SUSPICIOUS_WORDS.iter().map(|w| w.to_string()).collect()
}

fn default_shortening_services() -> Vec<String> {
    DEFAULT_SHORTENING_SERVICES
        .iter()
        .map(|s| s.to_string())
        .collect()
}
