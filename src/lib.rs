//! Phishing-features: a URL feature extraction pipeline
//!
//! This crate turns labeled lists of URLs into flat feature records for
//! classifier training. Each URL is analyzed lexically and, through one
//! bounded HTTP fetch, by the content of the page it points to.

pub mod config;
pub mod content;
pub mod extractor;
pub mod input;
pub mod lexical;
pub mod output;

use thiserror::Error;

/// Main error type for the extraction pipeline
///
/// Per-URL failures never show up here; they are absorbed by the content
/// analyzer and the orchestrator. Only whole-run problems propagate.
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid path in config: {0}")]
    InvalidPath(String),
}

/// Errors reading a labeled URL list
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read URL list {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Errors persisting feature records
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, FeatureError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use content::{ContentAnalyzer, ContentFeatures, ContentOutcome, HttpContentAnalyzer};
pub use extractor::{extract, ExtractionReport, Extractor, FeatureRecord};
pub use input::{Label, LabeledUrl};
pub use lexical::{LexicalAnalyzer, LexicalFeatures};
