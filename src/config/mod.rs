//! Configuration module for the extraction pipeline
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use phishing_features::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("features.toml")).unwrap();
//! println!("Worker pool size: {}", config.extractor.max_workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ExtractorConfig, InputSource, LexicalConfig, OutputConfig,
    DEFAULT_SHORTENING_SERVICES, DEFAULT_SUSPICIOUS_WORDS,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
