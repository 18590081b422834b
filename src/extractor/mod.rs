//! Extraction orchestration
//!
//! This module drives feature extraction over whole URL batches:
//! - Fanning URLs out onto a bounded pool of tasks
//! - Merging lexical and content features with the label
//! - Filtering out failed fetches and isolating task panics
//! - Persisting the accepted records

mod coordinator;
mod record;

pub use coordinator::{ExtractionReport, Extractor, SkipCause, SkippedUrl};
pub use record::FeatureRecord;

use crate::config::Config;
use crate::output::write_records;
use crate::Result;
use std::path::Path;

/// Runs a complete extraction
///
/// This is the main entry point. It will:
/// 1. Read every configured URL list (fatal if one is unreadable)
/// 2. Build the HTTP client
/// 3. Extract features for every URL on the worker pool
/// 4. Write the accepted records to the configured JSON file
///
/// # Example
///
/// ```no_run
/// use phishing_features::config::load_config;
/// use phishing_features::extractor::extract;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("features.toml"))?;
/// let report = extract(&config).await?;
/// println!("{} records", report.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn extract(config: &Config) -> Result<ExtractionReport> {
    let extractor = Extractor::new(config)?;
    let report = extractor.run_sources(&config.input).await?;

    let path = Path::new(&config.output.features_path);
    write_records(path, &report.records)?;
    tracing::info!(
        "Saved {} feature records to {}",
        report.records.len(),
        path.display()
    );

    Ok(report)
}
