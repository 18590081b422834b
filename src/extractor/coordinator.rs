//! Extraction coordinator - bounded fan-out / fan-in over a URL batch
//!
//! This module contains the loop that drives a whole batch:
//! - Keeping at most `pool_size` extraction tasks in flight
//! - Running the lexical and content analyzers for each URL
//! - Dropping URLs whose fetch failed
//! - Isolating panics to the task that raised them
//! - Collecting accepted records in completion order

use crate::config::{Config, InputSource};
use crate::content::{ContentAnalyzer, HttpContentAnalyzer};
use crate::extractor::FeatureRecord;
use crate::input::{read_sources, LabeledUrl};
use crate::lexical::LexicalAnalyzer;
use crate::output::ExtractionStats;
use crate::InputError;
use chrono::Utc;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::{Id, JoinError, JoinSet};

/// Completions between progress log lines
const PROGRESS_INTERVAL: usize = 100;

/// Why a URL produced no record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipCause {
    /// The content fetch failed (`response_time == -1`)
    FetchFailed,

    /// The extraction task panicked
    Crashed(String),
}

/// A URL dropped from the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedUrl {
    pub url: String,
    pub cause: SkipCause,
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    /// Accepted records, in completion order
    pub records: Vec<FeatureRecord>,

    /// URLs that were dropped, with the reason
    pub skipped: Vec<SkippedUrl>,

    pub stats: ExtractionStats,
}


/// Main extraction structure
///
/// Holds the two analyzers and the pool size. Both analyzers are shared by
/// every task behind an `Arc`; neither carries mutable state.
pub struct Extractor {
    lexical: Arc<LexicalAnalyzer>,
    content: Arc<dyn ContentAnalyzer>,
    pool_size: usize,
}

impl Extractor {
    /// Creates an extractor with an HTTP content analyzer
    ///
    /// # Arguments
    ///
    /// * `config` - The pipeline configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Extractor)` - Ready to run
    /// * `Err(FeatureError)` - The HTTP client could not be built
    pub fn new(config: &Config) -> crate::Result<Self> {
        let content = HttpContentAnalyzer::from_config(&config.extractor)?;
        Ok(Self::with_analyzer(
            LexicalAnalyzer::new(&config.lexical),
            Arc::new(content),
            config.extractor.max_workers as usize,
        ))
    }

    /// Creates an extractor around any content analyzer
    ///
    /// A `pool_size` of 0 is treated as 1.
    pub fn with_analyzer(
        lexical: LexicalAnalyzer,
        content: Arc<dyn ContentAnalyzer>,
        pool_size: usize,
    ) -> Self {
        Self {
            lexical: Arc::new(lexical),
            content,
            pool_size: pool_size.max(1),
        }
    }

    /// Maximum number of tasks in flight
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Reads the given URL lists and runs extraction over all of them
    ///
    /// An unreadable list is the only error; nothing is fetched in that case.
    pub async fn run_sources(
        &self,
        sources: &[InputSource],
    ) -> Result<ExtractionReport, InputError> {
        let labeled_urls = read_sources(sources)?;
        Ok(self.run(labeled_urls).await)
    }

    /// Runs extraction over a batch of labeled URLs
    ///
    /// Every URL is visited exactly once. Failed fetches and panicking tasks
    /// are logged and dropped; they never affect other URLs. The returned
    /// records are in completion order, not input order.
    pub async fn run(&self, labeled_urls: Vec<LabeledUrl>) -> ExtractionReport {
        let started_at = Utc::now();
        let start_time = Instant::now();
        let total = labeled_urls.len();

        tracing::info!(
            "Starting extraction of {} URLs with {} workers",
            total,
            self.pool_size
        );

        let mut pending = labeled_urls.into_iter();
        let mut in_flight: JoinSet<FeatureRecord> = JoinSet::new();
        let mut task_urls: HashMap<Id, String> = HashMap::new();
        let mut records = Vec::new();
        let mut skipped = Vec::new();
        let mut crashed = 0;
        let mut completed = 0;

        loop {
            while in_flight.len() < self.pool_size {
                let Some(labeled) = pending.next() else {
                    break;
                };
                let url = labeled.url.clone();
                let handle = in_flight.spawn(extract_candidate(
                    labeled,
                    Arc::clone(&self.lexical),
                    Arc::clone(&self.content),
                ));
                task_urls.insert(handle.id(), url);
            }

            let Some(joined) = in_flight.join_next_with_id().await else {
                break;
            };
            completed += 1;

            // A panic surfaces as a JoinError; its task id recovers the URL
            let (id, result) = match joined {
                Ok((id, record)) => (id, Ok(record)),
                Err(e) => (e.id(), Err(e)),
            };
            let url = task_urls.remove(&id).unwrap_or_default();

            match result {
                Ok(record) if record.content.is_fetch_failed() => {
                    tracing::info!(url = %url, "Skipping URL due to failed response");
                    skipped.push(SkippedUrl {
                        url,
                        cause: SkipCause::FetchFailed,
                    });
                }
                Ok(record) => {
                    tracing::debug!(
                        domain = %record.lexical.domain,
                        label = %record.label,
                        "Accepted record"
                    );
                    records.push(record);
                }
                Err(e) => {
                    let reason = describe_join_error(e);
                    tracing::error!(url = %url, error = %reason, "Extraction task panicked");
                    crashed += 1;
                    skipped.push(SkippedUrl {
                        url,
                        cause: SkipCause::Crashed(reason),
                    });
                }
            }

            if completed % PROGRESS_INTERVAL == 0 {
                let elapsed = start_time.elapsed();
                let rate = completed as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
                tracing::info!(
                    "Progress: {}/{} URLs processed, {} accepted, {:.2} URLs/sec",
                    completed,
                    total,
                    records.len(),
                    rate
                );
            }
        }

        let stats = ExtractionStats {
            total,
            accepted: records.len(),
            fetch_failed: skipped.len() - crashed,
            crashed,
            started_at,
            finished_at: Utc::now(),
            elapsed_secs: start_time.elapsed().as_secs_f64(),
        };

        tracing::info!(
            "Extraction complete: {}/{} records accepted ({} fetch failures, {} crashed tasks) in {:.1}s",
            stats.accepted,
            stats.total,
            stats.fetch_failed,
            stats.crashed,
            stats.elapsed_secs
        );

        ExtractionReport {
            records,
            skipped,
            stats,
        }
    }
}

/// Runs both analyzers and merges their output with the label
async fn extract_candidate(
    labeled: LabeledUrl,
    lexical: Arc<LexicalAnalyzer>,
    content: Arc<dyn ContentAnalyzer>,
) -> FeatureRecord {
    let lexical_features = lexical.analyze(&labeled.url);
    let content_features = content.analyze(&labeled.url).await.into_features();
    FeatureRecord::new(lexical_features, content_features, labeled.label)
}

fn describe_join_error(e: JoinError) -> String {
    if e.is_panic() {
        panic_message(e.into_panic())
    } else {
        e.to_string()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
