//! Run statistics
//!
//! Counts describing how a batch went. Partial success is the normal case:
//! some share of any real URL list will be offline.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Summary of one extraction run
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionStats {
    /// URLs dispatched
    pub total: usize,

    /// Records emitted
    pub accepted: usize,

    /// URLs dropped because the fetch failed
    pub fetch_failed: usize,

    /// URLs dropped because their task panicked
    pub crashed: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_secs: f64,
}

impl ExtractionStats {
    /// Share of dispatched URLs that produced a record, as a percentage
    pub fn acceptance_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.accepted as f64 / self.total as f64) * 100.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &ExtractionStats) {
    println!("=== Extraction Statistics ===\n");

    println!("Run:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    println!("  Finished: {}", stats.finished_at.to_rfc3339());
    println!("  Duration: {:.1}s", stats.elapsed_secs);
    println!();

    println!("URLs:");
    println!("  Total: {}", stats.total);
    println!("  Accepted: {}", stats.accepted);
    println!("  Fetch failed: {}", stats.fetch_failed);
    if stats.crashed > 0 {
        println!("  Crashed: {}", stats.crashed);
    }
    println!();

    println!(
        "Acceptance Rate: {:.1}% ({} / {} URLs produced records)",
        stats.acceptance_rate(),
        stats.accepted,
        stats.total
    );
}
