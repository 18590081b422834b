//! Output module for persisting extraction results
//!
//! This module handles:
//! - Writing accepted feature records as a JSON array
//! - Reading feature files back
//! - Recording and displaying run statistics

mod json;
pub mod stats;

pub use json::{read_records, write_records};
pub use stats::{print_statistics, ExtractionStats};
