//! Engine error taxonomy.
//!
//! Most defect classes in this system are reported, not raised: a missing
//! input table fails the specific measures and quality rules depending on it
//! (with a missing-data detail) while everything else still runs, integrity
//! violations surface as quality-rule failures, and calculation edge cases
//! have defined numeric fallbacks. The only hard error is programmatic
//! misuse: an inverted reporting period.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A reporting period whose end precedes its start.
    #[error("invalid reporting period: start {start} is after end {end}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },
}
