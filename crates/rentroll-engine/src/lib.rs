//! Rent roll resolution and net-absorption reporting.
//!
//! Reconstructs a point-in-time rent roll from an append-only, versioned log
//! of lease amendments and computes period-over-period leasing deltas for
//! financial reporting. Everything here is a pure, stateless batch
//! transformation over immutable input tables: loading those tables and
//! persisting the reports is the caller's concern.

pub mod absorption;
pub mod accuracy;
pub mod charges;
pub mod config;
pub mod error;
pub mod quality;
pub mod rentroll;
pub mod resolver;
pub mod samestore;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rentroll_types::{
    AbsorptionReport, Amendment, ChargeScheduleEntry, DataQualityResult, Property, ResolvedLease,
    ValidationResult,
};

pub use crate::charges::ChargeLedger;
pub use crate::config::EngineConfig;
pub use crate::error::EngineError;
pub use crate::quality::AuditInput;
pub use crate::resolver::{Resolution, ResolutionConflict};
pub use crate::samestore::ReportingPeriod;

/// A projected rent roll plus any resolution conflicts encountered while
/// building it. Conflicts are best-effort resolved but must not pass silently.
#[derive(Debug, Clone, PartialEq)]
pub struct RentRollOutput {
    pub leases: Vec<ResolvedLease>,
    pub conflicts: Vec<ResolutionConflict>,
}

/// Engine entry point.
pub struct RentRollEngine {
    config: EngineConfig,
}

impl RentRollEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Project the rent roll as of a reference date: one row per resolved
    /// (property, tenant) pair with aggregated monthly rent. Zero-rent rows
    /// are retained and flagged, never filtered.
    pub fn rent_roll(
        &self,
        amendments: &[Amendment],
        charges: &[ChargeScheduleEntry],
        as_of: NaiveDate,
    ) -> RentRollOutput {
        let resolution = resolver::resolve_active(amendments, as_of);
        let ledger = ChargeLedger::new(charges);
        let leases = rentroll::project(&resolution.resolved, &ledger, &self.config, as_of);
        RentRollOutput {
            leases,
            conflicts: resolution.conflicts,
        }
    }

    /// Compute the absorption report for one reporting period, using the
    /// configured boundary inclusivity.
    pub fn absorption(
        &self,
        amendments: &[Amendment],
        charges: &[ChargeScheduleEntry],
        properties: &[Property],
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Result<AbsorptionReport, EngineError> {
        let period = ReportingPeriod::with_config(period_start, period_end, &self.config)?;
        let ledger = ChargeLedger::new(charges);
        Ok(absorption::report(amendments, &ledger, properties, &period))
    }

    /// Compare computed measures against externally supplied benchmarks at
    /// the configured acceptance threshold.
    pub fn validate(
        &self,
        benchmarks: &BTreeMap<String, f64>,
        computed: &BTreeMap<String, f64>,
    ) -> Vec<ValidationResult> {
        accuracy::compare_all(benchmarks, computed, self.config.accuracy_threshold_pct)
    }

    /// Run every data-quality rule over the supplied tables.
    pub fn audit(&self, input: &AuditInput<'_>, as_of: NaiveDate) -> Vec<DataQualityResult> {
        quality::run_all(input, as_of)
    }
}

impl Default for RentRollEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
