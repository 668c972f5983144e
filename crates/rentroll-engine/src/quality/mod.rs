//! Data-quality audit.
//!
//! Independent, composable checks over the raw and resolved tables. Each
//! rule returns its own [`DataQualityResult`]; a failure in one rule never
//! prevents the others from running. The auditor is the authoritative signal
//! that manual correction is needed — the resolver still produces a
//! best-effort result in the presence of these defects.

pub mod completeness;
pub mod duplicates;
pub mod keys;
pub mod sequence;
pub mod validity;

use chrono::NaiveDate;
use rentroll_types::{
    Amendment, ChargeScheduleEntry, CheckStatus, DataQualityResult, Property, Severity, Tenant,
};
use tracing::warn;

/// Sample details retained per rule; counts are always exact.
const DETAIL_CAP: usize = 10;

/// Tables available to the auditor. The dimension tables are optional: when
/// one is absent, only the rules depending on it fail (with a missing-data
/// detail), and everything else still runs.
#[derive(Debug, Clone, Copy)]
pub struct AuditInput<'a> {
    pub amendments: &'a [Amendment],
    pub charges: &'a [ChargeScheduleEntry],
    pub properties: Option<&'a [Property]>,
    pub tenants: Option<&'a [Tenant]>,
}

/// Run every quality rule, isolate-and-continue. Rule targets are fixed
/// acceptance contracts, not configuration knobs.
pub fn run_all(input: &AuditInput<'_>, as_of: NaiveDate) -> Vec<DataQualityResult> {
    let results = vec![
        keys::check_key_uniqueness(input.amendments),
        sequence::check_sequence_integrity(input.amendments),
        validity::check_status_validity(input.amendments),
        validity::check_date_ranges(input.amendments),
        duplicates::check_duplicate_active(input.amendments, as_of),
        completeness::check_charge_completeness(input.amendments, input.charges, as_of),
        keys::check_referential_integrity(input),
    ];
    for result in &results {
        if result.status == CheckStatus::Fail {
            warn!(
                rule = %result.rule_id,
                issues = result.issues_found,
                total = result.total_records,
                "data quality rule failed"
            );
        }
    }
    results
}

/// Assemble one rule outcome. The rule passes when nothing was examined,
/// when no issues were found, or when the pass rate meets the target.
pub(crate) fn rule_result(
    rule_id: &str,
    severity: Severity,
    total_records: usize,
    issues_found: usize,
    target_pass_rate_pct: f64,
    mut details: Vec<String>,
) -> DataQualityResult {
    let issue_rate_pct = if total_records == 0 {
        0.0
    } else {
        issues_found as f64 / total_records as f64 * 100.0
    };
    let status = if issues_found == 0 || (100.0 - issue_rate_pct) >= target_pass_rate_pct {
        CheckStatus::Pass
    } else {
        CheckStatus::Fail
    };
    details.truncate(DETAIL_CAP);
    DataQualityResult {
        rule_id: rule_id.to_string(),
        total_records,
        issues_found,
        issue_rate_pct,
        severity,
        status,
        details,
    }
}
