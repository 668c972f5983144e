//! Derived records consumed by the external reporting layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Severity of a data-quality finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Critical,
    High,
}

/// Pass/fail outcome of an accuracy comparison or quality rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    Pass,
    Fail,
}

/// Quality marker attached to a projected lease row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseFlag {
    /// No charge-schedule rows matched the amendment; rent is zero but the
    /// row is retained so completeness metrics can count it.
    NoChargeRows,
    /// A charge row carried a frequency outside the known set; its amount was
    /// passed through raw rather than normalized.
    UnrecognizedFrequency { charge_code: String, frequency: String },
}

/// One row of the projected rent roll: the currently authoritative amendment
/// for a (property, tenant) pair plus its aggregated monthly rent.
///
/// Recomputed on every resolution pass from the immutable amendment and
/// charge tables; never persisted as a source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLease {
    pub property_key: String,
    pub tenant_key: String,
    pub amendment_key: String,
    pub leased_area: f64,
    pub monthly_rent: f64,
    pub annual_rent: f64,
    /// Annual rent per square foot; 0 when leased area is not positive.
    pub rent_psf: f64,
    /// Whole months from the as-of date to lease end. Month-to-month leases
    /// take the configured placeholder value.
    pub remaining_term_months: f64,
    /// True when the lease has no end date (open-ended term).
    pub month_to_month: bool,
    pub flags: Vec<LeaseFlag>,
}

/// Leasing-activity deltas for one reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsorptionReport {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub sf_expired: f64,
    pub sf_commenced: f64,
    /// Always exactly `sf_commenced - sf_expired`.
    pub net_absorption: f64,
    pub disposition_sf: f64,
    pub acquisition_sf: f64,
    /// Property keys that qualified as same-store for the period.
    pub same_store_properties: Vec<String>,
}

/// Outcome of comparing one computed measure against its benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub measure_name: String,
    pub benchmark: f64,
    pub computed: f64,
    pub variance: f64,
    pub variance_pct: f64,
    /// Always within [0, 100]; 100 iff computed equals benchmark.
    pub accuracy_pct: f64,
    pub status: CheckStatus,
    /// Structured annotation, e.g. a missing-data note when the computed
    /// side did not supply the measure.
    pub detail: Option<String>,
}

/// Outcome of one data-quality rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQualityResult {
    pub rule_id: String,
    pub total_records: usize,
    pub issues_found: usize,
    /// Issues as a percentage of records examined (0 when nothing examined).
    pub issue_rate_pct: f64,
    pub severity: Severity,
    pub status: CheckStatus,
    /// Human-readable samples of the offending records, capped by the rule.
    pub details: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_severity_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&Severity::Critical).unwrap(),
            "\"CRITICAL\""
        );
        assert_eq!(serde_json::to_string(&Severity::High).unwrap(), "\"HIGH\"");
    }

    #[test]
    fn test_check_status_serializes_screaming_snake() {
        assert_eq!(serde_json::to_string(&CheckStatus::Pass).unwrap(), "\"PASS\"");
        assert_eq!(serde_json::to_string(&CheckStatus::Fail).unwrap(), "\"FAIL\"");
    }

    #[test]
    fn test_absorption_report_round_trips_through_json() {
        let report = AbsorptionReport {
            period_start: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            sf_expired: 1000.0,
            sf_commenced: 1500.0,
            net_absorption: 500.0,
            disposition_sf: 0.0,
            acquisition_sf: 0.0,
            same_store_properties: vec!["P1".to_string()],
        };
        let json = serde_json::to_string(&report).unwrap();
        let back: AbsorptionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }
}
