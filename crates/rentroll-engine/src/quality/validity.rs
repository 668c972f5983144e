//! Row-level validity: status values and date ranges.

use rentroll_types::{Amendment, DataQualityResult, Severity};

use super::rule_result;

/// Status values must come from the known enum. Target: at least 98% of rows.
pub fn check_status_validity(amendments: &[Amendment]) -> DataQualityResult {
    let mut issues = 0;
    let mut details = Vec::new();
    for amendment in amendments {
        if amendment.status.is_unknown() {
            issues += 1;
            details.push(format!(
                "amendment '{}' carries unknown status '{}'",
                amendment.amendment_key,
                String::from(amendment.status.clone())
            ));
        }
    }
    rule_result(
        "status_validity",
        Severity::High,
        amendments.len(),
        issues,
        98.0,
        details,
    )
}

/// Start date must not exceed the end date when one is present. A null end
/// date is open-ended and always valid. Target: at least 99% of rows.
pub fn check_date_ranges(amendments: &[Amendment]) -> DataQualityResult {
    let mut issues = 0;
    let mut details = Vec::new();
    for amendment in amendments {
        if let Some(end) = amendment.end_date {
            if amendment.start_date > end {
                issues += 1;
                details.push(format!(
                    "amendment '{}' starts {} after it ends {}",
                    amendment.amendment_key, amendment.start_date, end
                ));
            }
        }
    }
    rule_result(
        "date_range_validity",
        Severity::High,
        amendments.len(),
        issues,
        99.0,
        details,
    )
}
