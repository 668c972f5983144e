//! Charge-schedule completeness over the resolved rent roll.

use chrono::NaiveDate;
use rentroll_types::{Amendment, ChargeScheduleEntry, DataQualityResult, Severity};

use super::rule_result;
use crate::charges::ChargeLedger;
use crate::resolver::resolve_active;

/// Every resolved amendment should have at least one matching
/// charge-schedule row; a resolved lease with no charges lands on the rent
/// roll at zero rent, which usually means the charge extract is incomplete.
/// Target: at least 98% of resolved amendments.
pub fn check_charge_completeness(
    amendments: &[Amendment],
    charges: &[ChargeScheduleEntry],
    as_of: NaiveDate,
) -> DataQualityResult {
    let resolution = resolve_active(amendments, as_of);
    let ledger = ChargeLedger::new(charges);

    let total = resolution.resolved.len();
    let mut issues = 0;
    let mut details = Vec::new();
    for amendment in &resolution.resolved {
        if ledger.rows_for(&amendment.amendment_key).is_empty() {
            issues += 1;
            details.push(format!(
                "resolved amendment '{}' ({}, {}) has no charge rows",
                amendment.amendment_key, amendment.property_key, amendment.tenant_key
            ));
        }
    }

    rule_result(
        "charge_completeness",
        Severity::Critical,
        total,
        issues,
        98.0,
        details,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rentroll_types::{AmendmentStatus, AmendmentType, ChargeFrequency, CheckStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn amendment(key: &str, tenant: &str) -> Amendment {
        Amendment {
            amendment_key: key.to_string(),
            property_key: "P1".to_string(),
            tenant_key: tenant.to_string(),
            sequence: 1,
            status: AmendmentStatus::Activated,
            amendment_type: AmendmentType::OriginalLease,
            start_date: date(2020, 1, 1),
            end_date: None,
            leased_area: 100.0,
        }
    }

    fn charge(amendment_key: &str) -> ChargeScheduleEntry {
        ChargeScheduleEntry {
            amendment_key: amendment_key.to_string(),
            charge_code: "rnt".to_string(),
            amount: 1000.0,
            frequency: ChargeFrequency::Monthly,
        }
    }

    #[test]
    fn test_fully_charged_roll_passes() {
        let amendments = vec![amendment("A1", "T1"), amendment("A2", "T2")];
        let charges = vec![charge("A1"), charge("A2")];
        let result = check_charge_completeness(&amendments, &charges, date(2024, 6, 30));
        assert_eq!(result.total_records, 2);
        assert_eq!(result.issues_found, 0);
        assert_eq!(result.status, CheckStatus::Pass);
    }

    #[test]
    fn test_chargeless_resolved_amendment_is_an_issue() {
        let amendments = vec![amendment("A1", "T1"), amendment("A2", "T2")];
        let charges = vec![charge("A1")];
        let result = check_charge_completeness(&amendments, &charges, date(2024, 6, 30));
        assert_eq!(result.issues_found, 1);
        // 50% completeness is far below the 98% target.
        assert_eq!(result.status, CheckStatus::Fail);
        assert!(result.details[0].contains("A2"));
    }

    #[test]
    fn test_unresolved_amendments_are_not_counted() {
        // Draft rows never resolve, so their missing charges are not
        // completeness issues.
        let mut draft = amendment("A1", "T1");
        draft.status = AmendmentStatus::Draft;
        let result = check_charge_completeness(&[draft], &[], date(2024, 6, 30));
        assert_eq!(result.total_records, 0);
        assert_eq!(result.status, CheckStatus::Pass);
    }
}
