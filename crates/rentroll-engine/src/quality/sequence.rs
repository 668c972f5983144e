//! Sequence integrity of the amendment event log.

use std::collections::BTreeMap;

use rentroll_types::{Amendment, DataQualityResult, Severity};

use super::rule_result;

/// Within each (property, tenant) group, sequence numbers must form a
/// gapless ascending run starting at 1. Target: at least 95% of groups.
pub fn check_sequence_integrity(amendments: &[Amendment]) -> DataQualityResult {
    let mut groups: BTreeMap<(&str, &str), Vec<u32>> = BTreeMap::new();
    for amendment in amendments {
        groups
            .entry((
                amendment.property_key.as_str(),
                amendment.tenant_key.as_str(),
            ))
            .or_default()
            .push(amendment.sequence);
    }

    let total = groups.len();
    let mut issues = 0;
    let mut details = Vec::new();
    for ((property, tenant), mut sequences) in groups {
        sequences.sort_unstable();
        let gapless = sequences
            .iter()
            .enumerate()
            .all(|(i, &seq)| seq == (i + 1) as u32);
        if !gapless {
            issues += 1;
            details.push(format!(
                "({property}, {tenant}): sequences {sequences:?} are not a gapless run from 1"
            ));
        }
    }

    rule_result(
        "sequence_integrity",
        Severity::High,
        total,
        issues,
        95.0,
        details,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rentroll_types::{AmendmentStatus, AmendmentType, CheckStatus};

    fn amendment(tenant: &str, seq: u32) -> Amendment {
        Amendment {
            amendment_key: format!("{tenant}-{seq}"),
            property_key: "P1".to_string(),
            tenant_key: tenant.to_string(),
            sequence: seq,
            status: AmendmentStatus::Superseded,
            amendment_type: AmendmentType::Renewal,
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end_date: None,
            leased_area: 100.0,
        }
    }

    #[test]
    fn test_gapless_runs_pass() {
        let amendments = vec![
            amendment("T1", 1),
            amendment("T1", 2),
            amendment("T1", 3),
            amendment("T2", 1),
        ];
        let result = check_sequence_integrity(&amendments);
        assert_eq!(result.status, CheckStatus::Pass);
        assert_eq!(result.total_records, 2);
    }

    #[test]
    fn test_gap_in_run_is_an_issue() {
        let amendments = vec![amendment("T1", 1), amendment("T1", 3)];
        let result = check_sequence_integrity(&amendments);
        assert_eq!(result.issues_found, 1);
        assert_eq!(result.status, CheckStatus::Fail);
    }

    #[test]
    fn test_run_not_starting_at_one_is_an_issue() {
        let amendments = vec![amendment("T1", 2), amendment("T1", 3)];
        let result = check_sequence_integrity(&amendments);
        assert_eq!(result.issues_found, 1);
    }

    #[test]
    fn test_reused_sequence_is_an_issue() {
        let amendments = vec![amendment("T1", 1), amendment("T1", 1)];
        let result = check_sequence_integrity(&amendments);
        assert_eq!(result.issues_found, 1);
    }

    #[test]
    fn test_small_defect_share_still_passes_target() {
        // 1 bad group among 30: 96.7% pass rate, above the 95% target.
        let mut amendments: Vec<Amendment> = (0..29)
            .map(|i| amendment(&format!("T{i}"), 1))
            .collect();
        amendments.push(amendment("BAD", 5));
        let result = check_sequence_integrity(&amendments);
        assert_eq!(result.issues_found, 1);
        assert_eq!(result.status, CheckStatus::Pass);
    }
}
