//! Duplicate active amendments — the single most damaging defect class,
//! because a duplicated pair directly double-counts rent.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rentroll_types::{Amendment, DataQualityResult, Severity};

use super::rule_result;

/// After the resolver's own exclusion filters (resolvable status, leasable
/// type, term covering the as-of date), each (property, tenant) pair must
/// have exactly one row at its maximum sequence. Target: zero occurrences.
pub fn check_duplicate_active(amendments: &[Amendment], as_of: NaiveDate) -> DataQualityResult {
    let mut groups: BTreeMap<(&str, &str), Vec<&Amendment>> = BTreeMap::new();
    for amendment in amendments {
        if amendment.status.is_resolvable()
            && amendment.amendment_type.is_leasable()
            && amendment.covers(as_of)
        {
            groups
                .entry((
                    amendment.property_key.as_str(),
                    amendment.tenant_key.as_str(),
                ))
                .or_default()
                .push(amendment);
        }
    }

    let total = groups.len();
    let mut issues = 0;
    let mut details = Vec::new();
    for ((property, tenant), group) in groups {
        let max_sequence = group.iter().map(|a| a.sequence).max().unwrap_or(0);
        let at_max = group
            .iter()
            .filter(|a| a.sequence == max_sequence)
            .count();
        if at_max > 1 {
            issues += 1;
            details.push(format!(
                "({property}, {tenant}): {at_max} active amendments tied at sequence {max_sequence}"
            ));
        }
    }

    rule_result(
        "duplicate_active_amendments",
        Severity::Critical,
        total,
        issues,
        100.0,
        details,
    )
}
