//! Key-level integrity: primary-key uniqueness and referential integrity.

use std::collections::HashSet;

use rentroll_types::{Amendment, CheckStatus, DataQualityResult, Severity};

use super::{rule_result, AuditInput};

/// Every amendment identifier must be unique. Target 100%.
pub fn check_key_uniqueness(amendments: &[Amendment]) -> DataQualityResult {
    let mut seen = HashSet::with_capacity(amendments.len());
    let mut issues = 0;
    let mut details = Vec::new();
    for amendment in amendments {
        if !seen.insert(amendment.amendment_key.as_str()) {
            issues += 1;
            details.push(format!(
                "duplicate amendment key '{}'",
                amendment.amendment_key
            ));
        }
    }
    rule_result(
        "amendment_key_uniqueness",
        Severity::Critical,
        amendments.len(),
        issues,
        100.0,
        details,
    )
}

/// Every charge row must reference an existing amendment, and every
/// amendment's property and tenant keys must resolve to the dimension
/// tables. Target 100%.
///
/// An absent dimension table fails the rule with a missing-data detail
/// rather than aborting the audit; the references that can still be checked
/// are checked.
pub fn check_referential_integrity(input: &AuditInput<'_>) -> DataQualityResult {
    let amendment_keys: HashSet<&str> = input
        .amendments
        .iter()
        .map(|a| a.amendment_key.as_str())
        .collect();

    let mut total = input.charges.len();
    let mut issues = 0;
    let mut details = Vec::new();
    let mut missing_input = false;

    for charge in input.charges {
        if !amendment_keys.contains(charge.amendment_key.as_str()) {
            issues += 1;
            details.push(format!(
                "orphaned charge row: amendment key '{}' does not exist",
                charge.amendment_key
            ));
        }
    }

    match input.properties {
        Some(properties) => {
            let property_keys: HashSet<&str> =
                properties.iter().map(|p| p.property_key.as_str()).collect();
            total += input.amendments.len();
            for amendment in input.amendments {
                if !property_keys.contains(amendment.property_key.as_str()) {
                    issues += 1;
                    details.push(format!(
                        "amendment '{}' references unknown property '{}'",
                        amendment.amendment_key, amendment.property_key
                    ));
                }
            }
        }
        None => {
            missing_input = true;
            details.push("missing data: property table not supplied".to_string());
        }
    }

    match input.tenants {
        Some(tenants) => {
            let tenant_keys: HashSet<&str> =
                tenants.iter().map(|t| t.tenant_key.as_str()).collect();
            total += input.amendments.len();
            for amendment in input.amendments {
                if !tenant_keys.contains(amendment.tenant_key.as_str()) {
                    issues += 1;
                    details.push(format!(
                        "amendment '{}' references unknown tenant '{}'",
                        amendment.amendment_key, amendment.tenant_key
                    ));
                }
            }
        }
        None => {
            missing_input = true;
            details.push("missing data: tenant table not supplied".to_string());
        }
    }

    let mut result = rule_result(
        "referential_integrity",
        Severity::Critical,
        total,
        issues,
        100.0,
        details,
    );
    if missing_input {
        result.status = CheckStatus::Fail;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rentroll_types::{
        AmendmentStatus, AmendmentType, ChargeFrequency, ChargeScheduleEntry, Property, Tenant,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn amendment(key: &str, property: &str, tenant: &str) -> Amendment {
        Amendment {
            amendment_key: key.to_string(),
            property_key: property.to_string(),
            tenant_key: tenant.to_string(),
            sequence: 1,
            status: AmendmentStatus::Activated,
            amendment_type: AmendmentType::OriginalLease,
            start_date: date(2020, 1, 1),
            end_date: None,
            leased_area: 1000.0,
        }
    }

    fn charge(amendment_key: &str) -> ChargeScheduleEntry {
        ChargeScheduleEntry {
            amendment_key: amendment_key.to_string(),
            charge_code: "rnt".to_string(),
            amount: 100.0,
            frequency: ChargeFrequency::Monthly,
        }
    }

    #[test]
    fn test_unique_keys_pass() {
        let amendments = vec![amendment("A1", "P1", "T1"), amendment("A2", "P1", "T2")];
        let result = check_key_uniqueness(&amendments);
        assert_eq!(result.status, CheckStatus::Pass);
        assert_eq!(result.issues_found, 0);
    }

    #[test]
    fn test_duplicate_key_is_critical_fail() {
        let amendments = vec![amendment("A1", "P1", "T1"), amendment("A1", "P1", "T2")];
        let result = check_key_uniqueness(&amendments);
        assert_eq!(result.status, CheckStatus::Fail);
        assert_eq!(result.severity, Severity::Critical);
        assert_eq!(result.issues_found, 1);
    }

    #[test]
    fn test_orphaned_charge_fails_referential_integrity() {
        let amendments = vec![amendment("A1", "P1", "T1")];
        let charges = vec![charge("A1"), charge("GHOST")];
        let properties = vec![Property {
            property_key: "P1".to_string(),
            code: "p1".to_string(),
            acquire_date: date(2019, 1, 1),
            dispose_date: None,
            rentable_area: 1.0,
        }];
        let tenants = vec![Tenant {
            tenant_key: "T1".to_string(),
            name: None,
        }];
        let input = AuditInput {
            amendments: &amendments,
            charges: &charges,
            properties: Some(&properties),
            tenants: Some(&tenants),
        };
        let result = check_referential_integrity(&input);
        assert_eq!(result.status, CheckStatus::Fail);
        assert_eq!(result.issues_found, 1);
        assert!(result.details[0].contains("GHOST"));
    }

    #[test]
    fn test_unknown_dimension_keys_are_issues() {
        let amendments = vec![amendment("A1", "NOPROP", "NOTEN")];
        let input = AuditInput {
            amendments: &amendments,
            charges: &[],
            properties: Some(&[]),
            tenants: Some(&[]),
        };
        let result = check_referential_integrity(&input);
        assert_eq!(result.issues_found, 2);
        assert_eq!(result.status, CheckStatus::Fail);
    }

    #[test]
    fn test_missing_dimension_table_fails_with_detail() {
        let amendments = vec![amendment("A1", "P1", "T1")];
        let input = AuditInput {
            amendments: &amendments,
            charges: &[],
            properties: None,
            tenants: None,
        };
        let result = check_referential_integrity(&input);
        assert_eq!(result.status, CheckStatus::Fail);
        assert!(result
            .details
            .iter()
            .any(|d| d.contains("property table not supplied")));
        assert!(result
            .details
            .iter()
            .any(|d| d.contains("tenant table not supplied")));
    }
}
