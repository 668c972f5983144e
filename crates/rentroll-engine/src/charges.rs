//! Charge-schedule aggregation.
//!
//! Joins resolved amendments to their recurring charge lines and normalizes
//! each accepted line to a monthly amount: quarterly amounts divide by 3,
//! semi-annual by 6, annual by 12. A line with an unrecognized frequency is
//! passed through at its raw amount and flagged — never silently treated as
//! monthly. Aggregation is pure: amendments without charges keep a zero
//! total, which is itself a completeness signal for the quality auditor.

use std::collections::{BTreeSet, HashMap};

use rentroll_types::{ChargeScheduleEntry, LeaseFlag};

/// Monthly rent for one amendment plus the quality flags raised while
/// aggregating it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeSummary {
    pub monthly_rent: f64,
    /// All charge rows referencing the amendment, whether or not their code
    /// matched the accepted set.
    pub total_rows: usize,
    pub flags: Vec<LeaseFlag>,
}

/// Charge rows indexed by amendment key for repeated lookups during a
/// projection pass.
#[derive(Debug)]
pub struct ChargeLedger<'a> {
    by_amendment: HashMap<&'a str, Vec<&'a ChargeScheduleEntry>>,
}

impl<'a> ChargeLedger<'a> {
    pub fn new(charges: &'a [ChargeScheduleEntry]) -> Self {
        let mut by_amendment: HashMap<&str, Vec<&ChargeScheduleEntry>> = HashMap::new();
        for entry in charges {
            by_amendment
                .entry(entry.amendment_key.as_str())
                .or_default()
                .push(entry);
        }
        Self { by_amendment }
    }

    /// All charge rows referencing `amendment_key`.
    pub fn rows_for(&self, amendment_key: &str) -> &[&'a ChargeScheduleEntry] {
        self.by_amendment
            .get(amendment_key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether any charge row for the amendment carries a non-zero amount,
    /// regardless of charge code. A commencement without rent is not a
    /// completed commencement.
    pub fn has_nonzero_charge(&self, amendment_key: &str) -> bool {
        self.rows_for(amendment_key).iter().any(|e| e.amount != 0.0)
    }

    /// Sum the amendment's charge rows whose code is in `accepted_codes`
    /// (lowercased), normalized to monthly amounts.
    pub fn monthly_rent(
        &self,
        amendment_key: &str,
        accepted_codes: &BTreeSet<String>,
    ) -> ChargeSummary {
        let rows = self.rows_for(amendment_key);

        let mut matched: Vec<&ChargeScheduleEntry> = rows
            .iter()
            .copied()
            .filter(|e| accepted_codes.contains(&e.charge_code.to_lowercase()))
            .collect();
        // Canonical order keeps the floating-point total identical no matter
        // how the input rows were ordered.
        matched.sort_by(|a, b| {
            (&a.charge_code, String::from(a.frequency.clone()), a.amount.to_bits()).cmp(&(
                &b.charge_code,
                String::from(b.frequency.clone()),
                b.amount.to_bits(),
            ))
        });

        let mut monthly_rent = 0.0;
        let mut flags = Vec::new();
        for entry in &matched {
            match entry.frequency.months_per_period() {
                Some(months) => monthly_rent += entry.amount / months,
                None => {
                    monthly_rent += entry.amount;
                    flags.push(LeaseFlag::UnrecognizedFrequency {
                        charge_code: entry.charge_code.clone(),
                        frequency: String::from(entry.frequency.clone()),
                    });
                }
            }
        }

        ChargeSummary {
            monthly_rent,
            total_rows: rows.len(),
            flags,
        }
    }
}
