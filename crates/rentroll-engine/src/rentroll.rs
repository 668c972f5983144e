//! Rent roll projection.
//!
//! Combines resolver output and charge aggregation into one record per
//! resolved lease. Rows with zero rent are retained, not filtered, so the
//! quality auditor can compute completeness over the full roll.

use chrono::{Datelike, NaiveDate};
use rentroll_types::{Amendment, LeaseFlag, ResolvedLease};

use crate::charges::ChargeLedger;
use crate::config::EngineConfig;

/// Project resolved amendments into rent roll rows.
pub fn project(
    resolved: &[Amendment],
    ledger: &ChargeLedger<'_>,
    config: &EngineConfig,
    as_of: NaiveDate,
) -> Vec<ResolvedLease> {
    let accepted_codes = config.charge_code_set();
    resolved
        .iter()
        .map(|amendment| {
            let summary = ledger.monthly_rent(&amendment.amendment_key, &accepted_codes);
            let mut flags = summary.flags;
            if summary.total_rows == 0 {
                flags.push(LeaseFlag::NoChargeRows);
            }

            let monthly_rent = summary.monthly_rent;
            let annual_rent = monthly_rent * 12.0;
            let rent_psf = if amendment.leased_area > 0.0 {
                annual_rent / amendment.leased_area
            } else {
                0.0
            };
            let (remaining_term_months, month_to_month) =
                remaining_term_months(as_of, amendment.end_date, config);

            ResolvedLease {
                property_key: amendment.property_key.clone(),
                tenant_key: amendment.tenant_key.clone(),
                amendment_key: amendment.amendment_key.clone(),
                leased_area: amendment.leased_area,
                monthly_rent,
                annual_rent,
                rent_psf,
                remaining_term_months,
                month_to_month,
                flags,
            }
        })
        .collect()
}

/// Remaining lease term in whole months from `as_of`, plus whether the lease
/// is month-to-month. Open-ended leases take the configured placeholder so
/// weighted-term arithmetic has a number to work with.
pub fn remaining_term_months(
    as_of: NaiveDate,
    end_date: Option<NaiveDate>,
    config: &EngineConfig,
) -> (f64, bool) {
    match end_date {
        Some(end) => (whole_months_between(as_of, end), false),
        None => (config.month_to_month_term_months, true),
    }
}

/// Whole calendar months from `from` to `to`, day-of-month aware, floored
/// at zero.
fn whole_months_between(from: NaiveDate, to: NaiveDate) -> f64 {
    if to <= from {
        return 0.0;
    }
    let mut months =
        (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);
    if to.day() < from.day() {
        months -= 1;
    }
    months.max(0) as f64
}

/// Weighted-average remaining lease term, weighted by monthly rent.
/// Zero when the roll carries no rent.
pub fn walt(leases: &[ResolvedLease]) -> f64 {
    let total_rent: f64 = leases.iter().map(|l| l.monthly_rent).sum();
    if total_rent <= 0.0 {
        return 0.0;
    }
    let weighted: f64 = leases
        .iter()
        .map(|l| l.monthly_rent * l.remaining_term_months)
        .sum();
    weighted / total_rent
}
