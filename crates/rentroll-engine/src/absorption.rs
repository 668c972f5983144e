//! Absorption delta computation.
//!
//! Square footage commenced and expired over a reporting period, restricted
//! to same-store properties, plus portfolio-level disposition and acquisition
//! square footage. Terminations and commencements each get an independent
//! max-sequence resolution pass; they are deliberately not part of the
//! current-lease resolution, which excludes termination rows entirely.

use std::collections::BTreeSet;

use rentroll_types::{AbsorptionReport, Amendment, AmendmentType, Property};
use tracing::info;

use crate::charges::ChargeLedger;
use crate::resolver::resolve_latest;
use crate::samestore::{same_store, ReportingPeriod};

/// Square footage of terminations whose end date falls in the period,
/// restricted to same-store properties. One row per (property, tenant) by
/// maximum sequence.
pub fn sf_expired(
    amendments: &[Amendment],
    period: &ReportingPeriod,
    same_store_keys: &BTreeSet<&str>,
) -> f64 {
    let terminations = amendments.iter().filter(|a| {
        a.status.is_resolvable()
            && a.amendment_type == AmendmentType::Termination
            && a.end_date.map_or(false, |end| period.contains(end))
            && same_store_keys.contains(a.property_key.as_str())
    });
    resolve_latest(terminations)
        .resolved
        .iter()
        .map(|a| a.leased_area)
        .sum()
}

/// Square footage of original/new leases whose start date falls in the
/// period, restricted to same-store properties and to amendments backed by
/// at least one non-zero charge row — a commencement without rent is not a
/// completed commencement.
pub fn sf_commenced(
    amendments: &[Amendment],
    ledger: &ChargeLedger<'_>,
    period: &ReportingPeriod,
    same_store_keys: &BTreeSet<&str>,
) -> f64 {
    let commencements = amendments.iter().filter(|a| {
        a.status.is_resolvable()
            && a.amendment_type.is_commencement()
            && period.contains(a.start_date)
            && same_store_keys.contains(a.property_key.as_str())
            && ledger.has_nonzero_charge(&a.amendment_key)
    });
    resolve_latest(commencements)
        .resolved
        .iter()
        .map(|a| a.leased_area)
        .sum()
}

/// Rentable area of properties disposed during the period.
pub fn disposition_sf(properties: &[Property], period: &ReportingPeriod) -> f64 {
    properties
        .iter()
        .filter(|p| p.dispose_date.map_or(false, |d| period.contains(d)))
        .map(|p| p.rentable_area)
        .sum()
}

/// Rentable area of properties acquired during the period.
pub fn acquisition_sf(properties: &[Property], period: &ReportingPeriod) -> f64 {
    properties
        .iter()
        .filter(|p| period.contains(p.acquire_date))
        .map(|p| p.rentable_area)
        .sum()
}

/// Full absorption report for one period. Net absorption is derived from the
/// commenced and expired figures in this one place; no independent
/// computation path exists to diverge from it.
pub fn report(
    amendments: &[Amendment],
    ledger: &ChargeLedger<'_>,
    properties: &[Property],
    period: &ReportingPeriod,
) -> AbsorptionReport {
    let stores = same_store(properties, period);
    let same_store_keys: BTreeSet<&str> =
        stores.iter().map(|p| p.property_key.as_str()).collect();

    let sf_expired = sf_expired(amendments, period, &same_store_keys);
    let sf_commenced = sf_commenced(amendments, ledger, period, &same_store_keys);
    let net_absorption = sf_commenced - sf_expired;

    let report = AbsorptionReport {
        period_start: period.start(),
        period_end: period.end(),
        sf_expired,
        sf_commenced,
        net_absorption,
        disposition_sf: disposition_sf(properties, period),
        acquisition_sf: acquisition_sf(properties, period),
        same_store_properties: same_store_keys.iter().map(|k| k.to_string()).collect(),
    };
    info!(
        period_start = %report.period_start,
        period_end = %report.period_end,
        sf_expired = report.sf_expired,
        sf_commenced = report.sf_commenced,
        net_absorption = report.net_absorption,
        "computed absorption report"
    );
    report
}
