//! Amendment resolution.
//!
//! The amendment table is an append-only event log: every edit to a lease
//! term appends a row with the next sequence number for its (property,
//! tenant) pair. Resolution selects the single authoritative row per pair as
//! of a reference date. At most one row per pair is a load-bearing invariant
//! for every downstream calculation — a double-counted tenant inflates rent
//! roll totals.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rentroll_types::{Amendment, AmendmentStatus};
use tracing::{debug, warn};

/// Two or more rows tied on every tie-break criterion for one pair.
///
/// The resolver still returns a best-effort winner (smallest amendment key,
/// deterministic), but the tie is a FAIL-grade data defect that the quality
/// auditor reports as a CRITICAL duplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionConflict {
    pub property_key: String,
    pub tenant_key: String,
    pub sequence: u32,
    pub amendment_keys: Vec<String>,
}

/// Output of one resolution pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// At most one amendment per (property, tenant) pair, ordered by key.
    pub resolved: Vec<Amendment>,
    pub conflicts: Vec<ResolutionConflict>,
}

/// Resolve the currently authoritative amendment per (property, tenant) pair.
///
/// Eligibility: status Activated or Superseded, a leasable type (terminations,
/// proposals, and modifications do not represent an active term), and a term
/// covering `as_of` (a null end date is open-ended, never expired).
///
/// Within each pair the row with the maximum sequence wins; at equal maximum
/// sequence Activated is preferred over Superseded; a remaining tie is
/// reported as a [`ResolutionConflict`].
pub fn resolve_active(amendments: &[Amendment], as_of: NaiveDate) -> Resolution {
    let eligible = amendments
        .iter()
        .filter(|a| a.status.is_resolvable())
        .filter(|a| a.amendment_type.is_leasable())
        .filter(|a| a.covers(as_of));

    let mut resolution = resolve_latest(eligible);
    for conflict in &resolution.conflicts {
        warn!(
            property = %conflict.property_key,
            tenant = %conflict.tenant_key,
            sequence = conflict.sequence,
            "amendment resolution tie; picked smallest key as best effort"
        );
    }
    debug!(
        resolved = resolution.resolved.len(),
        conflicts = resolution.conflicts.len(),
        %as_of,
        "resolved rent roll amendments"
    );
    resolution.resolved.sort_by(|a, b| {
        (&a.property_key, &a.tenant_key).cmp(&(&b.property_key, &b.tenant_key))
    });
    resolution
}

/// Group pre-filtered rows by (property, tenant) and select the maximum
/// sequence per group, with the Activated-over-Superseded tie-break.
///
/// Used both by [`resolve_active`] and by the absorption engine's
/// independent termination/commencement passes, which apply their own
/// eligibility filters first.
pub fn resolve_latest<'a, I>(rows: I) -> Resolution
where
    I: IntoIterator<Item = &'a Amendment>,
{
    let mut groups: BTreeMap<(&str, &str), Vec<&Amendment>> = BTreeMap::new();
    for row in rows {
        groups
            .entry((row.property_key.as_str(), row.tenant_key.as_str()))
            .or_default()
            .push(row);
    }

    let mut resolved = Vec::with_capacity(groups.len());
    let mut conflicts = Vec::new();
    for ((property_key, tenant_key), group) in groups {
        let (winner, tied) = pick_latest(&group);
        if tied.len() > 1 {
            let mut amendment_keys: Vec<String> =
                tied.iter().map(|a| a.amendment_key.clone()).collect();
            amendment_keys.sort();
            conflicts.push(ResolutionConflict {
                property_key: property_key.to_string(),
                tenant_key: tenant_key.to_string(),
                sequence: winner.sequence,
                amendment_keys,
            });
        }
        resolved.push(winner.clone());
    }

    Resolution { resolved, conflicts }
}

/// Select the winning row of one non-empty group, returning the rows (if any)
/// still tied after every tie-break criterion.
fn pick_latest<'a>(group: &[&'a Amendment]) -> (&'a Amendment, Vec<&'a Amendment>) {
    let max_sequence = group.iter().map(|a| a.sequence).max().unwrap_or(0);
    let at_max: Vec<&Amendment> = group
        .iter()
        .copied()
        .filter(|a| a.sequence == max_sequence)
        .collect();

    // Sequence ties should not occur (sequences are unique per pair) but
    // must be handled: prefer Activated over Superseded.
    let activated: Vec<&Amendment> = at_max
        .iter()
        .copied()
        .filter(|a| a.status == AmendmentStatus::Activated)
        .collect();
    let candidates = if activated.is_empty() { at_max } else { activated };

    let winner = candidates
        .iter()
        .copied()
        .min_by(|a, b| a.amendment_key.cmp(&b.amendment_key))
        .expect("group is never empty");
    let tied = if candidates.len() > 1 { candidates } else { Vec::new() };
    (winner, tied)
}
