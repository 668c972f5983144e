//! Input rows as supplied by the external loader.
//!
//! Status, type, and frequency fields round-trip through their source-system
//! string spellings so that extracts containing values outside the known
//! enums still deserialize; unrecognized values are carried in an
//! `Unknown`/`Other` variant and flagged by the quality auditor instead of
//! failing the load.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle status of one amendment row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AmendmentStatus {
    Activated,
    Superseded,
    Terminated,
    Expired,
    Draft,
    ProposalInDm,
    Cancelled,
    Pending,
    Unknown(String),
}

impl AmendmentStatus {
    /// Statuses eligible for resolution: a row that was ever authoritative.
    pub fn is_resolvable(&self) -> bool {
        matches!(self, AmendmentStatus::Activated | AmendmentStatus::Superseded)
    }

    /// True for values outside the known status set.
    pub fn is_unknown(&self) -> bool {
        matches!(self, AmendmentStatus::Unknown(_))
    }
}

impl From<String> for AmendmentStatus {
    fn from(s: String) -> Self {
        match normalize(&s).as_str() {
            "activated" => AmendmentStatus::Activated,
            "superseded" => AmendmentStatus::Superseded,
            "terminated" => AmendmentStatus::Terminated,
            "expired" => AmendmentStatus::Expired,
            "draft" => AmendmentStatus::Draft,
            "proposalindm" => AmendmentStatus::ProposalInDm,
            "cancelled" | "canceled" => AmendmentStatus::Cancelled,
            "pending" => AmendmentStatus::Pending,
            _ => AmendmentStatus::Unknown(s),
        }
    }
}

impl From<AmendmentStatus> for String {
    fn from(status: AmendmentStatus) -> Self {
        match status {
            AmendmentStatus::Activated => "Activated".to_string(),
            AmendmentStatus::Superseded => "Superseded".to_string(),
            AmendmentStatus::Terminated => "Terminated".to_string(),
            AmendmentStatus::Expired => "Expired".to_string(),
            AmendmentStatus::Draft => "Draft".to_string(),
            AmendmentStatus::ProposalInDm => "Proposal in DM".to_string(),
            AmendmentStatus::Cancelled => "Cancelled".to_string(),
            AmendmentStatus::Pending => "Pending".to_string(),
            AmendmentStatus::Unknown(s) => s,
        }
    }
}

/// Kind of lease event an amendment records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AmendmentType {
    OriginalLease,
    NewLease,
    Renewal,
    Termination,
    Modification,
    ProposalInDm,
    Unknown(String),
}

impl AmendmentType {
    /// Types that represent an active leasable term. Terminations, proposals,
    /// and modifications are excluded from current-lease resolution.
    pub fn is_leasable(&self) -> bool {
        matches!(
            self,
            AmendmentType::OriginalLease | AmendmentType::NewLease | AmendmentType::Renewal
        )
    }

    /// Types that count as a lease commencement.
    pub fn is_commencement(&self) -> bool {
        matches!(self, AmendmentType::OriginalLease | AmendmentType::NewLease)
    }
}

impl From<String> for AmendmentType {
    fn from(s: String) -> Self {
        match normalize(&s).as_str() {
            "originallease" => AmendmentType::OriginalLease,
            "newlease" => AmendmentType::NewLease,
            "renewal" => AmendmentType::Renewal,
            "termination" => AmendmentType::Termination,
            "modification" => AmendmentType::Modification,
            "proposalindm" => AmendmentType::ProposalInDm,
            _ => AmendmentType::Unknown(s),
        }
    }
}

impl From<AmendmentType> for String {
    fn from(kind: AmendmentType) -> Self {
        match kind {
            AmendmentType::OriginalLease => "Original Lease".to_string(),
            AmendmentType::NewLease => "New Lease".to_string(),
            AmendmentType::Renewal => "Renewal".to_string(),
            AmendmentType::Termination => "Termination".to_string(),
            AmendmentType::Modification => "Modification".to_string(),
            AmendmentType::ProposalInDm => "Proposal in DM".to_string(),
            AmendmentType::Unknown(s) => s,
        }
    }
}

/// Billing frequency of a recurring charge line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChargeFrequency {
    Monthly,
    Quarterly,
    SemiAnnually,
    Annually,
    Other(String),
}

impl ChargeFrequency {
    /// Number of months covered by one billing period, or `None` for an
    /// unrecognized frequency (the amount is then passed through raw and
    /// flagged, never silently treated as monthly).
    pub fn months_per_period(&self) -> Option<f64> {
        match self {
            ChargeFrequency::Monthly => Some(1.0),
            ChargeFrequency::Quarterly => Some(3.0),
            ChargeFrequency::SemiAnnually => Some(6.0),
            ChargeFrequency::Annually => Some(12.0),
            ChargeFrequency::Other(_) => None,
        }
    }
}

impl From<String> for ChargeFrequency {
    fn from(s: String) -> Self {
        match normalize(&s).as_str() {
            "monthly" => ChargeFrequency::Monthly,
            "quarterly" => ChargeFrequency::Quarterly,
            "semiannually" => ChargeFrequency::SemiAnnually,
            "annually" | "yearly" => ChargeFrequency::Annually,
            _ => ChargeFrequency::Other(s),
        }
    }
}

impl From<ChargeFrequency> for String {
    fn from(freq: ChargeFrequency) -> Self {
        match freq {
            ChargeFrequency::Monthly => "Monthly".to_string(),
            ChargeFrequency::Quarterly => "Quarterly".to_string(),
            ChargeFrequency::SemiAnnually => "Semi-Annually".to_string(),
            ChargeFrequency::Annually => "Annually".to_string(),
            ChargeFrequency::Other(s) => s,
        }
    }
}

/// Lowercase and strip separators so "Proposal in DM", "proposal-in-dm",
/// and "ProposalInDM" all parse to the same variant.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_' | '/'))
        .collect::<String>()
        .to_lowercase()
}

/// One version of a lease term for a (property, tenant) pair.
///
/// The amendment table is an append-only event log: rows are never mutated
/// once written, except the legacy convention that a row's status may flip
/// from Activated to Superseded when a later sequence supersedes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amendment {
    pub amendment_key: String,
    pub property_key: String,
    pub tenant_key: String,
    /// Monotonically increasing per (property, tenant), never reused.
    pub sequence: u32,
    pub status: AmendmentStatus,
    #[serde(rename = "type")]
    pub amendment_type: AmendmentType,
    pub start_date: NaiveDate,
    /// `None` means open-ended / month-to-month.
    pub end_date: Option<NaiveDate>,
    /// Leased area in square feet.
    pub leased_area: f64,
}

impl Amendment {
    /// True when the amendment's term covers `as_of`. A null end date is
    /// open-ended and never counts as expired.
    pub fn covers(&self, as_of: NaiveDate) -> bool {
        self.start_date <= as_of && self.end_date.map_or(true, |end| end >= as_of)
    }
}

/// One recurring charge line tied to an amendment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeScheduleEntry {
    pub amendment_key: String,
    /// Source-system charge code, e.g. base rent vs. other recoveries.
    pub charge_code: String,
    /// Amount per billing period.
    pub amount: f64,
    pub frequency: ChargeFrequency,
}

/// A property in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub property_key: String,
    pub code: String,
    pub acquire_date: NaiveDate,
    pub dispose_date: Option<NaiveDate>,
    /// Rentable area in square feet.
    pub rentable_area: f64,
}

/// Tenant identity. Credit attributes are out of scope for the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub tenant_key: String,
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_parses_source_spellings() {
        assert_eq!(
            AmendmentStatus::from("Activated".to_string()),
            AmendmentStatus::Activated
        );
        assert_eq!(
            AmendmentStatus::from("proposal in dm".to_string()),
            AmendmentStatus::ProposalInDm
        );
        assert_eq!(
            AmendmentStatus::from("Canceled".to_string()),
            AmendmentStatus::Cancelled
        );
    }

    #[test]
    fn test_unknown_status_is_carried_not_rejected() {
        let status = AmendmentStatus::from("In Process".to_string());
        assert!(status.is_unknown());
        assert_eq!(String::from(status), "In Process");
    }

    #[test]
    fn test_frequency_normalization_factors() {
        assert_eq!(ChargeFrequency::Monthly.months_per_period(), Some(1.0));
        assert_eq!(ChargeFrequency::Quarterly.months_per_period(), Some(3.0));
        assert_eq!(ChargeFrequency::SemiAnnually.months_per_period(), Some(6.0));
        assert_eq!(ChargeFrequency::Annually.months_per_period(), Some(12.0));
        assert_eq!(
            ChargeFrequency::Other("Biennially".to_string()).months_per_period(),
            None
        );
    }

    #[test]
    fn test_frequency_parses_hyphenated_spelling() {
        assert_eq!(
            ChargeFrequency::from("Semi-Annually".to_string()),
            ChargeFrequency::SemiAnnually
        );
    }

    #[test]
    fn test_null_end_date_is_open_ended() {
        let amendment = Amendment {
            amendment_key: "A1".to_string(),
            property_key: "P1".to_string(),
            tenant_key: "T1".to_string(),
            sequence: 1,
            status: AmendmentStatus::Activated,
            amendment_type: AmendmentType::OriginalLease,
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            end_date: None,
            leased_area: 1000.0,
        };
        // Far in the future, still covered.
        assert!(amendment.covers(NaiveDate::from_ymd_opt(2099, 12, 31).unwrap()));
        // Before commencement, not covered.
        assert!(!amendment.covers(NaiveDate::from_ymd_opt(2019, 12, 31).unwrap()));
    }

    #[test]
    fn test_amendment_round_trips_through_json() {
        let amendment = Amendment {
            amendment_key: "A1".to_string(),
            property_key: "P1".to_string(),
            tenant_key: "T1".to_string(),
            sequence: 2,
            status: AmendmentStatus::Superseded,
            amendment_type: AmendmentType::Renewal,
            start_date: NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(),
            end_date: Some(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()),
            leased_area: 2500.0,
        };
        let json = serde_json::to_string(&amendment).unwrap();
        let back: Amendment = serde_json::from_str(&json).unwrap();
        assert_eq!(amendment, back);
    }
}
