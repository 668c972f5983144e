pub mod reports;
pub mod types;

pub use reports::{
    AbsorptionReport, CheckStatus, DataQualityResult, LeaseFlag, ResolvedLease, Severity,
    ValidationResult,
};
pub use types::{
    Amendment, AmendmentStatus, AmendmentType, ChargeFrequency, ChargeScheduleEntry, Property,
    Tenant,
};
