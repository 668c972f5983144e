//! Reporting periods and same-store classification.
//!
//! A property is "same-store" for a period when it was held throughout: it
//! was acquired strictly before the period started and either never disposed
//! or disposed strictly after the period ended. Same-store membership gates
//! all absorption arithmetic; properties failing the predicate are routed to
//! the disposition/acquisition calculations instead.

use chrono::NaiveDate;
use rentroll_types::Property;

use crate::config::EngineConfig;
use crate::error::EngineError;

/// A reporting period with configurable boundary inclusivity.
///
/// Inclusivity applies to amendment date-window membership (`contains`); the
/// same-store predicate itself is strict on both ends regardless of these
/// knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingPeriod {
    start: NaiveDate,
    end: NaiveDate,
    start_inclusive: bool,
    end_inclusive: bool,
}

impl ReportingPeriod {
    /// Build a period with both boundaries inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPeriod`] when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, EngineError> {
        if start > end {
            return Err(EngineError::InvalidPeriod { start, end });
        }
        Ok(Self {
            start,
            end,
            start_inclusive: true,
            end_inclusive: true,
        })
    }

    /// Build a period taking boundary inclusivity from the configuration.
    pub fn with_config(
        start: NaiveDate,
        end: NaiveDate,
        config: &EngineConfig,
    ) -> Result<Self, EngineError> {
        let mut period = Self::new(start, end)?;
        period.start_inclusive = config.period_start_inclusive;
        period.end_inclusive = config.period_end_inclusive;
        Ok(period)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` falls inside the period under the configured
    /// boundary inclusivity.
    pub fn contains(&self, date: NaiveDate) -> bool {
        let after_start = if self.start_inclusive {
            date >= self.start
        } else {
            date > self.start
        };
        let before_end = if self.end_inclusive {
            date <= self.end
        } else {
            date < self.end
        };
        after_start && before_end
    }
}

/// Whether a property qualifies as same-store for the period:
/// acquired before it started and not disposed on or before its end.
pub fn is_same_store(property: &Property, period: &ReportingPeriod) -> bool {
    property.acquire_date < period.start()
        && property
            .dispose_date
            .map_or(true, |disposed| disposed > period.end())
}

/// The subset of properties qualifying as same-store for the period.
pub fn same_store<'a>(properties: &'a [Property], period: &ReportingPeriod) -> Vec<&'a Property> {
    properties
        .iter()
        .filter(|p| is_same_store(p, period))
        .collect()
}
