//! Engine configuration
//!
//! This module provides TOML-based configuration for the resolution and
//! absorption pipeline: the accepted base-rent charge codes, the
//! month-to-month term placeholder, the accuracy acceptance threshold, and
//! reporting-period boundary inclusivity.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Tunable parameters for the resolution and absorption pipeline.
///
/// Every field has a documented default so `EngineConfig::default()` is a
/// complete, usable configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Charge codes counted as base rent when aggregating monthly rent.
    /// Matching is case-insensitive.
    #[serde(default = "default_charge_codes")]
    pub base_rent_charge_codes: Vec<String>,

    /// Term length, in months, substituted for leases with no end date when
    /// computing remaining term and WALT. The source conventions disagree
    /// (36 months vs. indefinite), so this is an explicit knob rather than a
    /// hidden constant; default 36.
    #[serde(default = "default_month_to_month_term")]
    pub month_to_month_term_months: f64,

    /// Minimum accuracy percentage for a measure to PASS validation.
    /// A fixed acceptance contract across the whole system; default 95.
    #[serde(default = "default_accuracy_threshold")]
    pub accuracy_threshold_pct: f64,

    /// Whether an amendment dated exactly on the period start counts as
    /// inside the period (default true).
    #[serde(default = "default_inclusive")]
    pub period_start_inclusive: bool,

    /// Whether an amendment dated exactly on the period end counts as
    /// inside the period (default true).
    #[serde(default = "default_inclusive")]
    pub period_end_inclusive: bool,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    ///
    /// # Example
    ///
    /// ```
    /// use rentroll_engine::config::EngineConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let toml = r#"
    ///     base_rent_charge_codes = ["rnt", "baserent"]
    ///     month_to_month_term_months = 12.0
    /// "#;
    /// let config = EngineConfig::from_str(toml)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }

    /// Accepted charge codes, lowercased for case-insensitive matching.
    pub fn charge_code_set(&self) -> BTreeSet<String> {
        self.base_rent_charge_codes
            .iter()
            .map(|c| c.to_lowercase())
            .collect()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_rent_charge_codes: default_charge_codes(),
            month_to_month_term_months: default_month_to_month_term(),
            accuracy_threshold_pct: default_accuracy_threshold(),
            period_start_inclusive: default_inclusive(),
            period_end_inclusive: default_inclusive(),
        }
    }
}

fn default_charge_codes() -> Vec<String> {
    vec!["rnt".to_string()]
}

fn default_month_to_month_term() -> f64 {
    36.0
}

fn default_accuracy_threshold() -> f64 {
    95.0
}

fn default_inclusive() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_are_complete() {
        let config = EngineConfig::default();
        assert_eq!(config.base_rent_charge_codes, vec!["rnt".to_string()]);
        assert_eq!(config.month_to_month_term_months, 36.0);
        assert_eq!(config.accuracy_threshold_pct, 95.0);
        assert!(config.period_start_inclusive);
        assert!(config.period_end_inclusive);
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = EngineConfig::from_str("").unwrap();
        assert_eq!(config.accuracy_threshold_pct, 95.0);
    }

    #[test]
    fn test_partial_toml_overrides_only_named_fields() {
        let toml = r#"
            base_rent_charge_codes = ["RNT", "BaseRent"]
            period_end_inclusive = false
        "#;
        let config = EngineConfig::from_str(toml).unwrap();
        assert_eq!(config.base_rent_charge_codes.len(), 2);
        assert!(!config.period_end_inclusive);
        assert!(config.period_start_inclusive);
        assert_eq!(config.month_to_month_term_months, 36.0);
    }

    #[test]
    fn test_charge_code_set_is_lowercased() {
        let toml = r#"base_rent_charge_codes = ["RNT", "Rnt", "other"]"#;
        let config = EngineConfig::from_str(toml).unwrap();
        let set = config.charge_code_set();
        assert_eq!(set.len(), 2);
        assert!(set.contains("rnt"));
        assert!(set.contains("other"));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(EngineConfig::from_str("base_rent_charge_codes = 3").is_err());
    }
}
