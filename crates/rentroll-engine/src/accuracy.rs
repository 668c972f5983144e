//! Accuracy validation against externally supplied benchmarks.
//!
//! Each computed measure is compared to its benchmark and scored:
//! `accuracy_pct = clamp(100 - |variance_pct|, 0, 100)`. PASS requires the
//! configured threshold (95% unless explicitly overridden) — a fixed
//! acceptance contract across the whole system, never varied per measure.

use std::collections::BTreeMap;

use rentroll_types::{CheckStatus, ValidationResult};

/// Compare one computed value against its benchmark.
///
/// A zero benchmark with a zero computed value is a perfect match; a zero
/// benchmark with any other computed value scores 0% accuracy (the variance
/// percentage is undefined, so the comparison fails outright).
pub fn compare(
    measure_name: &str,
    benchmark: f64,
    computed: f64,
    threshold_pct: f64,
) -> ValidationResult {
    let variance = computed - benchmark;

    if computed == benchmark {
        return ValidationResult {
            measure_name: measure_name.to_string(),
            benchmark,
            computed,
            variance,
            variance_pct: 0.0,
            accuracy_pct: 100.0,
            status: CheckStatus::Pass,
            detail: None,
        };
    }

    let variance_pct = if benchmark == 0.0 {
        100.0_f64.copysign(variance)
    } else {
        variance / benchmark * 100.0
    };
    let accuracy_pct = (100.0 - variance_pct.abs()).clamp(0.0, 100.0);
    let status = if accuracy_pct >= threshold_pct {
        CheckStatus::Pass
    } else {
        CheckStatus::Fail
    };

    ValidationResult {
        measure_name: measure_name.to_string(),
        benchmark,
        computed,
        variance,
        variance_pct,
        accuracy_pct,
        status,
        detail: None,
    }
}

/// Compare every benchmark measure against the computed map.
///
/// A benchmark measure absent from the computed side is marked FAIL with a
/// missing-data detail; the remaining measures still run — no global abort.
pub fn compare_all(
    benchmarks: &BTreeMap<String, f64>,
    computed: &BTreeMap<String, f64>,
    threshold_pct: f64,
) -> Vec<ValidationResult> {
    benchmarks
        .iter()
        .map(|(measure, &benchmark)| match computed.get(measure) {
            Some(&value) => compare(measure, benchmark, value, threshold_pct),
            None => ValidationResult {
                measure_name: measure.clone(),
                benchmark,
                computed: 0.0,
                variance: -benchmark,
                variance_pct: 0.0,
                accuracy_pct: 0.0,
                status: CheckStatus::Fail,
                detail: Some(format!("missing data: measure '{measure}' was not computed")),
            },
        })
        .collect()
}
