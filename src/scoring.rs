// src/scoring.rs
//! Project complexity estimation.

use crate::ecosystem::Ecosystem;
use crate::types::{Finding, Severity};
use std::collections::HashSet;

/// Rounds to one decimal place, half away from zero.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Derives the multiplicative effort adjustment from aggregate finding
/// statistics. Additive model on a base of 1.0; pure and deterministic for
/// a given `(findings, ecosystem)` input.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn complexity_factor(findings: &[Finding], ecosystem: Ecosystem) -> f64 {
    let total_files = findings
        .iter()
        .map(|f| f.file.as_str())
        .collect::<HashSet<_>>()
        .len();
    let total_issues = findings.len();

    let mut factor = 1.0;

    // More files touched means more coordination overhead.
    if total_files > 100 {
        factor += 0.5;
    } else if total_files > 50 {
        factor += 0.3;
    } else if total_files > 20 {
        factor += 0.1;
    }

    // Issue density: findings per contributing file.
    let density = total_issues as f64 / total_files.max(1) as f64;
    if density > 10.0 {
        factor += 0.4;
    } else if density > 5.0 {
        factor += 0.2;
    }

    let high_count = findings
        .iter()
        .filter(|f| f.severity == Severity::High)
        .count();
    let high_ratio = high_count as f64 / total_issues.max(1) as f64;
    if high_ratio > 0.5 {
        factor += 0.3;
    }

    factor += ecosystem.complexity_weight();

    let factor = round1(factor);
    debug_assert!(factor.is_finite() && factor >= 1.0);
    factor
}
