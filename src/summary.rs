// src/summary.rs
//! Deduplicated issue summary with complexity-adjusted effort.

use crate::actions::RemediationCatalog;
use crate::scoring::round1;
use crate::types::{Finding, Severity};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One distinct `(category, severity, remediation)` issue class.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEntry {
    pub id: usize,
    pub category: String,
    pub severity: Severity,
    pub remediation: String,
    pub occurrences: usize,
    pub base_effort: f64,
    pub effort_score: f64,
    /// 1-based ids into `detailed` for the member findings.
    pub detail_ids: Vec<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailedFinding {
    pub id: usize,
    #[serde(flatten)]
    pub finding: Finding,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub total_files: usize,
    pub total_issues: usize,
    pub high_severity: usize,
    pub medium_severity: usize,
    pub low_severity: usize,
    pub complexity_factor: f64,
    pub total_effort_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub summary: Vec<SummaryEntry>,
    pub detailed: Vec<DetailedFinding>,
    pub stats: SummaryStats,
}

/// Groups findings into unique issue classes, in first-occurrence order
/// (stable for a given input ordering, never sorted).
///
/// Base effort is looked up once per group through the catalog's
/// category→canonical-id mapping; `effort_score` is the one-decimal,
/// complexity-adjusted effort for the class.
#[must_use]
pub fn summarize(
    findings: &[Finding],
    complexity_factor: f64,
    catalog: &RemediationCatalog,
) -> SummaryReport {
    let mut index: HashMap<(String, Severity, String), usize> = HashMap::new();
    let mut summary: Vec<SummaryEntry> = Vec::new();

    for (position, finding) in findings.iter().enumerate() {
        let key = (
            finding.category.clone(),
            finding.severity,
            finding.remediation.clone(),
        );
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                let pattern_id = catalog.pattern_id_for(&finding.category);
                let base_effort = catalog.base_effort_for(pattern_id);
                summary.push(SummaryEntry {
                    id: summary.len() + 1,
                    category: finding.category.clone(),
                    severity: finding.severity,
                    remediation: finding.remediation.clone(),
                    occurrences: 0,
                    base_effort,
                    effort_score: round1(base_effort * complexity_factor),
                    detail_ids: Vec::new(),
                });
                index.insert(key, summary.len() - 1);
                summary.len() - 1
            }
        };
        summary[slot].occurrences += 1;
        summary[slot].detail_ids.push(position + 1);
    }

    let detailed = findings
        .iter()
        .enumerate()
        .map(|(position, finding)| DetailedFinding {
            id: position + 1,
            finding: finding.clone(),
        })
        .collect();

    let total_files = findings
        .iter()
        .map(|f| f.file.as_str())
        .collect::<HashSet<_>>()
        .len();
    let count_severity = |severity: Severity| {
        findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    };
    let total_effort_score: f64 = summary.iter().map(|entry| entry.effort_score).sum();
    debug_assert!(total_effort_score.is_finite());

    SummaryReport {
        stats: SummaryStats {
            total_files,
            total_issues: findings.len(),
            high_severity: count_severity(Severity::High),
            medium_severity: count_severity(Severity::Medium),
            low_severity: count_severity(Severity::Low),
            complexity_factor,
            total_effort_score,
        },
        summary,
        detailed,
    }
}
