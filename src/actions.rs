// src/actions.rs
//! Remediation catalog and the weighted action planner.

use crate::error::{EngineError, Result};
use crate::scoring::round1;
use crate::types::{Finding, Severity};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

const BUILTIN_ACTIONS: &str = include_str!("../rules/remediation-actions.json");

/// Whether an action's cost is paid once per project or per match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactType {
    #[serde(rename = "One-time")]
    OneTime,
    #[serde(rename = "Per-occurrence")]
    PerOccurrence,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemediationAction {
    pub id: String,
    pub description: String,
    pub action_category: String,
    pub impact_type: ImpactType,
    pub impact_severity: Severity,
    pub weight: f64,
    #[serde(default)]
    pub sub_actions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ActionSet {
    actions: Vec<RemediationAction>,
}

/// The remediation catalog: actions keyed by canonical pattern id, plus the
/// category→id mapping and base-effort table used by both aggregators.
///
/// The mapping covers far fewer categories than a full rule catalog can
/// contain; unmapped categories fall back to `defaultPatternId`. Keeping the
/// table in the catalog JSON makes that known gap configurable rather than
/// hardcoded.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemediationCatalog {
    category_map: HashMap<String, String>,
    #[serde(default = "default_pattern_id")]
    default_pattern_id: String,
    base_effort: HashMap<String, f64>,
    #[serde(default = "default_effort")]
    default_effort: f64,
    remediation_actions: HashMap<String, ActionSet>,
}

fn default_pattern_id() -> String {
    "1".to_string()
}

fn default_effort() -> f64 {
    15.0
}

impl RemediationCatalog {
    /// Parses the catalog shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Catalog` if the embedded catalog is malformed;
    /// that indicates a packaging defect.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_ACTIONS)
    }

    /// Parses a remediation catalog from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Catalog` for invalid JSON or missing fields.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| EngineError::Catalog(format!("remediation catalog: {e}")))
    }

    /// Canonical pattern id for a finding category, falling back to the
    /// default id for anything the mapping does not cover.
    #[must_use]
    pub fn pattern_id_for(&self, category: &str) -> &str {
        self.category_map
            .get(category)
            .map_or(self.default_pattern_id.as_str(), String::as_str)
    }

    /// Base effort units for a canonical pattern id.
    #[must_use]
    pub fn base_effort_for(&self, pattern_id: &str) -> f64 {
        self.base_effort
            .get(pattern_id)
            .copied()
            .unwrap_or(self.default_effort)
    }

    fn actions_for(&self, pattern_id: &str) -> Option<&[RemediationAction]> {
        self.remediation_actions
            .get(pattern_id)
            .map(|set| set.actions.as_slice())
    }
}

/// Location of one finding that contributed to an action.
#[derive(Debug, Clone, Serialize)]
pub struct AffectedFinding {
    pub file: String,
    pub unit: String,
    pub line: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEntry {
    pub id: String,
    pub description: String,
    pub category: String,
    pub impact_type: ImpactType,
    pub impact_severity: Severity,
    pub base_weight: f64,
    pub adjusted_weight: f64,
    /// Qualifying finding count. Stays 0 for one-time actions, which are
    /// paid once no matter how many findings reference them.
    pub occurrences: usize,
    pub final_effort: f64,
    pub sub_actions: Vec<String>,
    pub affected_findings: Vec<AffectedFinding>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionReport {
    pub total_actions: usize,
    pub total_effort: f64,
    pub actions: Vec<ActionEntry>,
}

/// Maps findings to remediation actions and computes complexity-adjusted,
/// impact-aware effort per action. Entries appear in first-reference order.
///
/// A resolved pattern id with no catalog entry is skipped with a warning:
/// the finding still shows up in the summary, it just contributes nothing
/// to the plan.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn plan_actions(
    findings: &[Finding],
    complexity_factor: f64,
    catalog: &RemediationCatalog,
) -> ActionReport {
    let mut order: Vec<String> = Vec::new();
    let mut entries: HashMap<String, ActionEntry> = HashMap::new();
    let mut warned: HashSet<String> = HashSet::new();

    for finding in findings {
        let pattern_id = catalog.pattern_id_for(&finding.category);
        let Some(actions) = catalog.actions_for(pattern_id) else {
            if warned.insert(pattern_id.to_string()) {
                eprintln!(
                    "WARN: no remediation actions for pattern id {pattern_id} (category `{}`)",
                    finding.category
                );
            }
            continue;
        };

        for action in actions {
            let entry = entries.entry(action.id.clone()).or_insert_with(|| {
                order.push(action.id.clone());
                ActionEntry {
                    id: action.id.clone(),
                    description: action.description.clone(),
                    category: action.action_category.clone(),
                    impact_type: action.impact_type,
                    impact_severity: action.impact_severity,
                    base_weight: action.weight,
                    adjusted_weight: round1(action.weight * complexity_factor),
                    occurrences: 0,
                    final_effort: 0.0,
                    sub_actions: action.sub_actions.clone(),
                    affected_findings: Vec::new(),
                }
            });
            if action.impact_type == ImpactType::PerOccurrence {
                entry.occurrences += 1;
            }
            entry.affected_findings.push(AffectedFinding {
                file: finding.file.clone(),
                unit: finding.unit.clone(),
                line: finding.line,
            });
        }
    }

    let mut actions = Vec::with_capacity(order.len());
    let mut total_effort = 0.0;
    for id in order {
        if let Some(mut entry) = entries.remove(&id) {
            entry.final_effort = match entry.impact_type {
                ImpactType::OneTime => entry.adjusted_weight,
                ImpactType::PerOccurrence => entry.adjusted_weight * entry.occurrences as f64,
            };
            total_effort += entry.final_effort;
            actions.push(entry);
        }
    }
    debug_assert!(total_effort.is_finite());

    ActionReport {
        total_actions: actions.len(),
        total_effort,
        actions,
    }
}
