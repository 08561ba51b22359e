// tests/unit_actions.rs
use statescan_core::actions::{plan_actions, ImpactType, RemediationCatalog};
use statescan_core::error::EngineError;
use statescan_core::types::{Finding, Severity};

fn finding(file: &str, line: usize, category: &str) -> Finding {
    Finding {
        file: file.to_string(),
        unit: "Handler".to_string(),
        line,
        code: "...".to_string(),
        category: category.to_string(),
        severity: Severity::High,
        remediation: "fix".to_string(),
    }
}

/// Minimal catalog with one one-time and one per-occurrence action.
fn test_catalog() -> RemediationCatalog {
    RemediationCatalog::from_json(
        r#"{
        "categoryMap": {"Session State": "1"},
        "baseEffort": {"1": 25},
        "remediationActions": {
            "1": {
                "actions": [
                    {
                        "id": "provision-store",
                        "description": "Provision the store",
                        "actionCategory": "Infrastructure",
                        "impactType": "One-time",
                        "impactSeverity": "high",
                        "weight": 20,
                        "subActions": ["step one"]
                    },
                    {
                        "id": "migrate-site",
                        "description": "Migrate a call site",
                        "actionCategory": "Code Change",
                        "impactType": "Per-occurrence",
                        "impactSeverity": "medium",
                        "weight": 10
                    }
                ]
            }
        }
    }"#,
    )
    .unwrap()
}

#[test]
fn one_time_action_counts_once() {
    // One finding, weight 20, factor 1.5: adjusted 30.0, final 30.0.
    let findings = vec![finding("a.cs", 1, "Session State")];
    let report = plan_actions(&findings, 1.5, &test_catalog());

    let one_time = report
        .actions
        .iter()
        .find(|a| a.id == "provision-store")
        .unwrap();
    assert_eq!(one_time.impact_type, ImpactType::OneTime);
    assert_eq!(one_time.adjusted_weight, 30.0);
    assert_eq!(one_time.final_effort, 30.0);
    assert_eq!(one_time.occurrences, 0);
}

#[test]
fn one_time_action_is_idempotent_to_duplication() {
    let findings: Vec<Finding> = (1..=9)
        .map(|line| finding("a.cs", line, "Session State"))
        .collect();
    let report = plan_actions(&findings, 1.5, &test_catalog());

    let one_time = report
        .actions
        .iter()
        .find(|a| a.id == "provision-store")
        .unwrap();
    assert_eq!(one_time.final_effort, one_time.adjusted_weight);
    assert_eq!(one_time.occurrences, 0);
    // Every referencing finding is still recorded.
    assert_eq!(one_time.affected_findings.len(), 9);
}

#[test]
fn per_occurrence_scales_linearly() {
    // Four findings, weight 10, factor 1.2: adjusted 12.0, final 48.0.
    let findings: Vec<Finding> = (1..=4)
        .map(|line| finding("a.cs", line, "Session State"))
        .collect();
    let report = plan_actions(&findings, 1.2, &test_catalog());

    let per_occ = report
        .actions
        .iter()
        .find(|a| a.id == "migrate-site")
        .unwrap();
    assert_eq!(per_occ.impact_type, ImpactType::PerOccurrence);
    assert_eq!(per_occ.occurrences, 4);
    assert_eq!(per_occ.adjusted_weight, 12.0);
    assert_eq!(per_occ.final_effort, 48.0);
}

#[test]
fn occurrences_increment_by_one_per_finding() {
    let catalog = test_catalog();
    for n in 1..=6 {
        let findings: Vec<Finding> = (1..=n)
            .map(|line| finding("a.cs", line, "Session State"))
            .collect();
        let report = plan_actions(&findings, 1.0, &catalog);
        let per_occ = report
            .actions
            .iter()
            .find(|a| a.id == "migrate-site")
            .unwrap();
        assert_eq!(per_occ.occurrences, n);
    }
}

#[test]
fn missing_catalog_entry_is_skipped_not_fatal() {
    let catalog = RemediationCatalog::from_json(
        r#"{
        "categoryMap": {"Ghost Category": "99"},
        "baseEffort": {},
        "remediationActions": {}
    }"#,
    )
    .unwrap();
    let findings = vec![finding("a.cs", 1, "Ghost Category")];
    let report = plan_actions(&findings, 1.0, &catalog);

    assert_eq!(report.total_actions, 0);
    assert_eq!(report.total_effort, 0.0);
    assert!(report.actions.is_empty());
}

#[test]
fn total_effort_sums_final_efforts() {
    let findings: Vec<Finding> = (1..=3)
        .map(|line| finding("a.cs", line, "Session State"))
        .collect();
    let report = plan_actions(&findings, 1.0, &test_catalog());

    assert_eq!(report.total_actions, 2);
    let expected: f64 = report.actions.iter().map(|a| a.final_effort).sum();
    assert!((report.total_effort - expected).abs() < 1e-9);
    // 20.0 one-time + 10.0 x 3 per-occurrence.
    assert_eq!(report.total_effort, 50.0);
}

#[test]
fn actions_keep_first_reference_order() {
    let findings = vec![finding("a.cs", 1, "Session State")];
    let report = plan_actions(&findings, 1.0, &test_catalog());
    assert_eq!(report.actions[0].id, "provision-store");
    assert_eq!(report.actions[1].id, "migrate-site");
}

#[test]
fn affected_findings_carry_location_triples() {
    let findings = vec![finding("src/Cart.cs", 42, "Session State")];
    let report = plan_actions(&findings, 1.0, &test_catalog());
    let affected = &report.actions[0].affected_findings[0];
    assert_eq!(affected.file, "src/Cart.cs");
    assert_eq!(affected.unit, "Handler");
    assert_eq!(affected.line, 42);
}

#[test]
fn builtin_remediation_catalog_loads() {
    let catalog = RemediationCatalog::builtin().unwrap();
    assert_eq!(catalog.pattern_id_for("Session State"), "1");
    assert_eq!(catalog.pattern_id_for("Thread-Local Storage"), "25");
    assert_eq!(catalog.pattern_id_for("No Such Category"), "1");
    assert_eq!(catalog.base_effort_for("1"), 25.0);
    assert_eq!(catalog.base_effort_for("25"), 12.0);
    assert_eq!(catalog.base_effort_for("3"), 15.0);
}

#[test]
fn malformed_remediation_catalog_is_fatal() {
    let err = RemediationCatalog::from_json("[]").unwrap_err();
    assert!(matches!(err, EngineError::Catalog(_)));
}
