// tests/unit_summary.rs
use statescan_core::actions::RemediationCatalog;
use statescan_core::summary::summarize;
use statescan_core::types::{Finding, Severity};

fn finding(file: &str, line: usize, category: &str, severity: Severity) -> Finding {
    Finding {
        file: file.to_string(),
        unit: "Handler".to_string(),
        line,
        code: "...".to_string(),
        category: category.to_string(),
        severity,
        remediation: format!("fix {category}"),
    }
}

fn catalog() -> RemediationCatalog {
    RemediationCatalog::builtin().unwrap()
}

#[test]
fn occurrences_sum_to_finding_count() {
    let findings = vec![
        finding("a.cs", 1, "Session State", Severity::High),
        finding("a.cs", 9, "Session State", Severity::High),
        finding("b.cs", 3, "In-Process Cache", Severity::Medium),
        finding("c.cs", 7, "Session State", Severity::High),
        finding("c.cs", 8, "Configuration State", Severity::Low),
    ];
    let report = summarize(&findings, 1.0, &catalog());

    let total: usize = report.summary.iter().map(|e| e.occurrences).sum();
    assert_eq!(total, findings.len());
    assert_eq!(report.detailed.len(), findings.len());
}

#[test]
fn groups_keep_first_occurrence_order() {
    let findings = vec![
        finding("a.cs", 1, "In-Process Cache", Severity::Medium),
        finding("a.cs", 2, "Session State", Severity::High),
        finding("b.cs", 1, "In-Process Cache", Severity::Medium),
    ];
    let report = summarize(&findings, 1.0, &catalog());

    assert_eq!(report.summary.len(), 2);
    assert_eq!(report.summary[0].category, "In-Process Cache");
    assert_eq!(report.summary[0].id, 1);
    assert_eq!(report.summary[0].occurrences, 2);
    assert_eq!(report.summary[0].detail_ids, vec![1, 3]);
    assert_eq!(report.summary[1].category, "Session State");
    assert_eq!(report.summary[1].detail_ids, vec![2]);
}

#[test]
fn effort_uses_canonical_base_and_factor() {
    // Session State -> canonical id 1 -> base effort 25.
    let findings = vec![finding("a.cs", 1, "Session State", Severity::High)];
    let report = summarize(&findings, 1.5, &catalog());

    assert_eq!(report.summary[0].base_effort, 25.0);
    assert_eq!(report.summary[0].effort_score, 37.5);
}

#[test]
fn unmapped_category_falls_back_to_default_id() {
    // No mapping for this category: default id 1 -> base effort 25.
    let findings = vec![finding("a.cs", 1, "Message Queue State", Severity::Low)];
    let report = summarize(&findings, 1.0, &catalog());
    assert_eq!(report.summary[0].base_effort, 25.0);
}

#[test]
fn mapped_id_without_effort_entry_uses_default_effort() {
    // Application State -> id 3, absent from the base-effort table -> 15.
    let findings = vec![finding("a.cs", 1, "Application State", Severity::High)];
    let report = summarize(&findings, 1.2, &catalog());
    assert_eq!(report.summary[0].base_effort, 15.0);
    assert_eq!(report.summary[0].effort_score, 18.0);
}

#[test]
fn stats_count_files_and_severities() {
    let findings = vec![
        finding("a.cs", 1, "Session State", Severity::High),
        finding("a.cs", 2, "Session State", Severity::High),
        finding("b.cs", 1, "In-Process Cache", Severity::Medium),
        finding("b.cs", 2, "Configuration State", Severity::Low),
    ];
    let report = summarize(&findings, 1.1, &catalog());
    let stats = &report.stats;

    assert_eq!(stats.total_files, 2);
    assert_eq!(stats.total_issues, 4);
    assert_eq!(stats.high_severity, 2);
    assert_eq!(stats.medium_severity, 1);
    assert_eq!(stats.low_severity, 1);
    assert_eq!(stats.complexity_factor, 1.1);

    let expected: f64 = report.summary.iter().map(|e| e.effort_score).sum();
    assert!((stats.total_effort_score - expected).abs() < 1e-9);
}

#[test]
fn empty_findings_empty_report() {
    let report = summarize(&[], 1.0, &catalog());
    assert!(report.summary.is_empty());
    assert!(report.detailed.is_empty());
    assert_eq!(report.stats.total_issues, 0);
    assert_eq!(report.stats.total_effort_score, 0.0);
}

#[test]
fn detailed_ids_are_one_based_positions() {
    let findings = vec![
        finding("a.cs", 10, "Session State", Severity::High),
        finding("b.cs", 20, "Session State", Severity::High),
    ];
    let report = summarize(&findings, 1.0, &catalog());
    assert_eq!(report.detailed[0].id, 1);
    assert_eq!(report.detailed[1].id, 2);
    assert_eq!(report.detailed[1].finding.file, "b.cs");
}
