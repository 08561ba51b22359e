// tests/unit_rules.rs
use statescan_core::ecosystem::Ecosystem;
use statescan_core::error::EngineError;
use statescan_core::rules::RuleRegistry;
use statescan_core::types::Severity;

#[test]
fn builtin_catalog_compiles() {
    let registry = RuleRegistry::builtin().unwrap();
    assert_eq!(registry.patterns(Ecosystem::DotNet).len(), 7);
    assert_eq!(registry.patterns(Ecosystem::Java).len(), 7);
    assert_eq!(registry.len(), 14);
    assert!(!registry.is_empty());
}

#[test]
fn malformed_json_is_fatal() {
    let err = RuleRegistry::from_json("{not json").unwrap_err();
    assert!(matches!(err, EngineError::Catalog(_)));
}

#[test]
fn empty_pattern_list_is_fatal() {
    let err = RuleRegistry::from_json(r#"{"patterns": []}"#).unwrap_err();
    assert!(matches!(err, EngineError::Catalog(_)));
}

#[test]
fn missing_field_is_fatal() {
    let raw = r#"{"patterns": [{"id": "x", "language": "java", "regex": "a"}]}"#;
    assert!(RuleRegistry::from_json(raw).is_err());
}

#[test]
fn uncompilable_expression_is_fatal() {
    let raw = r#"{"patterns": [{
        "id": "bad",
        "language": "java",
        "regex": "(unclosed",
        "category": "X",
        "severity": "low",
        "remediation": "none"
    }]}"#;
    let err = RuleRegistry::from_json(raw).unwrap_err();
    match err {
        EngineError::Pattern { id, .. } => assert_eq!(id, "bad"),
        other => panic!("expected Pattern error, got {other:?}"),
    }
}

#[test]
fn exclude_suppresses_match() {
    let registry = RuleRegistry::builtin().unwrap();
    let static_mutable = registry
        .patterns(Ecosystem::DotNet)
        .iter()
        .find(|p| p.category == "Static Mutable Field")
        .unwrap();

    assert!(static_mutable.is_match("    public static int Counter = 0;"));
    assert!(!static_mutable.is_match("    public static readonly int Max = 10;"));
    assert!(!static_mutable.is_match("    private const string Name = \"x\";"));
}

#[test]
fn java_final_is_not_mutable_state() {
    let registry = RuleRegistry::builtin().unwrap();
    let static_mutable = registry
        .patterns(Ecosystem::Java)
        .iter()
        .find(|p| p.category == "Static Mutable Field")
        .unwrap();

    assert!(static_mutable.is_match("    private static List<String> cache = new ArrayList<>();"));
    assert!(!static_mutable.is_match("    private static final Logger LOG = getLogger();"));
}

#[test]
fn builtin_severities_are_classified() {
    let registry = RuleRegistry::builtin().unwrap();
    let session = registry
        .patterns(Ecosystem::DotNet)
        .iter()
        .find(|p| p.category == "Session State")
        .unwrap();
    assert_eq!(session.severity, Severity::High);
    assert!(session.is_match("Session[\"user\"] = user;"));
    assert!(session.is_match("var u = HttpContext.Current.Session[\"user\"];"));
}
