//! Integration tests for the in-process analysis pipeline.
//!
//! These tests run the engine against the testdata fixtures and check the
//! aggregated result.

use std::path::PathBuf;

use sharpcheck::{AnalysisResult, DiagnosticSeverity, Engine, RuleCategory};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn analyze_fixture(name: &str) -> AnalysisResult {
    Engine::default()
        .analyze_file(&testdata_path().join(name), Some(name))
        .expect("analysis should succeed")
}

fn count_containing(result: &AnalysisResult, needle: &str) -> usize {
    result
        .suggestions
        .iter()
        .filter(|s| s.contains(needle))
        .count()
}

#[test]
fn test_clean_fixture_has_no_findings() {
    let result = analyze_fixture("clean.cs");

    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    assert!(result.suggestions.is_empty(), "{:?}", result.suggestions);
    assert_eq!(result.metrics.class_count, 1);
    assert_eq!(result.metrics.method_count, 2);
    // if + &&
    assert_eq!(result.metrics.cyclomatic_complexity, 3);
}

#[test]
fn test_insecure_fixture() {
    let result = analyze_fixture("insecure.cs");

    assert_eq!(count_containing(&result, "SQL injection"), 1);
    assert_eq!(count_containing(&result, "System.Random"), 1);
    assert_eq!(count_containing(&result, "hardcoded secret in 'dbPassword'"), 1);
    assert_eq!(count_containing(&result, "'File.Delete'"), 1);
    assert_eq!(count_containing(&result, "swallows a general Exception"), 1);
    assert_eq!(count_containing(&result, "missing XML documentation"), 3);
}

#[test]
fn test_query_fixture() {
    let result = analyze_fixture("queries.cs");

    assert_eq!(count_containing(&result, "Use Any() instead of comparing Count()"), 1);
    assert_eq!(count_containing(&result, "Count(predicate)"), 1);
    assert_eq!(count_containing(&result, "concatenation inside a loop"), 1);
    assert_eq!(count_containing(&result, "'active' is not materialized"), 1);
    assert_eq!(count_containing(&result, "ConfigureAwait(false)"), 1);
    assert_eq!(count_containing(&result, "string interpolation"), 1);
    assert_eq!(count_containing(&result, "Async method 'Load'"), 1);
}

#[test]
fn test_suggestions_ordered_by_category() {
    let result = analyze_fixture("queries.cs");
    let categories: Vec<RuleCategory> = result
        .suggestions
        .iter()
        .map(|s| RuleCategory::of_suggestion(s))
        .collect();
    let mut sorted = categories.clone();
    sorted.sort();
    assert_eq!(categories, sorted);
    assert_eq!(categories.first(), Some(&RuleCategory::Basic));
    assert_eq!(categories.last(), Some(&RuleCategory::Linq));
}

#[test]
fn test_broken_fixture_reports_syntax_errors() {
    let result = analyze_fixture("broken.cs");

    assert!(!result.diagnostics.is_empty());
    for d in &result.diagnostics {
        assert_eq!(d.severity, DiagnosticSeverity::Error);
        assert_eq!(d.category, "Syntax");
        let loc = d.location.as_ref().expect("syntax errors carry a location");
        assert_eq!(loc.file, "broken.cs");
        assert!(loc.line >= 1 && loc.column >= 1);
    }
    assert!(result.metrics.cyclomatic_complexity >= 1);
}

#[test]
fn test_latin1_fixture_is_analyzed() {
    let raw = std::fs::read(testdata_path().join("latin1.cs")).unwrap();
    assert!(std::str::from_utf8(&raw).is_err());

    let result = analyze_fixture("latin1.cs");
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.metrics.class_count, 1);
    assert_eq!(result.metrics.method_count, 1);
}

#[test]
fn test_inline_examples() {
    let engine = Engine::default();

    let sql = engine
        .analyze_source(
            "class R { void M(string name) { var q = \"DELETE FROM Users WHERE Name='\" + name + \"'\"; } }",
            None,
        )
        .unwrap();
    assert_eq!(count_containing(&sql, "SQL injection"), 1);

    let rng = engine
        .analyze_source("class D { Random r = new Random(); }", None)
        .unwrap();
    assert_eq!(count_containing(&rng, "System.Random"), 1);

    let linq = engine
        .analyze_source(
            "class Q { bool M(List<Item> items) { return items.Where(x=>x.Active).Count() > 0; } }",
            None,
        )
        .unwrap();
    assert_eq!(count_containing(&linq, "Use Any() instead"), 1);
    assert_eq!(count_containing(&linq, "Count(predicate)"), 1);
}
