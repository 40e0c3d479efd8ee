//! End-to-end tests for nestcheck-syntax using insta for snapshot testing.
//!
//! These tests drive the public API over sample source files, pinning the
//! user-facing diagnostic text with inline snapshots.

use std::path::Path;

use insta::assert_snapshot;
use rstest::rstest;

use nestcheck_syntax::{
    DiagnosticReporter, Engine, ProfileRegistry, SyntaxError, TextReporter, Verdict, check,
};

const KEYWORDS_C: &str = include_str!("fixtures/keywords.c");
const SQUARE_CPP: &str = include_str!("fixtures/square.cpp");
const UNBALANCED_C: &str = include_str!("fixtures/unbalanced.c");
const LIFETIMES_RS: &str = include_str!("fixtures/lifetimes.rs");
const TEMPLATE_JS: &str = include_str!("fixtures/template.js");

fn registry() -> &'static ProfileRegistry {
    ProfileRegistry::builtin().unwrap_or_else(|err| panic!("builtin registry: {err}"))
}

// =============================================================================
// Happy Path: Balanced Fixtures
// =============================================================================

#[rstest]
#[case("keywords.c", KEYWORDS_C)]
#[case("square.cpp", SQUARE_CPP)]
#[case("lifetimes.rs", LIFETIMES_RS)]
#[case("template.js", TEMPLATE_JS)]
fn balanced_fixtures_pass(#[case] filename: &str, #[case] source: &str) {
    let profile = registry()
        .resolve_path(Path::new(filename))
        .unwrap_or_else(|| panic!("no profile for {filename}"));
    let verdict = check(source, profile).unwrap_or_else(|err| panic!("check: {err}"));
    assert_eq!(verdict, Verdict::Balanced, "{filename}");
}

#[test]
fn fixture_spans_cover_the_whole_input() {
    let report = Engine::new(registry())
        .analyse(KEYWORDS_C, "c")
        .unwrap_or_else(|err| panic!("analyse: {err}"));
    let rebuilt: String = report.spans().iter().map(|span| span.text).collect();
    assert_eq!(rebuilt, KEYWORDS_C);
}

// =============================================================================
// Unhappy Path: Diagnostics
// =============================================================================

#[test]
fn unbalanced_fixture_reports_mismatch_and_unclosed_brace() {
    let verdict = check(UNBALANCED_C, "c").unwrap_or_else(|err| panic!("check: {err}"));
    let lines = TextReporter.report(verdict.diagnostics());
    assert_snapshot!(lines.join("\n"), @r"
    mismatched at 3:26 — expected '}' to close '{' opened at 3:18, found ')'
    unmatched at 8:1 — '{' opened at 2:1 is never closed; expected '}'
    ");
}

#[test]
fn unterminated_regions_are_reported_with_stopping_point() {
    let source = "puts(\"hello);\n/* trailing";
    let verdict = check(source, "c").unwrap_or_else(|err| panic!("check: {err}"));
    let lines = TextReporter.report(verdict.diagnostics());
    assert_snapshot!(lines.join("\n"), @r#"
    unterminated literal at 1:6 — string literal has no closing '"' before 1:14
    unterminated comment at 2:1 — block comment opened with '/*' has no closing '*/' before 2:12
    unmatched at 2:12 — '(' opened at 1:5 is never closed; expected ')'
    "#);
}

#[test]
fn verdict_serialises_to_json() {
    let verdict = check("(]", "c").unwrap_or_else(|err| panic!("check: {err}"));
    let json = serde_json::to_string(&verdict).unwrap_or_else(|err| panic!("json: {err}"));
    assert_snapshot!(json, @r#"{"verdict":"unbalanced","diagnostics":[{"kind":"mismatched","position":{"offset":1,"line":1,"column":2},"detail":{"reason":"kind_mismatch","opener":"(","opened_at":{"offset":0,"line":1,"column":1},"expected":")","found":"]"}}]}"#);
}

#[test]
fn oversized_input_is_rejected() {
    let engine = Engine::new(registry()).with_max_input_bytes(16);
    let result = engine.check(KEYWORDS_C, "c");
    assert!(matches!(
        result,
        Err(SyntaxError::InputTooLarge { limit: 16, .. })
    ));
}
