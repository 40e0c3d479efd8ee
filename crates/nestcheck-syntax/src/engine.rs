//! Verification entry points.
//!
//! An [`Engine`] resolves a profile from its registry, classifies the input,
//! matches brackets in code spans and folds everything into a [`Verdict`].
//! Each call is independent; an engine holds no per-input state.

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::classifier::RegionClassifier;
use crate::diagnostic::Diagnostic;
use crate::error::SyntaxError;
use crate::matcher::{BracketEvent, BracketMatcher};
use crate::position::Position;
use crate::profile::LanguageProfile;
use crate::registry::ProfileRegistry;
use crate::span::Span;

/// Outcome of checking one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "diagnostics", rename_all = "snake_case")]
pub enum Verdict {
    /// Every bracket nests and every comment and literal is closed.
    Balanced,
    /// At least one diagnostic, ordered by position.
    Unbalanced(Vec<Diagnostic>),
}

impl Verdict {
    /// Builds a verdict from position-ordered diagnostics.
    #[must_use]
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        if diagnostics.is_empty() {
            Self::Balanced
        } else {
            Self::Unbalanced(diagnostics)
        }
    }

    /// Whether the input was balanced.
    #[must_use]
    pub const fn is_balanced(&self) -> bool {
        matches!(self, Self::Balanced)
    }

    /// The diagnostics, empty when balanced.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Balanced => &[],
            Self::Unbalanced(diagnostics) => diagnostics,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Balanced => f.write_str("balanced"),
            Self::Unbalanced(diagnostics) => {
                write!(f, "unbalanced ({} diagnostics)", diagnostics.len())
            }
        }
    }
}

/// Every intermediate product of one check.
#[derive(Debug, Clone)]
pub struct CheckReport<'src, 'p> {
    profile: &'p LanguageProfile,
    spans: Vec<Span<'src>>,
    events: Vec<BracketEvent<'p>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'src, 'p> CheckReport<'src, 'p> {
    /// The profile the input was checked against.
    #[must_use]
    pub const fn profile(&self) -> &'p LanguageProfile {
        self.profile
    }

    /// The classified spans, covering the input exactly once.
    #[must_use]
    pub fn spans(&self) -> &[Span<'src>] {
        &self.spans
    }

    /// Bracket characters found in code spans.
    #[must_use]
    pub fn events(&self) -> &[BracketEvent<'p>] {
        &self.events
    }

    /// Diagnostics ordered by position.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Position just past the last character of the input.
    #[must_use]
    pub fn end_of_input(&self) -> Position {
        end_of_input(&self.spans)
    }

    /// Returns the verdict without consuming the report.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        Verdict::from_diagnostics(self.diagnostics.clone())
    }

    /// Consumes the report, keeping only the verdict.
    #[must_use]
    pub fn into_verdict(self) -> Verdict {
        Verdict::from_diagnostics(self.diagnostics)
    }
}

/// Checks inputs against profiles held in a registry.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'r> {
    registry: &'r ProfileRegistry,
    max_input_bytes: Option<usize>,
}

impl<'r> Engine<'r> {
    /// Creates an engine with no input size ceiling.
    #[must_use]
    pub const fn new(registry: &'r ProfileRegistry) -> Self {
        Self {
            registry,
            max_input_bytes: None,
        }
    }

    /// Rejects inputs longer than `limit` bytes.
    #[must_use]
    pub const fn with_max_input_bytes(mut self, limit: usize) -> Self {
        self.max_input_bytes = Some(limit);
        self
    }

    /// The configured input size ceiling, if any.
    #[must_use]
    pub const fn max_input_bytes(&self) -> Option<usize> {
        self.max_input_bytes
    }

    /// The registry profiles are resolved from.
    #[must_use]
    pub const fn registry(&self) -> &'r ProfileRegistry {
        self.registry
    }

    /// Checks `text` against the profile registered as `profile_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::UnknownProfile`] if the identifier does not
    /// resolve, [`SyntaxError::InputTooLarge`] if the input exceeds the
    /// configured ceiling, and [`SyntaxError::InternalError`] if the
    /// classifier produced inconsistent spans.
    pub fn check(&self, text: &str, profile_id: &str) -> Result<Verdict, SyntaxError> {
        self.analyse(text, profile_id).map(CheckReport::into_verdict)
    }

    /// Like [`Engine::check`] but keeps spans and bracket events.
    ///
    /// # Errors
    ///
    /// See [`Engine::check`].
    pub fn analyse<'src>(
        &self,
        text: &'src str,
        profile_id: &str,
    ) -> Result<CheckReport<'src, 'r>, SyntaxError> {
        let profile = self.registry.resolve(profile_id)?;
        run(text, profile, self.max_input_bytes)
    }
}

/// Checks `text` against a predefined profile.
///
/// # Errors
///
/// See [`Engine::check`].
pub fn check(text: &str, profile_id: &str) -> Result<Verdict, SyntaxError> {
    Engine::new(ProfileRegistry::builtin()?).check(text, profile_id)
}

/// Checks `text` against a profile supplied by the caller.
///
/// # Errors
///
/// Returns [`SyntaxError::InternalError`] if the classifier produced
/// inconsistent spans.
pub fn check_with_profile(text: &str, profile: &LanguageProfile) -> Result<Verdict, SyntaxError> {
    analyse_with_profile(text, profile).map(CheckReport::into_verdict)
}

/// Like [`check_with_profile`] but keeps spans and bracket events.
///
/// # Errors
///
/// See [`check_with_profile`].
pub fn analyse_with_profile<'src, 'p>(
    text: &'src str,
    profile: &'p LanguageProfile,
) -> Result<CheckReport<'src, 'p>, SyntaxError> {
    run(text, profile, None)
}

fn run<'src, 'p>(
    text: &'src str,
    profile: &'p LanguageProfile,
    max_input_bytes: Option<usize>,
) -> Result<CheckReport<'src, 'p>, SyntaxError> {
    if let Some(limit) = max_input_bytes.filter(|limit| text.len() > *limit) {
        return Err(SyntaxError::input_too_large(text.len(), limit));
    }

    let spans = RegionClassifier::new(profile).classify(text);
    verify_coverage(&spans, text)?;
    trace!(profile = profile.name(), spans = spans.len(), "input classified");

    let matcher = BracketMatcher::new(profile);
    let events = matcher.events(&spans);

    let mut diagnostics: Vec<Diagnostic> = spans
        .iter()
        .filter_map(|span| Diagnostic::unterminated_region(span, profile))
        .collect();
    diagnostics.extend(matcher.validate(&events, end_of_input(&spans)));
    // Stable, so diagnostics sharing an offset keep their production order.
    diagnostics.sort_by_key(|diagnostic| diagnostic.position.offset);

    debug!(
        profile = profile.name(),
        bytes = text.len(),
        brackets = events.len(),
        diagnostics = diagnostics.len(),
        "input checked"
    );
    Ok(CheckReport {
        profile,
        spans,
        events,
        diagnostics,
    })
}

fn end_of_input(spans: &[Span<'_>]) -> Position {
    spans.last().map_or(Position::START, |span| span.end)
}

/// Confirms the spans tile the input without gaps, overlaps or empty spans.
fn verify_coverage(spans: &[Span<'_>], text: &str) -> Result<(), SyntaxError> {
    let mut expected = Position::START;
    for span in spans {
        let consistent = span.start == expected
            && !span.is_empty()
            && span.end.offset == span.start.offset + span.len();
        if !consistent {
            return Err(SyntaxError::internal_error(format!(
                "{} span at {} does not continue from {}",
                span.kind, span.start, expected
            )));
        }
        expected = span.end;
    }
    if expected.offset == text.len() {
        Ok(())
    } else {
        Err(SyntaxError::internal_error(format!(
            "spans cover {} of {} bytes",
            expected.offset,
            text.len()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;
    use crate::span::SpanKind;

    #[test]
    fn oversized_input_is_rejected_before_scanning() {
        let registry = ProfileRegistry::builtin().expect("builtin registry");
        let engine = Engine::new(registry).with_max_input_bytes(4);
        let error = engine.check("(());", "c").expect_err("input too large");
        assert_eq!(error, SyntaxError::input_too_large(5, 4));
        assert!(engine.check("()", "c").expect("check").is_balanced());
    }

    #[test]
    fn unknown_profile_is_reported() {
        let error = check("()", "klingon").expect_err("unknown profile");
        assert!(matches!(error, SyntaxError::UnknownProfile { .. }));
    }

    #[test]
    fn diagnostics_are_ordered_by_offset() {
        let verdict = check(")\n\"open\n(", "c").expect("check");
        let kinds: Vec<DiagnosticKind> = verdict
            .diagnostics()
            .iter()
            .map(|diagnostic| diagnostic.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::Unmatched,
                DiagnosticKind::UnterminatedLiteral,
                DiagnosticKind::Unmatched,
            ]
        );
    }

    #[test]
    fn coverage_check_rejects_gaps() {
        let spans = [Span {
            kind: SpanKind::Code,
            start: Position::new(1, 1, 2),
            end: Position::new(2, 1, 3),
            text: "x",
            unterminated: false,
        }];
        let error = verify_coverage(&spans, "xx").expect_err("gap");
        assert!(matches!(error, SyntaxError::InternalError { .. }));
    }

    #[test]
    fn report_keeps_intermediate_products() {
        let registry = ProfileRegistry::builtin().expect("builtin registry");
        let report = Engine::new(registry)
            .analyse("f(/* ) */);", "c")
            .expect("analyse");
        assert_eq!(report.spans().len(), 3);
        assert_eq!(report.events().len(), 2);
        assert_eq!(report.end_of_input(), Position::new(11, 1, 12));
        assert_eq!(report.verdict(), Verdict::Balanced);
    }

    #[test]
    fn verdict_serialises_with_tag() {
        let json = serde_json::to_string(&Verdict::Balanced).expect("serialise");
        assert_eq!(json, r#"{"verdict":"balanced"}"#);
    }
}
