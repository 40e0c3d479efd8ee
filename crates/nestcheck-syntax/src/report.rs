//! Rendering of diagnostics for callers.

use crate::diagnostic::Diagnostic;

/// Turns a diagnostic list into a caller-facing representation.
pub trait DiagnosticReporter {
    /// Representation produced by the reporter.
    type Output;

    /// Renders `diagnostics`, which arrive ordered by position.
    fn report(&self, diagnostics: &[Diagnostic]) -> Self::Output;
}

/// Renders one `<kind> at <line>:<column> — <detail>` line per diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReporter;

impl DiagnosticReporter for TextReporter {
    type Output = Vec<String>;

    fn report(&self, diagnostics: &[Diagnostic]) -> Self::Output {
        diagnostics.iter().map(ToString::to_string).collect()
    }
}

/// Hands diagnostics through unchanged, for serialisation by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredReporter;

impl DiagnosticReporter for StructuredReporter {
    type Output = Vec<Diagnostic>;

    fn report(&self, diagnostics: &[Diagnostic]) -> Self::Output {
        diagnostics.to_vec()
    }
}
