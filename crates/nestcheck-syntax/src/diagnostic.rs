//! Positioned findings about bracket structure and unclosed regions.

use std::fmt;

use serde::Serialize;

use crate::position::Position;
use crate::profile::LanguageProfile;
use crate::span::{Span, SpanKind};

/// Category of a structural finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A closer with no opener, or an opener never closed.
    Unmatched,
    /// A closer of a different kind from the innermost open bracket.
    Mismatched,
    /// A string or character literal without its closing delimiter.
    UnterminatedLiteral,
    /// A block comment without its closing marker.
    UnterminatedComment,
}

impl DiagnosticKind {
    /// Returns the human-readable label for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unmatched => "unmatched",
            Self::Mismatched => "mismatched",
            Self::UnterminatedLiteral => "unterminated literal",
            Self::UnterminatedComment => "unterminated comment",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured context explaining a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DiagnosticDetail {
    /// A closing bracket arrived while nothing was open.
    UnexpectedCloser {
        /// The closing character.
        found: char,
        /// Kind label of the closer's pair.
        kind: String,
    },
    /// An opening bracket was still open at end of input.
    UnclosedOpener {
        /// The opening character.
        opener: char,
        /// Kind label of the opener's pair.
        kind: String,
        /// The closer that would have matched.
        expected: char,
        /// Where the opener appeared.
        opened_at: Position,
    },
    /// A closing bracket did not match the innermost opener.
    KindMismatch {
        /// The innermost opening character.
        opener: char,
        /// Where that opener appeared.
        opened_at: Position,
        /// The closer that would have matched it.
        expected: char,
        /// The closing character actually found.
        found: char,
    },
    /// A literal hit a newline or end of input before its delimiter.
    OpenLiteral {
        /// Whether the literal was a string or a character literal.
        literal: SpanKind,
        /// The delimiter that would have closed it.
        delimiter: String,
        /// Where scanning of the literal stopped.
        stopped_at: Position,
    },
    /// A block comment hit end of input before its closer.
    OpenComment {
        /// The opening marker.
        open: String,
        /// The closing marker that was never found.
        close: String,
        /// Where scanning of the comment stopped.
        stopped_at: Position,
    },
}

impl fmt::Display for DiagnosticDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCloser { found, kind } => {
                write!(f, "'{found}' closes a {kind} that was never opened")
            }
            Self::UnclosedOpener {
                opener,
                expected,
                opened_at,
                ..
            } => write!(
                f,
                "'{opener}' opened at {opened_at} is never closed; expected '{expected}'"
            ),
            Self::KindMismatch {
                opener,
                opened_at,
                expected,
                found,
            } => write!(
                f,
                "expected '{expected}' to close '{opener}' opened at {opened_at}, found '{found}'"
            ),
            Self::OpenLiteral {
                literal,
                delimiter,
                stopped_at,
            } => write!(
                f,
                "{literal} has no closing '{delimiter}' before {stopped_at}"
            ),
            Self::OpenComment {
                open,
                close,
                stopped_at,
            } => write!(
                f,
                "block comment opened with '{open}' has no closing '{close}' before {stopped_at}"
            ),
        }
    }
}

/// One positioned structural finding.
///
/// Rendered as `<kind> at <line>:<column> — <detail>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Category of the finding.
    pub kind: DiagnosticKind,
    /// Where the finding applies.
    pub position: Position,
    /// Supporting context.
    pub detail: DiagnosticDetail,
}

impl Diagnostic {
    /// A closer seen while the stack was empty; positioned at the closer.
    pub(crate) fn unexpected_closer(position: Position, found: char, kind: &str) -> Self {
        Self {
            kind: DiagnosticKind::Unmatched,
            position,
            detail: DiagnosticDetail::UnexpectedCloser {
                found,
                kind: kind.to_owned(),
            },
        }
    }

    /// An opener left on the stack; positioned at end of input.
    pub(crate) fn unclosed_opener(
        end_of_input: Position,
        opener: char,
        kind: &str,
        expected: char,
        opened_at: Position,
    ) -> Self {
        Self {
            kind: DiagnosticKind::Unmatched,
            position: end_of_input,
            detail: DiagnosticDetail::UnclosedOpener {
                opener,
                kind: kind.to_owned(),
                expected,
                opened_at,
            },
        }
    }

    /// A closer of the wrong kind; positioned at the closer.
    pub(crate) const fn kind_mismatch(
        position: Position,
        opener: char,
        opened_at: Position,
        expected: char,
        found: char,
    ) -> Self {
        Self {
            kind: DiagnosticKind::Mismatched,
            position,
            detail: DiagnosticDetail::KindMismatch {
                opener,
                opened_at,
                expected,
                found,
            },
        }
    }

    /// Builds the diagnostic for an unterminated comment or literal span.
    ///
    /// Returns `None` for terminated spans and for kinds that cannot be
    /// unterminated.
    pub(crate) fn unterminated_region(span: &Span<'_>, profile: &LanguageProfile) -> Option<Self> {
        if !span.unterminated {
            return None;
        }
        let (kind, detail) = match span.kind {
            SpanKind::StringLiteral | SpanKind::CharLiteral => {
                let delimiter = match profile.block_string_at(span.text) {
                    Some(rule) if span.kind == SpanKind::StringLiteral => rule.close().to_owned(),
                    _ => span.text.chars().next()?.to_string(),
                };
                (
                    DiagnosticKind::UnterminatedLiteral,
                    DiagnosticDetail::OpenLiteral {
                        literal: span.kind,
                        delimiter,
                        stopped_at: span.end,
                    },
                )
            }
            SpanKind::BlockComment => {
                let rule = profile.block_comment_at(span.text)?;
                (
                    DiagnosticKind::UnterminatedComment,
                    DiagnosticDetail::OpenComment {
                        open: rule.open().to_owned(),
                        close: rule.close().to_owned(),
                        stopped_at: span.end,
                    },
                )
            }
            SpanKind::Code | SpanKind::LineComment => return None,
        };
        Some(Self {
            kind,
            position: span.start,
            detail,
        })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {} — {}", self.kind, self.position, self.detail)
    }
}
