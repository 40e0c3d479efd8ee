//! Labelled regions of source text.

use std::fmt;

use serde::Serialize;

use crate::position::Position;

/// Lexical classification of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    /// Structurally significant text; the only kind scanned for brackets.
    Code,
    /// A comment running to the end of its line.
    LineComment,
    /// A delimited, possibly multi-line comment.
    BlockComment,
    /// A string literal, delimiters included.
    StringLiteral,
    /// A character literal, delimiters included.
    CharLiteral,
}

impl SpanKind {
    /// Returns the lower-case label for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::LineComment => "line comment",
            Self::BlockComment => "block comment",
            Self::StringLiteral => "string literal",
            Self::CharLiteral => "character literal",
        }
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous classified region borrowed from the source text.
///
/// The classifier emits spans in source order; each span starts where the
/// previous one ended and together they cover the input exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'src> {
    /// Classification of the region.
    pub kind: SpanKind,
    /// Position of the first character.
    pub start: Position,
    /// Position just past the last character.
    pub end: Position,
    /// The region's text.
    pub text: &'src str,
    /// Set when a comment or literal reached a boundary before its closer.
    pub unterminated: bool,
}

impl Span<'_> {
    /// Whether this span is scanned for brackets.
    #[must_use]
    pub fn is_code(&self) -> bool {
        self.kind == SpanKind::Code
    }

    /// Length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the span covers no text.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
