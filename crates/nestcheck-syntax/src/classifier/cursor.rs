//! Forward-only scanning cursor with incremental position tracking.

use crate::position::Position;
use crate::span::{Span, SpanKind};

pub(super) struct Cursor<'src> {
    source: &'src str,
    position: Position,
}

impl<'src> Cursor<'src> {
    pub(super) const fn new(source: &'src str) -> Self {
        Self {
            source,
            position: Position::START,
        }
    }

    pub(super) const fn position(&self) -> Position {
        self.position
    }

    /// Unscanned remainder of the source.
    pub(super) fn rest(&self) -> &'src str {
        self.source.get(self.position.offset..).unwrap_or_default()
    }

    pub(super) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(super) fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position = self.position.advance(ch);
        Some(ch)
    }

    /// Consumes `len` bytes, clamped to the end of the source.
    pub(super) fn skip(&mut self, len: usize) {
        let rest = self.rest();
        let skipped = rest.get(..len).unwrap_or(rest);
        self.position = self.position.advance_str(skipped);
    }

    /// Consumes `marker` if the remainder starts with it.
    pub(super) fn eat(&mut self, marker: &str) -> bool {
        if self.rest().starts_with(marker) {
            self.skip(marker.len());
            true
        } else {
            false
        }
    }

    /// Builds a span from `start` up to the current position.
    pub(super) fn span_from(
        &self,
        kind: SpanKind,
        start: Position,
        unterminated: bool,
    ) -> Span<'src> {
        Span {
            kind,
            start,
            end: self.position,
            text: self
                .source
                .get(start.offset..self.position.offset)
                .unwrap_or_default(),
            unterminated,
        }
    }
}
