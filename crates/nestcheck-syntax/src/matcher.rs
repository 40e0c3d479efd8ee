//! Bracket nesting validation over code spans.
//!
//! [`BracketMatcher::events`] extracts bracket characters from code spans
//! only; comments and literals never contribute. [`BracketMatcher::validate`]
//! then replays the events against a stack of open brackets.

use crate::diagnostic::Diagnostic;
use crate::position::Position;
use crate::profile::{Direction, LanguageProfile};
use crate::span::Span;

/// One bracket character found in code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketEvent<'p> {
    /// Where the character appears.
    pub position: Position,
    /// The bracket character.
    pub ch: char,
    /// Whether it opens or closes its pair.
    pub direction: Direction,
    /// Kind label of its pair.
    pub kind: &'p str,
}

/// Stack-based nesting check for one profile's bracket pairs.
#[derive(Debug, Clone, Copy)]
pub struct BracketMatcher<'p> {
    profile: &'p LanguageProfile,
}

impl<'p> BracketMatcher<'p> {
    /// Creates a matcher for the profile's bracket pairs.
    #[must_use]
    pub const fn new(profile: &'p LanguageProfile) -> Self {
        Self { profile }
    }

    /// Lists bracket characters inside code spans, in source order.
    #[must_use]
    pub fn events(&self, spans: &[Span<'_>]) -> Vec<BracketEvent<'p>> {
        let profile = self.profile;
        let mut events = Vec::new();
        for span in spans.iter().filter(|span| span.is_code()) {
            let mut position = span.start;
            for ch in span.text.chars() {
                if let Some((direction, pair)) = profile.bracket_role(ch) {
                    events.push(BracketEvent {
                        position,
                        ch,
                        direction,
                        kind: pair.kind(),
                    });
                }
                position = position.advance(ch);
            }
        }
        events
    }

    /// Checks that `events` nest correctly.
    ///
    /// Diagnostics are produced in event order. A closer with nothing open is
    /// reported at the closer and skipped. A closer of the wrong kind is
    /// reported at the closer and still pops the innermost opener, so one
    /// slip does not cascade. Openers left over are reported at
    /// `end_of_input`, oldest first.
    #[must_use]
    pub fn validate(&self, events: &[BracketEvent<'p>], end_of_input: Position) -> Vec<Diagnostic> {
        let mut stack: Vec<&BracketEvent<'p>> = Vec::new();
        let mut diagnostics = Vec::new();

        for event in events {
            match event.direction {
                Direction::Open => stack.push(event),
                Direction::Close => match stack.pop() {
                    None => diagnostics.push(Diagnostic::unexpected_closer(
                        event.position,
                        event.ch,
                        event.kind,
                    )),
                    Some(opener) if opener.kind != event.kind => {
                        diagnostics.push(Diagnostic::kind_mismatch(
                            event.position,
                            opener.ch,
                            opener.position,
                            self.closer_for(opener.ch),
                            event.ch,
                        ));
                    }
                    Some(_) => {}
                },
            }
        }

        diagnostics.extend(stack.into_iter().map(|opener| {
            Diagnostic::unclosed_opener(
                end_of_input,
                opener.ch,
                opener.kind,
                self.closer_for(opener.ch),
                opener.position,
            )
        }));
        diagnostics
    }

    fn closer_for(&self, opener: char) -> char {
        self.profile
            .bracket_role(opener)
            .map_or(opener, |(_, pair)| pair.close())
    }
}
