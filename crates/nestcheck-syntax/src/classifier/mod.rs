//! Region classification for bracket checking.
//!
//! The classifier walks the source once, left to right, and splits it into
//! [`Span`]s: code, line comments, block comments, string literals and
//! character literals. Only code spans are structurally significant; the
//! matcher never looks inside the others.
//!
//! At each offset the classifier tries, in order, a block comment opener, a
//! line comment marker, a block string opener, a string delimiter and a
//! character literal delimiter. Overlapping markers are resolved by the profile's
//! [`MarkerPrecedence`](crate::MarkerPrecedence). Anything else accumulates
//! into the current code span.
//!
//! Malformed input never aborts the scan. A comment or literal that reaches
//! its boundary without a closer is emitted with `unterminated` set and
//! scanning resumes after it.

mod cursor;

use crate::profile::{
    BlockCommentRule, BlockStringRule, CharLiteralRule, LanguageProfile, StringRule,
};
use crate::span::{Span, SpanKind};

use cursor::Cursor;

/// Splits source text into classified spans under one profile.
#[derive(Debug, Clone, Copy)]
pub struct RegionClassifier<'p> {
    profile: &'p LanguageProfile,
}

/// A non-code region detected at the cursor.
enum Region<'p> {
    Block(&'p BlockCommentRule),
    Line(&'p str),
    BlockString(&'p BlockStringRule),
    Literal(Literal),
}

/// Scanning rules shared by string and character literals.
#[derive(Debug, Clone, Copy)]
struct Literal {
    kind: SpanKind,
    delimiter: char,
    escape: Option<char>,
    multiline: bool,
}

impl Literal {
    const fn string(rule: &StringRule) -> Self {
        Self {
            kind: SpanKind::StringLiteral,
            delimiter: rule.delimiter(),
            escape: rule.escape(),
            multiline: rule.is_multiline(),
        }
    }

    const fn character(rule: &CharLiteralRule) -> Self {
        Self {
            kind: SpanKind::CharLiteral,
            delimiter: rule.delimiter(),
            escape: rule.escape(),
            multiline: false,
        }
    }
}

impl<'p> RegionClassifier<'p> {
    /// Creates a classifier for the given profile.
    #[must_use]
    pub const fn new(profile: &'p LanguageProfile) -> Self {
        Self { profile }
    }

    /// Returns the profile driving this classifier.
    #[must_use]
    pub const fn profile(&self) -> &'p LanguageProfile {
        self.profile
    }

    /// Classifies `source` into an exhaustive, ordered span sequence.
    ///
    /// Concatenating the text of the returned spans reproduces `source`
    /// exactly. Empty input yields no spans.
    #[must_use]
    pub fn classify<'src>(&self, source: &'src str) -> Vec<Span<'src>> {
        let mut cursor = Cursor::new(source);
        let mut spans = Vec::new();
        let mut code_start = cursor.position();

        while let Some(ch) = cursor.peek() {
            let Some(region) = self.region_at(ch, cursor.rest()) else {
                cursor.bump();
                continue;
            };
            if cursor.position().offset > code_start.offset {
                spans.push(cursor.span_from(SpanKind::Code, code_start, false));
            }
            spans.push(scan_region(&mut cursor, region));
            code_start = cursor.position();
        }

        if cursor.position().offset > code_start.offset {
            spans.push(cursor.span_from(SpanKind::Code, code_start, false));
        }
        spans
    }

    fn region_at(&self, ch: char, rest: &str) -> Option<Region<'p>> {
        let profile = self.profile;
        if !profile.may_open_region(ch) {
            return None;
        }
        if let Some(rule) = profile.block_comment_at(rest) {
            return Some(Region::Block(rule));
        }
        if let Some(marker) = profile.line_comment_at(rest) {
            return Some(Region::Line(marker));
        }
        if let Some(rule) = profile.block_string_at(rest) {
            return Some(Region::BlockString(rule));
        }
        if let Some(rule) = profile.string_rule(ch) {
            return Some(Region::Literal(Literal::string(rule)));
        }
        profile
            .char_literal_at(rest)
            .map(|rule| Region::Literal(Literal::character(rule)))
    }
}

fn scan_region<'src>(cursor: &mut Cursor<'src>, region: Region<'_>) -> Span<'src> {
    match region {
        Region::Block(rule) => scan_block_comment(cursor, rule),
        Region::Line(marker) => scan_line_comment(cursor, marker),
        Region::BlockString(rule) => scan_block_string(cursor, rule),
        Region::Literal(literal) => scan_literal(cursor, literal),
    }
}

fn scan_line_comment<'src>(cursor: &mut Cursor<'src>, marker: &str) -> Span<'src> {
    let start = cursor.position();
    cursor.skip(marker.len());
    let rest = cursor.rest();
    let line = rest.split('\n').next().unwrap_or(rest);
    cursor.skip(line.len());
    cursor.span_from(SpanKind::LineComment, start, false)
}

fn scan_block_comment<'src>(cursor: &mut Cursor<'src>, rule: &BlockCommentRule) -> Span<'src> {
    let start = cursor.position();
    cursor.skip(rule.open().len());
    let terminated = if rule.is_nestable() {
        skip_nested_comment(cursor, rule)
    } else {
        skip_flat_comment(cursor, rule)
    };
    cursor.span_from(SpanKind::BlockComment, start, !terminated)
}

fn skip_flat_comment(cursor: &mut Cursor<'_>, rule: &BlockCommentRule) -> bool {
    let rest = cursor.rest();
    let found = rest.find(rule.close());
    cursor.skip(found.map_or(rest.len(), |index| index + rule.close().len()));
    found.is_some()
}

/// Skips to the closer matching an already consumed opener, counting depth.
fn skip_nested_comment(cursor: &mut Cursor<'_>, rule: &BlockCommentRule) -> bool {
    let mut depth: usize = 1;
    loop {
        if cursor.eat(rule.close()) {
            depth -= 1;
            if depth == 0 {
                return true;
            }
        } else if cursor.eat(rule.open()) {
            depth += 1;
        } else if cursor.bump().is_none() {
            return false;
        }
    }
}

fn scan_block_string<'src>(cursor: &mut Cursor<'src>, rule: &BlockStringRule) -> Span<'src> {
    let start = cursor.position();
    cursor.skip(rule.open().len());
    let terminated = loop {
        if cursor.eat(rule.close()) {
            break true;
        }
        match cursor.bump() {
            None => break false,
            Some(ch) if Some(ch) == rule.escape() => {
                cursor.bump();
            }
            Some(_) => {}
        }
    };
    cursor.span_from(SpanKind::StringLiteral, start, !terminated)
}

fn scan_literal<'src>(cursor: &mut Cursor<'src>, literal: Literal) -> Span<'src> {
    let start = cursor.position();
    cursor.bump();
    let terminated = loop {
        match cursor.peek() {
            None => break false,
            Some('\n') if !literal.multiline => break false,
            Some(ch) if Some(ch) == literal.escape => {
                // The escaped character belongs to the literal whatever it is.
                cursor.bump();
                cursor.bump();
            }
            Some(ch) => {
                cursor.bump();
                if ch == literal.delimiter {
                    break true;
                }
            }
        }
    };
    cursor.span_from(literal.kind, start, !terminated)
}
