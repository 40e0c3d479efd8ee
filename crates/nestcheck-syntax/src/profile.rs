//! Lexical conventions of a language family.
//!
//! A [`LanguageProfile`] is immutable configuration: which markers open
//! comments, which characters delimit string and character literals, and
//! which bracket pairs must nest. Profiles are assembled with
//! [`LanguageProfileBuilder`], which rejects definitions the classifier could
//! not interpret unambiguously.

use std::fmt;

use crate::error::SyntaxError;

/// How the classifier chooses between several markers matching at one offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MarkerPrecedence {
    /// The longest matching marker wins; ties go to the earliest declared.
    #[default]
    LongestMatch,
    /// The first declared matching marker wins regardless of length.
    DeclarationOrder,
}

impl MarkerPrecedence {
    /// Picks one candidate according to this precedence rule.
    ///
    /// Candidates must arrive in declaration order.
    fn select<T>(
        self,
        mut candidates: impl Iterator<Item = T>,
        len: impl Fn(&T) -> usize,
    ) -> Option<T> {
        match self {
            Self::DeclarationOrder => candidates.next(),
            Self::LongestMatch => candidates.fold(None, |best, candidate| match best {
                Some(current) if len(&current) >= len(&candidate) => Some(current),
                _ => Some(candidate),
            }),
        }
    }

    /// Returns the lower-case identifier for this precedence rule.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LongestMatch => "longest_match",
            Self::DeclarationOrder => "declaration_order",
        }
    }
}

impl fmt::Display for MarkerPrecedence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A block comment delimited by an opening and a closing marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockCommentRule {
    open: String,
    close: String,
    nestable: bool,
}

impl BlockCommentRule {
    /// Creates a non-nesting block comment rule.
    #[must_use]
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
            nestable: false,
        }
    }

    /// Allows nested occurrences of this comment to be counted.
    #[must_use]
    pub fn nestable(mut self) -> Self {
        self.nestable = true;
        self
    }

    /// Marker that opens the comment.
    #[must_use]
    pub fn open(&self) -> &str {
        &self.open
    }

    /// Marker that closes the comment.
    #[must_use]
    pub fn close(&self) -> &str {
        &self.close
    }

    /// Whether nested openers increase the comment depth.
    #[must_use]
    pub const fn is_nestable(&self) -> bool {
        self.nestable
    }
}

/// A string literal opened and closed by the same character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StringRule {
    delimiter: char,
    escape: Option<char>,
    multiline: bool,
}

impl StringRule {
    /// Creates a single-line string rule without an escape character.
    #[must_use]
    pub const fn new(delimiter: char) -> Self {
        Self {
            delimiter,
            escape: None,
            multiline: false,
        }
    }

    /// Sets the escape character.
    #[must_use]
    pub const fn with_escape(mut self, escape: char) -> Self {
        self.escape = Some(escape);
        self
    }

    /// Lets the literal run across newlines.
    #[must_use]
    pub const fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    /// Character that opens and closes the literal.
    #[must_use]
    pub const fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Escape character, if any.
    #[must_use]
    pub const fn escape(&self) -> Option<char> {
        self.escape
    }

    /// Whether the literal may span lines.
    #[must_use]
    pub const fn is_multiline(&self) -> bool {
        self.multiline
    }
}

/// A string literal bounded by multi-character markers.
///
/// Block strings always span lines. Python's triple-quoted strings are the
/// motivating case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockStringRule {
    open: String,
    close: String,
    escape: Option<char>,
}

impl BlockStringRule {
    /// Creates a block string rule without an escape character.
    #[must_use]
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
            escape: None,
        }
    }

    /// Sets the escape character.
    #[must_use]
    pub fn with_escape(mut self, escape: char) -> Self {
        self.escape = Some(escape);
        self
    }

    /// Marker that opens the literal.
    #[must_use]
    pub fn open(&self) -> &str {
        &self.open
    }

    /// Marker that closes the literal.
    #[must_use]
    pub fn close(&self) -> &str {
        &self.close
    }

    /// Escape character, if any.
    #[must_use]
    pub const fn escape(&self) -> Option<char> {
        self.escape
    }
}

/// A character literal rule.
///
/// With `single_unit` set, the delimiter only opens a literal when followed
/// by one character (or an escape sequence) and the closing delimiter;
/// otherwise it is ordinary code. Rust lifetimes rely on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharLiteralRule {
    delimiter: char,
    escape: Option<char>,
    single_unit: bool,
}

impl CharLiteralRule {
    /// Creates a character literal rule without an escape character.
    #[must_use]
    pub const fn new(delimiter: char) -> Self {
        Self {
            delimiter,
            escape: None,
            single_unit: false,
        }
    }

    /// Sets the escape character.
    #[must_use]
    pub const fn with_escape(mut self, escape: char) -> Self {
        self.escape = Some(escape);
        self
    }

    /// Restricts the literal to a single character or escape sequence.
    #[must_use]
    pub const fn single_unit(mut self) -> Self {
        self.single_unit = true;
        self
    }

    /// Character that opens and closes the literal.
    #[must_use]
    pub const fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Escape character, if any.
    #[must_use]
    pub const fn escape(&self) -> Option<char> {
        self.escape
    }

    /// Whether the literal is restricted to a single unit.
    #[must_use]
    pub const fn is_single_unit(&self) -> bool {
        self.single_unit
    }

    /// Decides whether `text`, which starts with the delimiter, opens a literal.
    fn opens_literal(&self, text: &str) -> bool {
        let mut chars = text.chars();
        if chars.next() != Some(self.delimiter) {
            return false;
        }
        if !self.single_unit {
            return true;
        }
        match chars.next() {
            None | Some('\n') => false,
            Some(ch) if Some(ch) == self.escape => true,
            Some(ch) if ch == self.delimiter => false,
            Some(_) => chars.next() == Some(self.delimiter),
        }
    }
}

/// Whether a bracket character opens or closes its pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The character opens a pair.
    Open,
    /// The character closes a pair.
    Close,
}

/// One nesting relation to validate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BracketPair {
    open: char,
    close: char,
    kind: String,
}

impl BracketPair {
    /// Creates a bracket pair.
    #[must_use]
    pub fn new(open: char, close: char, kind: impl Into<String>) -> Self {
        Self {
            open,
            close,
            kind: kind.into(),
        }
    }

    /// Opening character.
    #[must_use]
    pub const fn open(&self) -> char {
        self.open
    }

    /// Closing character.
    #[must_use]
    pub const fn close(&self) -> char {
        self.close
    }

    /// Kind label, for example `paren`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

/// Lexical rules for one language family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProfile {
    name: String,
    line_comments: Vec<String>,
    block_comments: Vec<BlockCommentRule>,
    block_strings: Vec<BlockStringRule>,
    strings: Vec<StringRule>,
    char_literal: Option<CharLiteralRule>,
    brackets: Vec<BracketPair>,
    precedence: MarkerPrecedence,
    /// First characters of every region opener, for the classifier's fast path.
    region_starts: Vec<char>,
}

impl LanguageProfile {
    /// Starts building a profile with the given name.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LanguageProfileBuilder {
        LanguageProfileBuilder::new(name)
    }

    /// The profile's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Markers starting a comment that runs to the end of the line.
    #[must_use]
    pub fn line_comments(&self) -> &[String] {
        &self.line_comments
    }

    /// Block comment rules in declaration order.
    #[must_use]
    pub fn block_comments(&self) -> &[BlockCommentRule] {
        &self.block_comments
    }

    /// Block string rules in declaration order.
    #[must_use]
    pub fn block_strings(&self) -> &[BlockStringRule] {
        &self.block_strings
    }

    /// String literal rules in declaration order.
    #[must_use]
    pub fn strings(&self) -> &[StringRule] {
        &self.strings
    }

    /// The character literal rule, if the language has one.
    #[must_use]
    pub const fn char_literal(&self) -> Option<&CharLiteralRule> {
        self.char_literal.as_ref()
    }

    /// Bracket pairs in declaration order.
    #[must_use]
    pub fn brackets(&self) -> &[BracketPair] {
        &self.brackets
    }

    /// Rule for choosing between overlapping markers.
    #[must_use]
    pub const fn precedence(&self) -> MarkerPrecedence {
        self.precedence
    }

    /// Whether `ch` is the first character of any comment or literal opener.
    pub(crate) fn may_open_region(&self, ch: char) -> bool {
        self.region_starts.contains(&ch)
    }

    /// Returns the block comment rule whose opener starts `text`.
    pub(crate) fn block_comment_at(&self, text: &str) -> Option<&BlockCommentRule> {
        self.precedence.select(
            self.block_comments
                .iter()
                .filter(|rule| text.starts_with(rule.open.as_str())),
            |rule| rule.open.len(),
        )
    }

    /// Returns the block string rule whose opener starts `text`.
    pub(crate) fn block_string_at(&self, text: &str) -> Option<&BlockStringRule> {
        self.precedence.select(
            self.block_strings
                .iter()
                .filter(|rule| text.starts_with(rule.open.as_str())),
            |rule| rule.open.len(),
        )
    }

    /// Returns the line comment marker that starts `text`.
    pub(crate) fn line_comment_at(&self, text: &str) -> Option<&str> {
        self.precedence.select(
            self.line_comments
                .iter()
                .map(String::as_str)
                .filter(|marker| text.starts_with(marker)),
            |marker| marker.len(),
        )
    }

    /// Returns the string rule delimited by `ch`.
    pub(crate) fn string_rule(&self, ch: char) -> Option<&StringRule> {
        self.strings.iter().find(|rule| rule.delimiter == ch)
    }

    /// Returns the character literal rule if `text` opens a character literal.
    pub(crate) fn char_literal_at(&self, text: &str) -> Option<&CharLiteralRule> {
        self.char_literal
            .as_ref()
            .filter(|rule| rule.opens_literal(text))
    }

    /// Classifies `ch` as an opening or closing bracket.
    pub(crate) fn bracket_role(&self, ch: char) -> Option<(Direction, &BracketPair)> {
        self.brackets.iter().find_map(|pair| {
            if pair.open == ch {
                Some((Direction::Open, pair))
            } else if pair.close == ch {
                Some((Direction::Close, pair))
            } else {
                None
            }
        })
    }
}

/// Incremental builder for [`LanguageProfile`].
#[derive(Debug, Clone)]
pub struct LanguageProfileBuilder {
    name: String,
    line_comments: Vec<String>,
    block_comments: Vec<BlockCommentRule>,
    block_strings: Vec<BlockStringRule>,
    strings: Vec<StringRule>,
    char_literal: Option<CharLiteralRule>,
    brackets: Vec<BracketPair>,
    precedence: MarkerPrecedence,
}

impl LanguageProfileBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            line_comments: Vec::new(),
            block_comments: Vec::new(),
            block_strings: Vec::new(),
            strings: Vec::new(),
            char_literal: None,
            brackets: Vec::new(),
            precedence: MarkerPrecedence::default(),
        }
    }

    /// Adds a line comment marker.
    #[must_use]
    pub fn line_comment(mut self, marker: impl Into<String>) -> Self {
        self.line_comments.push(marker.into());
        self
    }

    /// Adds a block comment rule.
    #[must_use]
    pub fn block_comment(mut self, rule: BlockCommentRule) -> Self {
        self.block_comments.push(rule);
        self
    }

    /// Adds a block string rule.
    #[must_use]
    pub fn block_string(mut self, rule: BlockStringRule) -> Self {
        self.block_strings.push(rule);
        self
    }

    /// Adds a string literal rule.
    #[must_use]
    pub fn string(mut self, rule: StringRule) -> Self {
        self.strings.push(rule);
        self
    }

    /// Sets the character literal rule.
    #[must_use]
    pub fn char_literal(mut self, rule: CharLiteralRule) -> Self {
        self.char_literal = Some(rule);
        self
    }

    /// Adds a bracket pair.
    #[must_use]
    pub fn bracket(mut self, open: char, close: char, kind: impl Into<String>) -> Self {
        self.brackets.push(BracketPair::new(open, close, kind));
        self
    }

    /// Adds the `()`, `{}` and `[]` pairs as `paren`, `brace` and `bracket`.
    #[must_use]
    pub fn standard_brackets(self) -> Self {
        self.bracket('(', ')', "paren")
            .bracket('{', '}', "brace")
            .bracket('[', ']', "bracket")
    }

    /// Sets the marker precedence rule.
    #[must_use]
    pub fn precedence(mut self, precedence: MarkerPrecedence) -> Self {
        self.precedence = precedence;
        self
    }

    /// Validates the rules and produces the profile.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError::InvalidProfile`] when the name or a marker is
    /// empty, when one opener is declared twice (within or across
    /// categories), when an escape character equals its delimiter or starts
    /// a block string closer, when no
    /// bracket pair is declared, or when a bracket character or kind label
    /// is reused.
    pub fn build(self) -> Result<LanguageProfile, SyntaxError> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(SyntaxError::invalid_profile("<unnamed>", "profile name is empty"));
        }
        let reject = |message: String| SyntaxError::invalid_profile(name.as_str(), message);

        let mut openers: Vec<String> = Vec::new();
        let mut claim = |opener: String, what: &str| -> Result<(), SyntaxError> {
            if opener.is_empty() {
                return Err(reject(format!("{what} marker is empty")));
            }
            if openers.contains(&opener) {
                return Err(reject(format!("'{opener}' is declared more than once")));
            }
            openers.push(opener);
            Ok(())
        };

        for marker in &self.line_comments {
            claim(marker.clone(), "line comment")?;
        }
        for rule in &self.block_comments {
            claim(rule.open.clone(), "block comment")?;
            if rule.close.is_empty() {
                return Err(reject(format!(
                    "block comment '{}' has an empty closer",
                    rule.open
                )));
            }
        }
        for rule in &self.block_strings {
            claim(rule.open.clone(), "block string")?;
            if rule.close.is_empty() {
                return Err(reject(format!(
                    "block string '{}' has an empty closer",
                    rule.open
                )));
            }
            if rule.escape.is_some_and(|escape| rule.close.starts_with(escape)) {
                return Err(reject(format!(
                    "block string closer '{}' cannot start with its escape",
                    rule.close
                )));
            }
        }
        for rule in &self.strings {
            claim(rule.delimiter.to_string(), "string")?;
            if rule.escape == Some(rule.delimiter) {
                return Err(reject(format!(
                    "string delimiter '{}' cannot be its own escape",
                    rule.delimiter
                )));
            }
        }
        if let Some(rule) = &self.char_literal {
            claim(rule.delimiter.to_string(), "character literal")?;
            if rule.escape == Some(rule.delimiter) {
                return Err(reject(format!(
                    "character delimiter '{}' cannot be its own escape",
                    rule.delimiter
                )));
            }
        }

        validate_brackets(&self.brackets, &self.strings, self.char_literal.as_ref())
            .map_err(reject)?;

        let mut region_starts: Vec<char> = openers
            .iter()
            .filter_map(|opener| opener.chars().next())
            .collect();
        region_starts.sort_unstable();
        region_starts.dedup();

        Ok(LanguageProfile {
            name,
            line_comments: self.line_comments,
            block_comments: self.block_comments,
            block_strings: self.block_strings,
            strings: self.strings,
            char_literal: self.char_literal,
            brackets: self.brackets,
            precedence: self.precedence,
            region_starts,
        })
    }
}

fn validate_brackets(
    brackets: &[BracketPair],
    strings: &[StringRule],
    char_literal: Option<&CharLiteralRule>,
) -> Result<(), String> {
    if brackets.is_empty() {
        return Err(String::from("at least one bracket pair is required"));
    }

    let mut seen_chars: Vec<char> = Vec::new();
    let mut seen_kinds: Vec<&str> = Vec::new();
    for pair in brackets {
        if pair.open == pair.close {
            return Err(format!(
                "bracket '{}' uses the same character to open and close",
                pair.open
            ));
        }
        if pair.kind.trim().is_empty() {
            return Err(format!("bracket '{}{}' has an empty kind", pair.open, pair.close));
        }
        if seen_kinds.contains(&pair.kind.as_str()) {
            return Err(format!("bracket kind '{}' is declared more than once", pair.kind));
        }
        seen_kinds.push(pair.kind.as_str());

        for ch in [pair.open, pair.close] {
            if seen_chars.contains(&ch) {
                return Err(format!("bracket character '{ch}' is declared more than once"));
            }
            let is_delimiter = strings.iter().any(|rule| rule.delimiter == ch)
                || char_literal.is_some_and(|rule| rule.delimiter == ch);
            if is_delimiter {
                return Err(format!(
                    "bracket character '{ch}' is also a literal delimiter"
                ));
            }
            seen_chars.push(ch);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn c_like() -> LanguageProfileBuilder {
        LanguageProfile::builder("c-like")
            .line_comment("//")
            .block_comment(BlockCommentRule::new("/*", "*/"))
            .string(StringRule::new('"').with_escape('\\'))
            .char_literal(CharLiteralRule::new('\'').with_escape('\\'))
            .standard_brackets()
    }

    #[test]
    fn builds_valid_profile() {
        let profile = c_like().build().expect("profile");
        assert_eq!(profile.name(), "c-like");
        assert_eq!(profile.brackets().len(), 3);
        assert!(profile.may_open_region('/'));
        assert!(profile.may_open_region('"'));
        assert!(!profile.may_open_region('('));
    }

    #[rstest]
    #[case(LanguageProfile::builder("  ").standard_brackets())]
    #[case(LanguageProfile::builder("x").line_comment("").standard_brackets())]
    #[case(LanguageProfile::builder("x").line_comment("#").line_comment("#").standard_brackets())]
    #[case(LanguageProfile::builder("x")
        .line_comment("--")
        .block_comment(BlockCommentRule::new("--", "\n"))
        .standard_brackets())]
    #[case(LanguageProfile::builder("x")
        .block_comment(BlockCommentRule::new("(*", ""))
        .standard_brackets())]
    #[case(LanguageProfile::builder("x").string(StringRule::new('"').with_escape('"')).standard_brackets())]
    #[case(LanguageProfile::builder("x")
        .string(StringRule::new('\''))
        .char_literal(CharLiteralRule::new('\''))
        .standard_brackets())]
    #[case(LanguageProfile::builder("x"))]
    #[case(LanguageProfile::builder("x").bracket('|', '|', "bar"))]
    #[case(LanguageProfile::builder("x").bracket('(', ')', "paren").bracket('(', ']', "other"))]
    #[case(LanguageProfile::builder("x").bracket('(', ')', "paren").bracket('[', ']', "paren"))]
    #[case(LanguageProfile::builder("x").string(StringRule::new('<')).bracket('<', '>', "angle"))]
    #[case(LanguageProfile::builder("x")
        .block_string(BlockStringRule::new("r#\"", ""))
        .standard_brackets())]
    #[case(LanguageProfile::builder("x")
        .block_string(BlockStringRule::new("<<", "\\>").with_escape('\\'))
        .standard_brackets())]
    #[case(LanguageProfile::builder("x")
        .block_comment(BlockCommentRule::new("\"\"\"", "\"\"\""))
        .block_string(BlockStringRule::new("\"\"\"", "\"\"\""))
        .standard_brackets())]
    fn rejects_ambiguous_definitions(#[case] builder: LanguageProfileBuilder) {
        let error = builder.build().expect_err("definition should be rejected");
        assert!(matches!(error, SyntaxError::InvalidProfile { .. }), "{error}");
    }

    #[test]
    fn longest_block_opener_wins() {
        let profile = LanguageProfile::builder("x")
            .block_comment(BlockCommentRule::new("/*", "*/"))
            .block_comment(BlockCommentRule::new("/**", "**/"))
            .standard_brackets()
            .build()
            .expect("profile");
        let rule = profile.block_comment_at("/** doc **/").expect("rule");
        assert_eq!(rule.open(), "/**");
    }

    #[test]
    fn declaration_order_precedence_takes_first_match() {
        let profile = LanguageProfile::builder("x")
            .block_comment(BlockCommentRule::new("/*", "*/"))
            .block_comment(BlockCommentRule::new("/**", "**/"))
            .precedence(MarkerPrecedence::DeclarationOrder)
            .standard_brackets()
            .build()
            .expect("profile");
        let rule = profile.block_comment_at("/** doc **/").expect("rule");
        assert_eq!(rule.open(), "/*");
    }

    #[test]
    fn equal_length_markers_tie_break_on_declaration_order() {
        let profile = LanguageProfile::builder("x")
            .line_comment("--")
            .line_comment("-!")
            .line_comment("-")
            .standard_brackets()
            .build()
            .expect("profile");
        assert_eq!(profile.line_comment_at("-- note"), Some("--"));
        assert_eq!(profile.line_comment_at("-x"), Some("-"));
    }

    #[rstest]
    #[case("'a'", true)]
    #[case("'\\n'", true)]
    #[case("'\\u{1F600}'", true)]
    #[case("'a>", false)]
    #[case("'static", false)]
    #[case("''", false)]
    #[case("'", false)]
    #[case("'\n'", false)]
    fn single_unit_char_literals_skip_lifetimes(#[case] text: &str, #[case] opens: bool) {
        let rule = CharLiteralRule::new('\'').with_escape('\\').single_unit();
        assert_eq!(rule.opens_literal(text), opens);
    }

    #[test]
    fn permissive_char_literals_open_on_delimiter() {
        let rule = CharLiteralRule::new('\'').with_escape('\\');
        assert!(rule.opens_literal("'ab'"));
        assert!(rule.opens_literal("'"));
        assert!(!rule.opens_literal("a'"));
    }

    #[test]
    fn bracket_role_distinguishes_open_and_close() {
        let profile = c_like().build().expect("profile");
        let (direction, pair) = profile.bracket_role('}').expect("brace");
        assert_eq!(direction, Direction::Close);
        assert_eq!(pair.kind(), "brace");
        assert!(profile.bracket_role('<').is_none());
    }
}
