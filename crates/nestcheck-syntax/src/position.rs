//! Source positions tracked while scanning.
//!
//! Offsets are byte offsets into the scanned text. Lines and columns are
//! one-based; a column counts characters since the last newline.

use std::fmt;

use serde::Serialize;

/// A location in the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    /// Byte offset from the start of the input.
    pub offset: usize,
    /// Line number (one-based).
    pub line: u32,
    /// Column number (one-based, in characters).
    pub column: u32,
}

impl Position {
    /// The position of the first character of any input.
    pub const START: Self = Self {
        offset: 0,
        line: 1,
        column: 1,
    };

    /// Creates a position from its parts.
    #[must_use]
    pub const fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Returns the position immediately after `ch`.
    #[must_use]
    pub(crate) const fn advance(self, ch: char) -> Self {
        if ch == '\n' {
            Self {
                offset: self.offset + 1,
                line: self.line.saturating_add(1),
                column: 1,
            }
        } else {
            Self {
                offset: self.offset + ch.len_utf8(),
                line: self.line,
                column: self.column.saturating_add(1),
            }
        }
    }

    /// Returns the position immediately after every character of `text`.
    #[must_use]
    pub(crate) fn advance_str(self, text: &str) -> Self {
        text.chars().fold(self, Self::advance)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", Position::new(0, 1, 1))]
    #[case("abc", Position::new(3, 1, 4))]
    #[case("a\nb", Position::new(3, 2, 2))]
    #[case("\n\n", Position::new(2, 3, 1))]
    #[case("é(", Position::new(3, 1, 3))]
    #[case("x\r\ny", Position::new(4, 2, 2))]
    fn advance_tracks_lines_and_columns(#[case] text: &str, #[case] expected: Position) {
        assert_eq!(Position::START.advance_str(text), expected);
    }

    #[test]
    fn displays_line_and_column() {
        assert_eq!(Position::new(10, 3, 7).to_string(), "3:7");
    }
}
