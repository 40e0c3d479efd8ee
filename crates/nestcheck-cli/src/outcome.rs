//! Process exit statuses ordered by severity.

use std::process::ExitCode;

/// Result class of one input or of the whole invocation.
///
/// Variants are declared from least to most severe so the derived ordering
/// picks the status reported when several files are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Outcome {
    Balanced,
    Unbalanced,
    Config,
    Usage,
    Unreadable,
    NotUtf8,
    TooLarge,
    Internal,
}

impl Outcome {
    pub(crate) const fn code(self) -> u8 {
        match self {
            Self::Balanced => 0,
            Self::Unbalanced => 1,
            Self::Config => 2,
            Self::Usage => 10,
            Self::Unreadable => 20,
            Self::NotUtf8 => 21,
            Self::TooLarge => 42,
            Self::Internal => 99,
        }
    }

    /// Folds per-file outcomes into the invocation status.
    pub(crate) fn worst(outcomes: impl IntoIterator<Item = Self>) -> Self {
        outcomes.into_iter().max().unwrap_or(Self::Balanced)
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        Self::from(outcome.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![], Outcome::Balanced)]
    #[case(vec![Outcome::Balanced, Outcome::Unbalanced], Outcome::Unbalanced)]
    #[case(vec![Outcome::TooLarge, Outcome::Unreadable, Outcome::Unbalanced], Outcome::TooLarge)]
    #[case(vec![Outcome::NotUtf8, Outcome::Usage], Outcome::NotUtf8)]
    fn worst_outcome_wins(#[case] outcomes: Vec<Outcome>, #[case] expected: Outcome) {
        assert_eq!(Outcome::worst(outcomes), expected);
    }

    #[test]
    fn codes_grow_with_severity() {
        let ladder = [
            Outcome::Balanced,
            Outcome::Unbalanced,
            Outcome::Config,
            Outcome::Usage,
            Outcome::Unreadable,
            Outcome::NotUtf8,
            Outcome::TooLarge,
            Outcome::Internal,
        ];
        let codes: Vec<u8> = ladder.iter().map(|outcome| outcome.code()).collect();
        assert_eq!(codes, vec![0, 1, 2, 10, 20, 21, 42, 99]);
    }
}
