//! Lexically aware bracket verification for source text.
//!
//! Checking runs in one direction:
//!
//! 1. A [`RegionClassifier`] splits the input into code, comment and literal
//!    [`Span`]s according to a [`LanguageProfile`].
//! 2. A [`BracketMatcher`] collects bracket characters from code spans only
//!    and validates their nesting with a stack.
//! 3. Unterminated comments and literals, together with nesting faults,
//!    become position-ordered [`Diagnostic`]s folded into a [`Verdict`].
//!
//! Malformed input is data, not an error: `Err` is reserved for unknown or
//! invalid profiles, oversized input and internal faults.
//!
//! # Profiles
//!
//! [`ProfileRegistry::builtin`] provides C, C++, Java, JavaScript/TypeScript,
//! C#, Go, Rust and Python. Custom profiles are assembled with
//! [`LanguageProfile::builder`] and registered through a
//! [`ProfileRegistryBuilder`].
//!
//! # Example
//!
//! ```
//! use nestcheck_syntax::{DiagnosticKind, Verdict, check};
//!
//! let verdict = check("int main() { /* ( */ return 0; }", "c")?;
//! assert_eq!(verdict, Verdict::Balanced);
//!
//! let verdict = check("f(x];", "c")?;
//! assert_eq!(verdict.diagnostics()[0].kind, DiagnosticKind::Mismatched);
//! # Ok::<(), nestcheck_syntax::SyntaxError>(())
//! ```

pub mod builtin;
mod classifier;
mod diagnostic;
mod engine;
mod error;
mod matcher;
mod position;
mod profile;
mod registry;
mod report;
mod span;

pub use classifier::RegionClassifier;
pub use diagnostic::{Diagnostic, DiagnosticDetail, DiagnosticKind};
pub use engine::{CheckReport, Engine, Verdict, analyse_with_profile, check, check_with_profile};
pub use error::SyntaxError;
pub use matcher::{BracketEvent, BracketMatcher};
pub use position::Position;
pub use profile::{
    BlockCommentRule, BlockStringRule, BracketPair, CharLiteralRule, Direction, LanguageProfile,
    LanguageProfileBuilder, MarkerPrecedence, StringRule,
};
pub use registry::{ProfileRegistry, ProfileRegistryBuilder, RegisteredProfile, Registration};
pub use report::{DiagnosticReporter, StructuredReporter, TextReporter};
pub use span::{Span, SpanKind};

#[cfg(test)]
mod tests;
