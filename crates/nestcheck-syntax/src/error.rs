//! Error types for bracket verification operations.
//!
//! Malformed input is never an error here: unbalanced brackets and
//! unterminated literals are reported as [`crate::Diagnostic`] values. The
//! variants below cover caller mistakes (unknown or invalid profiles) and
//! faults inside the engine itself.

use thiserror::Error;

/// Errors from profile registration and bracket checking.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyntaxError {
    /// No profile is registered under the requested identifier.
    #[error("unknown language profile: '{identifier}'")]
    UnknownProfile {
        /// The identifier that failed to resolve.
        identifier: String,
    },

    /// A profile definition was rejected while it was being built.
    #[error("invalid language profile '{profile}': {message}")]
    InvalidProfile {
        /// Name of the profile being built.
        profile: String,
        /// Description of the rejected rule.
        message: String,
    },

    /// An identifier or alias was registered twice.
    #[error("language profile identifier already registered: '{identifier}'")]
    DuplicateProfile {
        /// The identifier or alias that clashed.
        identifier: String,
    },

    /// The input exceeds the configured size ceiling.
    #[error("input of {size} bytes exceeds the {limit} byte limit")]
    InputTooLarge {
        /// Size of the rejected input in bytes.
        size: usize,
        /// Configured ceiling in bytes.
        limit: usize,
    },

    /// Internal error indicating a bug in the region classifier.
    #[error("internal error: {message}")]
    InternalError {
        /// Description of the internal error.
        message: String,
    },
}

impl SyntaxError {
    /// Creates an unknown profile error.
    #[must_use]
    pub fn unknown_profile(identifier: impl Into<String>) -> Self {
        Self::UnknownProfile {
            identifier: identifier.into(),
        }
    }

    /// Creates an invalid profile error.
    #[must_use]
    pub fn invalid_profile(profile: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidProfile {
            profile: profile.into(),
            message: message.into(),
        }
    }

    /// Creates a duplicate registration error.
    #[must_use]
    pub fn duplicate_profile(identifier: impl Into<String>) -> Self {
        Self::DuplicateProfile {
            identifier: identifier.into(),
        }
    }

    /// Creates an oversized input error.
    #[must_use]
    pub const fn input_too_large(size: usize, limit: usize) -> Self {
        Self::InputTooLarge { size, limit }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}
