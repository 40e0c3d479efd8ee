//! Error types for the CLI runtime and their exit statuses.

use std::io;
use std::sync::Arc;

use nestcheck_config::ProfileFileError;
use nestcheck_syntax::SyntaxError;
use thiserror::Error;

use crate::outcome::Outcome;

/// Failures that stop the whole invocation.
#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("no input files given; pass FILE arguments, `-` for stdin, or --list-profiles")]
    MissingInput,
    #[error("{0}")]
    Profiles(#[from] ProfileFileError),
    #[error("{0}")]
    Syntax(SyntaxError),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] crate::telemetry::TelemetryError),
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
    #[error("failed to serialise report: {0}")]
    Serialise(#[from] serde_json::Error),
}

impl AppError {
    pub(crate) const fn outcome(&self) -> Outcome {
        match self {
            Self::LoadConfiguration(_) | Self::Profiles(_) | Self::Telemetry(_) => Outcome::Config,
            Self::CliUsage(_) | Self::MissingInput => Outcome::Usage,
            Self::Syntax(error) => syntax_outcome(error),
            Self::Write(_) | Self::Serialise(_) => Outcome::Internal,
        }
    }
}

/// Failures confined to a single input.
#[derive(Debug, Error)]
pub(crate) enum FileError {
    #[error("{path}: no language profile matches the file name; pass --profile")]
    NoProfile { path: String },
    #[error("{path}: failed to read input: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{path}: input is not valid UTF-8")]
    NotUtf8 { path: String },
    #[error("{path}: {source}")]
    Check {
        path: String,
        #[source]
        source: SyntaxError,
    },
}

impl FileError {
    pub(crate) const fn outcome(&self) -> Outcome {
        match self {
            Self::NoProfile { .. } => Outcome::Usage,
            Self::Read { .. } => Outcome::Unreadable,
            Self::NotUtf8 { .. } => Outcome::NotUtf8,
            Self::Check { source, .. } => syntax_outcome(source),
        }
    }
}

const fn syntax_outcome(error: &SyntaxError) -> Outcome {
    match error {
        SyntaxError::UnknownProfile { .. } => Outcome::Usage,
        SyntaxError::InvalidProfile { .. } | SyntaxError::DuplicateProfile { .. } => {
            Outcome::Config
        }
        SyntaxError::InputTooLarge { .. } => Outcome::TooLarge,
        _ => Outcome::Internal,
    }
}
