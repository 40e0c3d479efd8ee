//! Checks every named input on a worker pool.
//!
//! Inputs are read, decoded and verified independently, so one bad file
//! never stops the others. Results come back in argument order regardless
//! of which worker finished first.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use nestcheck_syntax::{Engine, SyntaxError, Verdict};
use rayon::prelude::*;
use tracing::debug;

use crate::errors::FileError;
use crate::outcome::Outcome;

/// Argument naming standard input.
pub(crate) const STDIN_ARGUMENT: &str = "-";

/// Display name used for standard input.
pub(crate) const STDIN_NAME: &str = "<stdin>";

/// Input read under a size ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BoundedInput {
    /// Every byte of the input, within the ceiling.
    Complete(Vec<u8>),
    /// The input exceeded the ceiling; only its size was kept.
    Oversized { size: usize, limit: usize },
}

impl BoundedInput {
    fn into_bytes(self) -> Result<Vec<u8>, SyntaxError> {
        match self {
            Self::Complete(bytes) => Ok(bytes),
            Self::Oversized { size, limit } => Err(SyntaxError::input_too_large(size, limit)),
        }
    }
}

/// Reads `reader` to the end, buffering at most `limit + 1` bytes.
///
/// Bytes beyond the ceiling are counted and discarded so the reported size
/// is exact without holding the whole input in memory.
pub(crate) fn read_bounded<R: Read>(mut reader: R, limit: Option<usize>) -> io::Result<BoundedInput> {
    let mut bytes = Vec::new();
    let Some(limit) = limit else {
        reader.read_to_end(&mut bytes)?;
        return Ok(BoundedInput::Complete(bytes));
    };
    let ceiling = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
    reader.by_ref().take(ceiling).read_to_end(&mut bytes)?;
    if bytes.len() <= limit {
        return Ok(BoundedInput::Complete(bytes));
    }
    let excess = io::copy(&mut reader, &mut io::sink())?;
    let size = bytes
        .len()
        .saturating_add(usize::try_from(excess).unwrap_or(usize::MAX));
    Ok(BoundedInput::Oversized { size, limit })
}

/// A successfully verified input.
#[derive(Debug)]
pub(crate) struct CheckedFile {
    pub(crate) profile: String,
    pub(crate) text: String,
    pub(crate) verdict: Verdict,
}

/// One input and what happened to it.
#[derive(Debug)]
pub(crate) struct FileReport {
    pub(crate) path: String,
    pub(crate) result: Result<CheckedFile, FileError>,
}

impl FileReport {
    pub(crate) const fn outcome(&self) -> Outcome {
        match &self.result {
            Ok(checked) if checked.verdict.is_balanced() => Outcome::Balanced,
            Ok(_) => Outcome::Unbalanced,
            Err(error) => error.outcome(),
        }
    }
}

/// Verifies inputs against one engine, optionally forcing a profile.
pub(crate) struct Checker<'r> {
    engine: Engine<'r>,
    forced_profile: Option<&'r str>,
    stdin: Option<&'r io::Result<BoundedInput>>,
}

impl<'r> Checker<'r> {
    pub(crate) const fn new(engine: Engine<'r>) -> Self {
        Self {
            engine,
            forced_profile: None,
            stdin: None,
        }
    }

    /// Uses `identifier` for every input instead of extension lookup.
    ///
    /// Fails when no profile is registered under `identifier`.
    pub(crate) fn with_profile(mut self, identifier: &'r str) -> Result<Self, SyntaxError> {
        let canonical = self
            .engine
            .registry()
            .canonical_identifier(identifier)
            .ok_or_else(|| SyntaxError::unknown_profile(identifier.trim()))?;
        self.forced_profile = Some(canonical);
        Ok(self)
    }

    /// Supplies the bytes read for `-` arguments.
    pub(crate) const fn with_stdin(mut self, stdin: &'r io::Result<BoundedInput>) -> Self {
        self.stdin = Some(stdin);
        self
    }

    /// Checks `paths` concurrently, returning reports in the same order.
    pub(crate) fn check_all(&self, paths: &[String]) -> Vec<FileReport> {
        paths.par_iter().map(|path| self.check_one(path)).collect()
    }

    fn check_one(&self, path: &str) -> FileReport {
        let display_name = if path == STDIN_ARGUMENT {
            STDIN_NAME
        } else {
            path
        };
        let result = self.verify(path, display_name);
        match &result {
            Ok(checked) => debug!(
                path = display_name,
                profile = %checked.profile,
                verdict = %checked.verdict,
                "checked input"
            ),
            Err(error) => debug!(path = display_name, %error, "input failed"),
        }
        FileReport {
            path: display_name.to_owned(),
            result,
        }
    }

    fn verify(&self, path: &str, display: &str) -> Result<CheckedFile, FileError> {
        let bytes = self
            .read(path, display)?
            .into_bytes()
            .map_err(|source| FileError::Check {
                path: display.to_owned(),
                source,
            })?;
        let text = String::from_utf8(bytes).map_err(|_| FileError::NotUtf8 {
            path: display.to_owned(),
        })?;
        let profile = self.profile_for(path, display)?;
        let verdict = self
            .engine
            .check(&text, profile)
            .map_err(|source| FileError::Check {
                path: display.to_owned(),
                source,
            })?;
        Ok(CheckedFile {
            profile: profile.to_owned(),
            text,
            verdict,
        })
    }

    /// Reads one input, rejecting oversized ones before decoding.
    fn read(&self, path: &str, display: &str) -> Result<BoundedInput, FileError> {
        let read_error = |source| FileError::Read {
            path: display.to_owned(),
            source,
        };
        if path != STDIN_ARGUMENT {
            return self.read_file(path).map_err(read_error);
        }
        match self.stdin {
            Some(Ok(input)) => Ok(input.clone()),
            Some(Err(error)) => Err(read_error(io::Error::new(error.kind(), error.to_string()))),
            None => Err(read_error(io::Error::new(
                io::ErrorKind::NotFound,
                "standard input is not available",
            ))),
        }
    }

    fn read_file(&self, path: &str) -> io::Result<BoundedInput> {
        let limit = self.engine.max_input_bytes();
        let file = File::open(path)?;
        if let Some(limit) = limit {
            let metadata = file.metadata()?;
            let ceiling = u64::try_from(limit).unwrap_or(u64::MAX);
            if metadata.is_file() && metadata.len() > ceiling {
                let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
                return Ok(BoundedInput::Oversized { size, limit });
            }
        }
        read_bounded(file, limit)
    }

    fn profile_for(&self, path: &str, display: &str) -> Result<&'r str, FileError> {
        self.forced_profile
            .or_else(|| self.engine.registry().resolve_path(Path::new(path)))
            .ok_or_else(|| FileError::NoProfile {
                path: display.to_owned(),
            })
    }
}
