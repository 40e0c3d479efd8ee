//! Diagnostic log format for `nestcheck`.
//!
//! Logs go to stderr so they never mix with check reports on stdout. The
//! format is chosen with `--log-format`, `NESTCHECK_LOG_FORMAT` or
//! `log_format` in `nestcheck.toml`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How log events are rendered on stderr.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One flattened JSON object per event.
    Json,
    /// One terse line per event, for operators at a terminal.
    #[default]
    Compact,
}

/// Error returned when text names no known [`LogFormat`].
pub type LogFormatParseError = strum::ParseError;
