//! Command-line argument definitions for `nestcheck`.

use clap::{Parser, ValueEnum};

/// Output format selection for per-file reports.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    #[default]
    Auto,
    /// Always render human-readable reports.
    Human,
    /// Always emit one JSON object per file.
    Json,
}

/// Checks that brackets in source files are balanced, ignoring comments and
/// literals.
#[derive(Parser, Debug)]
#[command(name = "nestcheck", version)]
pub(crate) struct Cli {
    /// Language profile identifier or alias; overrides extension lookup.
    #[arg(long, value_name = "ID")]
    pub(crate) profile: Option<String>,
    /// Controls how reports are rendered.
    #[arg(long, value_enum, default_value_t = OutputFormat::Auto)]
    pub(crate) output: OutputFormat,
    /// Prints the registered profiles and exits.
    #[arg(long)]
    pub(crate) list_profiles: bool,
    /// Files to check; `-` reads standard input.
    #[arg(value_name = "FILE")]
    pub(crate) files: Vec<String>,
}

impl Cli {
    /// Returns true when there is nothing to do.
    pub(crate) fn is_bare_invocation(&self) -> bool {
        self.files.is_empty() && !self.list_profiles
    }
}
