//! Rendering of per-file reports and the profile listing.

mod json;
mod render;

use std::io::{self, Write};

use nestcheck_syntax::ProfileRegistry;

use crate::check::FileReport;
use crate::cli::OutputFormat;
use crate::errors::AppError;

/// Concrete output format after resolving `auto`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ResolvedOutputFormat {
    /// Human-readable reports with source excerpts.
    Human,
    /// One JSON object per line.
    Json,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub(crate) const fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto => {
                if stdout_is_terminal {
                    ResolvedOutputFormat::Human
                } else {
                    ResolvedOutputFormat::Json
                }
            }
            Self::Human => ResolvedOutputFormat::Human,
            Self::Json => ResolvedOutputFormat::Json,
        }
    }
}

/// Writes reports in argument order.
///
/// Checked files go to `stdout`; inputs that could not be checked are
/// described on `stderr`.
pub(crate) fn write_reports<W: Write, E: Write>(
    reports: &[FileReport],
    format: ResolvedOutputFormat,
    stdout: &mut W,
    stderr: &mut E,
) -> Result<(), AppError> {
    let mut first = true;
    for report in reports {
        let checked = match &report.result {
            Ok(checked) => checked,
            Err(error) => {
                writeln!(stderr, "{error}")?;
                continue;
            }
        };
        match format {
            ResolvedOutputFormat::Human => {
                if !first {
                    writeln!(stdout)?;
                }
                render::render_report(stdout, &report.path, checked)?;
            }
            ResolvedOutputFormat::Json => json::write_record(stdout, &report.path, checked)?,
        }
        first = false;
    }
    stdout.flush()?;
    Ok(())
}

/// Lists registered profiles, one per line.
pub(crate) fn write_profiles<W: Write>(
    registry: &ProfileRegistry,
    format: ResolvedOutputFormat,
    stdout: &mut W,
) -> Result<(), AppError> {
    match format {
        ResolvedOutputFormat::Human => write_profile_table(registry, stdout)?,
        ResolvedOutputFormat::Json => json::write_profiles(stdout, registry)?,
    }
    stdout.flush()?;
    Ok(())
}

fn write_profile_table<W: Write>(registry: &ProfileRegistry, stdout: &mut W) -> io::Result<()> {
    let width = registry
        .profiles()
        .map(|entry| entry.identifier.len())
        .max()
        .unwrap_or(0);
    for entry in registry.profiles() {
        let aliases = entry.aliases.join(", ");
        let extensions = entry
            .extensions
            .iter()
            .map(|extension| format!(".{extension}"))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(
            stdout,
            "{:<width$}  aliases: {}  extensions: {}",
            entry.identifier,
            if aliases.is_empty() { "-" } else { aliases.as_str() },
            if extensions.is_empty() { "-" } else { extensions.as_str() },
        )?;
    }
    Ok(())
}
