//! Command-line front end for `nestcheck`.
//!
//! The runtime splits configuration flags from the command tokens, loads the
//! layered configuration, installs logging, builds the profile registry and
//! checks every named input on a worker pool. Reports are printed in
//! argument order and the process exits with the most severe outcome.

mod check;
mod cli;
mod config;
mod errors;
mod outcome;
mod output;
mod telemetry;

use std::borrow::Cow;
use std::ffi::OsString;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;
use nestcheck_config::{Config, load_registry};
use nestcheck_syntax::{Engine, ProfileRegistry};
use tracing::debug;

use crate::check::{BoundedInput, Checker, FileReport, STDIN_ARGUMENT, read_bounded};
use crate::cli::Cli;
use crate::config::{ConfigArgumentSplit, ConfigLoader, OrthoConfigLoader, split_config_arguments};
pub(crate) use crate::errors::AppError;
use crate::outcome::Outcome;

/// Flags consumed by the configuration loader rather than `clap`.
pub(crate) const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--profiles-path",
    "--max-input-bytes",
];

/// Borrowed process streams used for one invocation.
pub(crate) struct IoStreams<'a, R: Read, W: Write, E: Write> {
    pub(crate) stdin: &'a mut R,
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
    stdout_is_terminal: bool,
}

impl<'a, R: Read, W: Write, E: Write> IoStreams<'a, R, W, E> {
    pub(crate) const fn new(
        stdin: &'a mut R,
        stdout: &'a mut W,
        stderr: &'a mut E,
        stdout_is_terminal: bool,
    ) -> Self {
        Self {
            stdin,
            stdout,
            stderr,
            stdout_is_terminal,
        }
    }

    pub(crate) const fn stdout_is_terminal(&self) -> bool {
        self.stdout_is_terminal
    }
}

struct CliRunner<'a, 'io, R: Read, W: Write, E: Write, L: ConfigLoader> {
    io: &'a mut IoStreams<'io, R, W, E>,
    loader: &'a L,
}

impl<'a, 'io, R, W, E, L> CliRunner<'a, 'io, R, W, E, L>
where
    R: Read,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    const fn new(io: &'a mut IoStreams<'io, R, W, E>, loader: &'a L) -> Self {
        Self { io, loader }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);
        let cli_arguments = prepare_cli_arguments(&args, &split);

        let result = match Cli::try_parse_from(cli_arguments) {
            Ok(cli) => self.execute(&cli, &split),
            // Help and version requests are not failures.
            Err(error) if !error.use_stderr() => {
                let _ = write!(self.io.stdout, "{error}");
                Ok(Outcome::Balanced)
            }
            Err(error) => Err(AppError::CliUsage(error)),
        };
        let outcome = result.unwrap_or_else(|error| {
            let _ = writeln!(self.io.stderr, "{}", error.to_string().trim_end());
            error.outcome()
        });
        ExitCode::from(outcome)
    }

    fn execute(&mut self, cli: &Cli, split: &ConfigArgumentSplit) -> Result<Outcome, AppError> {
        if cli.is_bare_invocation() {
            return Err(AppError::MissingInput);
        }
        let config = self.loader.load(&split.config_arguments)?;
        telemetry::initialise(&config)?;
        let registry = build_registry(&config)?;
        let format = cli.output.resolve(self.io.stdout_is_terminal());

        if cli.list_profiles {
            output::write_profiles(&registry, format, self.io.stdout)?;
            return Ok(Outcome::Balanced);
        }

        let reports = self.check_files(cli, &config, &registry)?;
        output::write_reports(&reports, format, self.io.stdout, self.io.stderr)?;
        let outcome = Outcome::worst(reports.iter().map(FileReport::outcome));
        debug!(files = reports.len(), exit_code = outcome.code(), "check finished");
        Ok(outcome)
    }

    fn check_files(
        &mut self,
        cli: &Cli,
        config: &Config,
        registry: &ProfileRegistry,
    ) -> Result<Vec<FileReport>, AppError> {
        let limit = config.max_input_len();
        let stdin = self.read_stdin_if_named(&cli.files, limit);
        let engine = Engine::new(registry).with_max_input_bytes(limit);
        let checker = match cli.profile.as_deref() {
            Some(identifier) => Checker::new(engine)
                .with_profile(identifier)
                .map_err(AppError::Syntax)?,
            None => Checker::new(engine),
        };
        Ok(checker.with_stdin(&stdin).check_all(&cli.files))
    }

    fn read_stdin_if_named(&mut self, files: &[String], limit: usize) -> io::Result<BoundedInput> {
        if !files.iter().any(|file| file == STDIN_ARGUMENT) {
            return Ok(BoundedInput::Complete(Vec::new()));
        }
        read_bounded(&mut *self.io.stdin, Some(limit))
    }
}

fn build_registry(config: &Config) -> Result<Cow<'static, ProfileRegistry>, AppError> {
    match config.profiles_path() {
        Some(path) => {
            let registry = load_registry(path)?;
            debug!(%path, profiles = registry.len(), "loaded profile definitions");
            Ok(Cow::Owned(registry))
        }
        None => ProfileRegistry::builtin()
            .map(Cow::Borrowed)
            .map_err(AppError::Syntax),
    }
}

/// Runs the CLI using the provided arguments and process streams.
///
/// `stdout_is_terminal` selects the output format when `--output auto` is in
/// effect.
#[must_use]
pub fn run<I, R, W, E>(
    args: I,
    stdin: &mut R,
    stdout: &mut W,
    stderr: &mut E,
    stdout_is_terminal: bool,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdin, stdout, stderr, stdout_is_terminal);
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

pub(crate) fn run_with_loader<I, R, W, E, L>(
    args: I,
    io: &mut IoStreams<'_, R, W, E>,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(io, loader).run(args)
}

fn prepare_cli_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    let mut cli_arguments: Vec<OsString> = Vec::new();
    if let Some(first) = args.first() {
        cli_arguments.push(first.clone());
    }
    if let Some(rest) = args.get(split.command_start..) {
        cli_arguments.extend(rest.iter().cloned());
    }
    cli_arguments
}

#[cfg(test)]
mod tests;
