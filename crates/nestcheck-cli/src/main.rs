//! CLI entrypoint for the `nestcheck` bracket verifier.
//!
//! The binary delegates to [`nestcheck_cli::run`], which loads configuration,
//! checks every named file and prints one report per file.

use std::io::{self, IsTerminal, StderrLock, StdinLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let stdout_is_terminal = io::stdout().is_terminal();
    let mut stdin: StdinLock<'_> = io::stdin().lock();
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    nestcheck_cli::run(
        std::env::args_os(),
        &mut stdin,
        &mut stdout,
        &mut stderr,
        stdout_is_terminal,
    )
}
