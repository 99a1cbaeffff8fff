//! CLI entrypoint for the hypha node tool.
//!
//! The binary delegates to [`hypha_cli::run`], which parses arguments,
//! embeds a node booted offline against the target repository, and serves
//! the config command surface over it.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    hypha_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
