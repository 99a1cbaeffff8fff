//! CLI runtime for the hypha node.
//!
//! The runner parses arguments, boots an embedded node offline (no init, no
//! start) against the target repository, and serves the config command
//! surface over the node's typed accessor. Output goes through the injected
//! writers so tests can capture it.

mod cli;
mod errors;

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use serde_json::Value;

use hypha_config::{NodeOptions, OptionsPatch};
use hyphad::Node;

use crate::cli::{Cli, CliCommand, ConfigArgs};
use crate::errors::AppError;

/// Parses `args`, executes the selected command, and reports the outcome.
pub fn run<Args, Out, ErrOut>(args: Args, stdout: &mut Out, stderr: &mut ErrOut) -> ExitCode
where
    Args: IntoIterator,
    Args::Item: Into<OsString> + Clone,
    Out: Write,
    ErrOut: Write,
{
    match execute(args, stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = writeln!(stderr, "Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn execute<Args, Out>(args: Args, stdout: &mut Out) -> Result<(), AppError>
where
    Args: IntoIterator,
    Args::Item: Into<OsString> + Clone,
    Out: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error)
            if matches!(
                error.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            write!(stdout, "{error}").map_err(AppError::WriteOutput)?;
            return Ok(());
        }
        Err(error) => return Err(AppError::CliUsage(error)),
    };

    match cli.command {
        CliCommand::Config(config) => run_config(cli.repo, &config, stdout),
    }
}

fn run_config<Out>(
    repo: Option<String>,
    args: &ConfigArgs,
    stdout: &mut Out,
) -> Result<(), AppError>
where
    Out: Write,
{
    let mut patch = OptionsPatch::offline();
    if let Some(path) = repo {
        patch = patch.with_repo(path);
    }
    let node = Node::with_defaults(NodeOptions::resolve(patch));
    if let Some(error) = AppError::from_boot(&node) {
        return Err(error);
    }

    let accessor = node.config();
    match &args.value {
        None => {
            let value = accessor.get(&args.key).map_err(AppError::ReadConfig)?;
            render(stdout, &value).map_err(AppError::WriteOutput)
        }
        Some(raw) => accessor
            .set(&args.key, raw, args.write_mode())
            .map_err(AppError::from_set),
    }
}

/// Prints structured values as pretty JSON and scalar strings as raw text.
fn render<Out>(stdout: &mut Out, value: &Value) -> Result<(), std::io::Error>
where
    Out: Write,
{
    match value {
        Value::Object(_) | Value::Array(_) => {
            let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
            writeln!(stdout, "{pretty}")
        }
        Value::String(text) => writeln!(stdout, "{text}"),
        other => writeln!(stdout, "{other}"),
    }
}
