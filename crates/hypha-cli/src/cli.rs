//! CLI argument definitions for the hypha tool.

use clap::{Args, Parser, Subcommand};

use hyphad::WriteMode;

/// Command-line interface for the hypha node.
#[derive(Parser, Debug)]
#[command(name = "hypha", disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// Repository location (defaults to `HYPHA_PATH` or `~/.hypha`).
    #[arg(long, value_name = "PATH", global = true)]
    pub(crate) repo: Option<String>,
    /// Structured subcommands (for example `config`).
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Structured subcommands for the hypha CLI.
#[derive(Subcommand, Debug)]
pub(crate) enum CliCommand {
    /// Gets and sets node config values.
    Config(ConfigArgs),
}

/// Arguments for the config command.
#[derive(Args, Debug)]
pub(crate) struct ConfigArgs {
    /// Dot-addressable config key (for example `Addresses.API`).
    pub(crate) key: String,
    /// New value; omit to print the current value.
    pub(crate) value: Option<String>,
    /// Coerce the value to a boolean before storing it.
    #[arg(long = "bool")]
    pub(crate) boolean: bool,
    /// Parse the value as JSON before storing it.
    #[arg(long = "json")]
    pub(crate) json: bool,
}

impl ConfigArgs {
    /// Selects the coercion mode; `--bool` wins when both flags are passed.
    pub(crate) fn write_mode(&self) -> WriteMode {
        if self.boolean {
            WriteMode::Bool
        } else if self.json {
            WriteMode::Json
        } else {
            WriteMode::Literal
        }
    }
}
