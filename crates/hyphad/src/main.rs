use std::env;
use std::process::ExitCode;

use hypha_config::{
    LOG_FILTER_ENV, LOG_FORMAT_ENV, LogFormat, NodeOptions, OptionsPatch, default_log_filter,
    default_log_format,
};
use hyphad::{Node, telemetry};

/// Reads the log output format from the environment.
///
/// Unset, empty, and unrecognised values all fall back to the default format
/// so a typo never prevents the daemon from starting.
fn log_format_from_env() -> LogFormat {
    env::var(LOG_FORMAT_ENV)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_else(default_log_format)
}

fn main() -> ExitCode {
    let filter = env::var(LOG_FILTER_ENV).unwrap_or_else(|_| default_log_filter().to_owned());
    if telemetry::initialise(&filter, log_format_from_env()).is_err() {
        return ExitCode::FAILURE;
    }

    let options = NodeOptions::resolve(OptionsPatch::default());
    let node = Node::with_defaults(options);
    if node.boot_report().is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
