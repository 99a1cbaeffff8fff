//! Error types surfaced at the CLI boundary.

use std::io;

use thiserror::Error;

use hyphad::{ConfigError, Node};

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to boot node: {0}")]
    Boot(String),
    #[error("failed to read the config")]
    ReadConfig(#[source] ConfigError),
    // The examined surface reuses the read wording on the write path; the
    // wording is kept for behavioural parity.
    #[error("failed to read the config")]
    WriteConfig(#[source] ConfigError),
    #[error("invalid JSON provided")]
    InvalidJson(#[source] ConfigError),
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] io::Error),
}

impl AppError {
    /// Maps a failed set to the user-facing error, separating the JSON
    /// parse message from the generic one.
    pub(crate) fn from_set(source: ConfigError) -> Self {
        match source {
            ConfigError::Parse(_) => Self::InvalidJson(source),
            other => Self::WriteConfig(other),
        }
    }

    /// Maps a failed boot attempt to the user-facing error.
    pub(crate) fn from_boot(node: &Node) -> Option<Self> {
        node.boot_report()
            .error
            .as_ref()
            .map(|error| Self::Boot(error.to_string()))
    }
}
