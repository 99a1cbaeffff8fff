//! Logging format selection shared by the binaries.
//!
//! The format is chosen through the `HYPHA_LOG_FORMAT` environment variable
//! and parsed case-insensitively from its snake_case label.

use strum::{Display, EnumString};

/// Supported logging output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Structured JSON suitable for ingestion by logging stacks.
    #[default]
    Json,
    /// Human-readable single line output.
    Compact,
}
