//! Shared configuration model for the hypha node, daemon, and CLI.
//!
//! The crate owns the options record accepted at node construction, the pure
//! resolver that merges caller overrides onto built-in defaults, the deep
//! merge helper used both by the resolver and by the boot-time config merge,
//! and the logging settings shared by the binaries.

mod defaults;
mod logging;
mod merge;
mod options;

pub use defaults::{
    DEFAULT_KEY_BITS, DEFAULT_LOG_FILTER, LOG_FILTER_ENV, LOG_FORMAT_ENV, REPO_PATH_ENV,
    default_log_filter, default_log_format, default_repo_path,
};
pub use logging::LogFormat;
pub use merge::deep_merge;
pub use options::{ExperimentalOptions, InitDirective, InitOptions, NodeOptions, OptionsPatch};
