use camino::Utf8PathBuf;
use std::env;

use crate::logging::LogFormat;

/// Default RSA key length recorded when a repository is initialised.
pub const DEFAULT_KEY_BITS: u32 = 2048;

/// Environment variable overriding the repository location.
pub const REPO_PATH_ENV: &str = "HYPHA_PATH";

/// Environment variable overriding the log filter expression.
pub const LOG_FILTER_ENV: &str = "HYPHA_LOG";

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "HYPHA_LOG_FORMAT";

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the binaries.
#[must_use]
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format for the binaries.
#[must_use]
pub fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Computes the default repository location.
///
/// `HYPHA_PATH` wins when set and non-empty; otherwise the repository lives
/// under `.hypha` in the user's home directory, falling back to the system
/// temporary directory when no home directory can be determined.
#[must_use]
pub fn default_repo_path() -> Utf8PathBuf {
    if let Ok(path) = env::var(REPO_PATH_ENV)
        && !path.is_empty()
    {
        return Utf8PathBuf::from(path);
    }

    if let Some(home) = dirs::home_dir()
        && let Ok(mut dir) = Utf8PathBuf::from_path_buf(home)
    {
        dir.push(".hypha");
        return dir;
    }

    let mut dir =
        Utf8PathBuf::from_path_buf(env::temp_dir()).unwrap_or_else(|_| Utf8PathBuf::from("/tmp"));
    dir.push("hypha");
    dir
}
