use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Filesystem access failed.
    #[error("repository I/O failed at '{path}': {source}")]
    Io {
        /// Path involved in the failing operation.
        path: Utf8PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
    /// The stored config document could not be parsed.
    #[error("repository config at '{path}' is corrupt: {source}")]
    Corrupt {
        /// Path of the unreadable document.
        path: Utf8PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// The config document could not be serialised for storage.
    #[error("failed to serialise config document: {0}")]
    Serialise(#[source] serde_json::Error),
    /// The repository does not exist on durable storage.
    #[error("no repository found at '{path}'")]
    Missing {
        /// Expected repository location.
        path: Utf8PathBuf,
    },
    /// The repository directory lacks its layout version marker.
    #[error("repository at '{path}' has no version marker")]
    MissingVersion {
        /// Repository root missing the marker.
        path: Utf8PathBuf,
    },
    /// The handle is closed and cannot serve the request.
    #[error("repository is closed")]
    Closed,
}
