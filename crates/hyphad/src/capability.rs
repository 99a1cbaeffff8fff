//! Capabilities the boot sequencer drives but does not implement.

use thiserror::Error;

use hypha_config::InitOptions;
use hypha_repo::Repo;

/// Error reported by a capability implementation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CapabilityError {
    message: String,
    /// Optional source error reported by the implementation.
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CapabilityError {
    /// Builds an error without an underlying source.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Builds an error that wraps an underlying source.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Human-readable message describing the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// External operations consumed during boot.
///
/// `init` brings a repository into existence; `start` brings up the
/// networking and exchange subsystems. Both are opaque to the sequencer,
/// which only observes their success or failure.
pub trait NodeProvider: Send + Sync {
    /// Initialises the repository with the supplied parameters.
    fn init(&self, params: &InitOptions, repo: &dyn Repo) -> Result<(), CapabilityError>;

    /// Starts the node's networking and exchange subsystems.
    fn start(&self, repo: &dyn Repo) -> Result<(), CapabilityError>;
}
