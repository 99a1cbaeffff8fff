//! Local capability provider covering the repo-facing side of init/start.

use serde_json::json;

use hypha_config::InitOptions;
use hypha_repo::Repo;

use crate::capability::{CapabilityError, NodeProvider};

const PROVIDER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::provider");

/// Provider that initialises the repository locally and treats start as the
/// repo-facing bring-up only.
///
/// Networking and exchange subsystems live behind other processes; this
/// provider ensures the repository is open for them and logs the handoff.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalProvider;

impl LocalProvider {
    /// Builds a new provider.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl NodeProvider for LocalProvider {
    fn init(&self, params: &InitOptions, repo: &dyn Repo) -> Result<(), CapabilityError> {
        let seed = json!({
            "Identity": {
                "KeyBits": params.bits,
            },
            "Addresses": {
                "Swarm": ["/ip4/0.0.0.0/tcp/4002"],
                "API": "/ip4/127.0.0.1/tcp/5002",
                "Gateway": "/ip4/127.0.0.1/tcp/9090",
            },
            "Bootstrap": [],
        });
        repo.init(&seed)
            .map_err(|source| CapabilityError::with_source("repository init failed", source))
    }

    fn start(&self, repo: &dyn Repo) -> Result<(), CapabilityError> {
        if repo.is_closed() {
            repo.open()
                .map_err(|source| CapabilityError::with_source("repository open failed", source))?;
        }
        tracing::warn!(
            target: PROVIDER_TARGET,
            "networking start requested but not wired to a transport"
        );
        Ok(())
    }
}
