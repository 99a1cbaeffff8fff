//! Node construction wiring options, repository, boot, and access surfaces.

use std::sync::Arc;

use hypha_config::NodeOptions;
use hypha_repo::{FsRepo, Repo};

use crate::bootstrap::{BootReport, boot_with};
use crate::capability::NodeProvider;
use crate::config_access::ConfigAccessor;
use crate::lifecycle::LifecycleNotifier;
use crate::provider::LocalProvider;

/// A node whose boot attempt has concluded.
///
/// Construction runs exactly one boot attempt; there is no re-entry and no
/// mid-boot abort. The outcome is retained in the boot report and signalled
/// through the lifecycle notifier (late subscribers get the terminal events
/// replayed).
pub struct Node {
    options: NodeOptions,
    repo: Arc<dyn Repo>,
    lifecycle: LifecycleNotifier,
    report: BootReport,
}

impl Node {
    /// Boots a node over the supplied repository and capability provider.
    #[must_use]
    pub fn bootstrap(
        options: NodeOptions,
        repo: Arc<dyn Repo>,
        provider: &dyn NodeProvider,
    ) -> Self {
        if options.experimental.pubsub {
            tracing::info!(
                target: "hyphad::node",
                event = "experimental_pubsub",
                "experimental pubsub is enabled"
            );
        }
        let lifecycle = LifecycleNotifier::new();
        let report = boot_with(&options, repo.as_ref(), provider, &lifecycle);
        Self {
            options,
            repo,
            lifecycle,
            report,
        }
    }

    /// Boots a node backed by the filesystem repository at the resolved
    /// location, using the local capability provider.
    #[must_use]
    pub fn with_defaults(options: NodeOptions) -> Self {
        let repo = Arc::new(FsRepo::new(options.repo.clone()));
        Self::bootstrap(options, repo, &LocalProvider::new())
    }

    /// Resolved construction options.
    #[must_use]
    pub fn options(&self) -> &NodeOptions {
        &self.options
    }

    /// Outcome of the boot attempt.
    #[must_use]
    pub fn boot_report(&self) -> &BootReport {
        &self.report
    }

    /// Lifecycle notifier for this instance.
    #[must_use]
    pub fn lifecycle(&self) -> &LifecycleNotifier {
        &self.lifecycle
    }

    /// Typed accessor over single config entries.
    #[must_use]
    pub fn config(&self) -> ConfigAccessor<'_> {
        ConfigAccessor::new(self.repo.as_ref())
    }

    /// The repository handle driven by this node.
    #[must_use]
    pub fn repo(&self) -> &dyn Repo {
        self.repo.as_ref()
    }
}
