//! Boot sequencing for the node.
//!
//! A boot attempt runs three steps strictly in order: repository readiness,
//! config merge, start. Each step suspends on its external collaborator and
//! the first failure aborts the remainder. The attempt then concludes
//! through the lifecycle notifier: `Failed` first when an error occurred,
//! then unconditionally `Ready`.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use hypha_config::{NodeOptions, deep_merge};
use hypha_repo::{Repo, RepoError};

use crate::capability::{CapabilityError, NodeProvider};
use crate::lifecycle::LifecycleNotifier;

const BOOT_TARGET: &str = "hyphad::boot";

/// Ordered steps of a boot attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BootStep {
    /// Repository initialisation or opening.
    RepoReady,
    /// Merge of caller config overrides into the stored document.
    ConfigMerged,
    /// Bring-up of the networking and exchange subsystems.
    Started,
}

impl fmt::Display for BootStep {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::RepoReady => "repo-ready",
            Self::ConfigMerged => "config-merged",
            Self::Started => "started",
        };
        formatter.write_str(label)
    }
}

/// Errors surfaced by a boot attempt, one variant per failing operation.
#[derive(Debug, Error)]
pub enum BootError {
    /// The init capability failed.
    #[error("repository initialisation failed: {0}")]
    RepoInit(#[source] CapabilityError),
    /// Querying repository existence failed.
    #[error("repository existence check failed: {0}")]
    RepoExistenceCheck(#[source] RepoError),
    /// Opening the existing repository failed.
    #[error("failed to open repository: {0}")]
    RepoOpen(#[source] RepoError),
    /// Reading the stored config during the merge step failed.
    #[error("failed to read stored config: {0}")]
    ConfigRead(#[source] RepoError),
    /// Writing the merged config back failed.
    #[error("failed to write merged config: {0}")]
    ConfigWrite(#[source] RepoError),
    /// The start capability failed.
    #[error("node start failed: {0}")]
    Start(#[source] CapabilityError),
}

impl BootError {
    /// The step at which the boot attempt failed.
    #[must_use]
    pub fn step(&self) -> BootStep {
        match self {
            Self::RepoInit(_) | Self::RepoExistenceCheck(_) | Self::RepoOpen(_) => {
                BootStep::RepoReady
            }
            Self::ConfigRead(_) | Self::ConfigWrite(_) => BootStep::ConfigMerged,
            Self::Start(_) => BootStep::Started,
        }
    }
}

/// Two-part outcome of a concluded boot attempt.
///
/// `Ready` marks "attempt concluded", not "attempt succeeded": a report with
/// an error still concluded, and callers must inspect [`BootReport::error`]
/// to learn the true outcome.
#[derive(Debug, Default)]
pub struct BootReport {
    /// The step failure that aborted the attempt, when one occurred.
    pub error: Option<BootError>,
}

impl BootReport {
    /// Whether every step succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Runs one boot attempt over the supplied collaborators.
///
/// The three steps execute strictly in order with no retry and no re-entry;
/// the notifier receives the terminal signals exactly once regardless of
/// where (or whether) the attempt failed.
pub fn boot_with(
    options: &NodeOptions,
    repo: &dyn Repo,
    provider: &dyn NodeProvider,
    notifier: &LifecycleNotifier,
) -> BootReport {
    tracing::info!(
        target: BOOT_TARGET,
        event = "boot_starting",
        init = options.init.is_enabled(),
        start = options.start,
        repo = %options.repo,
        "starting boot attempt"
    );

    let report = BootReport {
        error: run_steps(options, repo, provider).err(),
    };

    match &report.error {
        Some(error) => tracing::error!(
            target: BOOT_TARGET,
            event = "boot_failed",
            step = %error.step(),
            error = %error,
            "boot attempt failed"
        ),
        None => tracing::info!(
            target: BOOT_TARGET,
            event = "boot_succeeded",
            "boot attempt completed"
        ),
    }

    notifier.conclude(&report);
    report
}

fn run_steps(
    options: &NodeOptions,
    repo: &dyn Repo,
    provider: &dyn NodeProvider,
) -> Result<(), BootError> {
    ensure_repo_ready(options, repo, provider)?;
    merge_config(options, repo)?;
    start_subsystems(options, repo, provider)
}

/// S0: bring the repository to readiness.
fn ensure_repo_ready(
    options: &NodeOptions,
    repo: &dyn Repo,
    provider: &dyn NodeProvider,
) -> Result<(), BootError> {
    if let Some(params) = options.init.options() {
        tracing::debug!(
            target: BOOT_TARGET,
            event = "repo_init",
            bits = params.bits,
            "initialising repository"
        );
        return provider.init(params, repo).map_err(BootError::RepoInit);
    }

    if !repo.is_closed() {
        return Ok(());
    }

    let exists = repo.exists().map_err(BootError::RepoExistenceCheck)?;
    if exists {
        return repo.open().map_err(BootError::RepoOpen);
    }

    // Missing repository without init: readiness is deferred to first use.
    tracing::debug!(
        target: BOOT_TARGET,
        event = "repo_deferred",
        "repository absent, deferring open"
    );
    Ok(())
}

/// S1: merge caller overrides into the stored config document.
///
/// Runs only when overrides were supplied and initialisation was enabled;
/// otherwise the step is a no-op success.
fn merge_config(options: &NodeOptions, repo: &dyn Repo) -> Result<(), BootError> {
    let Some(overrides) = options
        .config
        .as_ref()
        .filter(|_| options.init.is_enabled())
    else {
        return Ok(());
    };

    tracing::debug!(target: BOOT_TARGET, event = "config_merge", "setting config");
    let mut stored = repo.read_config().map_err(BootError::ConfigRead)?;
    deep_merge(&mut stored, &Value::Object(overrides.clone()));
    repo.write_config(&stored).map_err(BootError::ConfigWrite)
}

/// S2: bring up the networking and exchange subsystems.
fn start_subsystems(
    options: &NodeOptions,
    repo: &dyn Repo,
    provider: &dyn NodeProvider,
) -> Result<(), BootError> {
    if !options.start {
        return Ok(());
    }
    tracing::debug!(target: BOOT_TARGET, event = "starting", "starting node");
    provider.start(repo).map_err(BootError::Start)
}
