//! Bootstrap and lifecycle orchestration for a hypha node.
//!
//! The crate sequences one boot attempt per node instance: bring the
//! repository to readiness, merge caller config overrides into the stored
//! document, and start the networking/exchange subsystems. Each step drives
//! an external collaborator (the repository handle or the capability
//! provider) and the first hard failure short-circuits the remainder. The
//! attempt always concludes with a `Ready` lifecycle signal; a preceding
//! `Failed` signal carries the step error when one occurred, so consumers
//! must inspect it to learn the true outcome.
//!
//! Block storage, content routing, peer discovery, and the DAG model stay
//! behind the [`Repo`] and [`NodeProvider`] seams; this crate only sequences
//! calls into them and reacts to their success or failure.

mod bootstrap;
mod capability;
mod config_access;
mod lifecycle;
mod node;
mod provider;
pub mod telemetry;

pub use bootstrap::{BootError, BootReport, BootStep, boot_with};
pub use capability::{CapabilityError, NodeProvider};
pub use config_access::{ConfigAccessor, ConfigError, WriteMode};
pub use lifecycle::{LifecycleEvent, LifecycleNotifier};
pub use node::Node;
pub use provider::LocalProvider;
pub use telemetry::{TelemetryError, TelemetryHandle};

pub use hypha_repo::{Repo, RepoError};
