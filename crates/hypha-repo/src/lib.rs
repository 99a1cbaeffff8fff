//! Repository capability surface consumed by the node orchestrator.
//!
//! The node never owns block storage or the object model; it drives a
//! repository through the narrow [`Repo`] trait: existence checks, opening
//! and closing, and typed access to the stored config document. Two
//! implementations ship here: [`FsRepo`] persists the config document on
//! disk, [`MemRepo`] backs embedders and tests.
//!
//! Only one open handle may mutate a given store at a time; enforcing that
//! is left to the implementations and their callers.

mod error;
mod fs;
mod memory;

pub use error::RepoError;
pub use fs::{CONFIG_FILE, FsRepo, REPO_VERSION, VERSION_FILE};
pub use memory::MemRepo;

use serde_json::Value;

/// Persistent store holding the node's configuration document.
///
/// Methods take `&self`; the in-memory `closed` flag lives behind interior
/// mutability so a single handle can be shared between the boot sequencer
/// and the config accessor.
pub trait Repo: Send + Sync {
    /// Reports whether the repository exists on durable storage.
    fn exists(&self) -> Result<bool, RepoError>;

    /// Creates the repository with the supplied config document and opens
    /// the handle. Re-initialising an existing repository keeps its stored
    /// document.
    fn init(&self, config: &Value) -> Result<(), RepoError>;

    /// Opens the repository, clearing the closed flag.
    fn open(&self) -> Result<(), RepoError>;

    /// Closes the repository.
    fn close(&self) -> Result<(), RepoError>;

    /// Whether the handle is currently closed.
    fn is_closed(&self) -> bool;

    /// Reads the full config document.
    fn read_config(&self) -> Result<Value, RepoError>;

    /// Replaces the full config document.
    fn write_config(&self, config: &Value) -> Result<(), RepoError>;
}
