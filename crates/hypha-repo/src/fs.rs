//! Filesystem-backed repository.
//!
//! The on-disk layout is a directory holding a `version` marker and the
//! `config.json` document. Config writes go through a temporary file in the
//! same directory followed by a rename so a crash never leaves a partially
//! written document behind.

use std::fs;
use std::io::{ErrorKind, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::{Repo, RepoError};

/// Name of the config document inside the repository directory.
pub const CONFIG_FILE: &str = "config.json";

/// Name of the layout version marker.
pub const VERSION_FILE: &str = "version";

/// On-disk layout version written by [`Repo::init`].
pub const REPO_VERSION: u32 = 1;

/// Repository persisted under a single directory.
#[derive(Debug)]
pub struct FsRepo {
    root: Utf8PathBuf,
    closed: AtomicBool,
}

impl FsRepo {
    /// Creates a handle over the given directory. Handles start closed.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            closed: AtomicBool::new(true),
        }
    }

    /// Repository root directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        self.root.as_path()
    }

    fn config_path(&self) -> Utf8PathBuf {
        self.root.join(CONFIG_FILE)
    }

    fn version_path(&self) -> Utf8PathBuf {
        self.root.join(VERSION_FILE)
    }

    fn io_error(path: Utf8PathBuf, source: std::io::Error) -> RepoError {
        RepoError::Io { path, source }
    }

    fn write_config_document(&self, config: &Value) -> Result<(), RepoError> {
        let rendered = serde_json::to_vec_pretty(config).map_err(RepoError::Serialise)?;
        let mut staged = NamedTempFile::new_in(self.root.as_std_path())
            .map_err(|source| Self::io_error(self.root.clone(), source))?;
        staged
            .write_all(&rendered)
            .map_err(|source| Self::io_error(self.config_path(), source))?;
        staged
            .persist(self.config_path().as_std_path())
            .map_err(|source| Self::io_error(self.config_path(), source.error))?;
        Ok(())
    }
}

impl Repo for FsRepo {
    fn exists(&self) -> Result<bool, RepoError> {
        match fs::metadata(self.config_path().as_std_path()) {
            Ok(_) => Ok(true),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(Self::io_error(self.config_path(), source)),
        }
    }

    fn init(&self, config: &Value) -> Result<(), RepoError> {
        fs::create_dir_all(self.root.as_std_path())
            .map_err(|source| Self::io_error(self.root.clone(), source))?;
        if !self.exists()? {
            fs::write(self.version_path().as_std_path(), format!("{REPO_VERSION}\n"))
                .map_err(|source| Self::io_error(self.version_path(), source))?;
            self.write_config_document(config)?;
            tracing::info!(
                target: "hypha_repo::fs",
                event = "repo_initialised",
                root = %self.root,
                "initialised repository"
            );
        }
        self.closed.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn open(&self) -> Result<(), RepoError> {
        if !self.exists()? {
            return Err(RepoError::Missing {
                path: self.root.clone(),
            });
        }
        match fs::metadata(self.version_path().as_std_path()) {
            Ok(_) => {}
            Err(source) if source.kind() == ErrorKind::NotFound => {
                return Err(RepoError::MissingVersion {
                    path: self.root.clone(),
                });
            }
            Err(source) => return Err(Self::io_error(self.version_path(), source)),
        }
        self.closed.store(false, Ordering::SeqCst);
        tracing::debug!(
            target: "hypha_repo::fs",
            event = "repo_opened",
            root = %self.root,
            "opened repository"
        );
        Ok(())
    }

    fn close(&self) -> Result<(), RepoError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn read_config(&self) -> Result<Value, RepoError> {
        if self.is_closed() {
            return Err(RepoError::Closed);
        }
        let raw = match fs::read_to_string(self.config_path().as_std_path()) {
            Ok(raw) => raw,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                return Err(RepoError::Missing {
                    path: self.root.clone(),
                });
            }
            Err(source) => return Err(Self::io_error(self.config_path(), source)),
        };
        serde_json::from_str(&raw).map_err(|source| RepoError::Corrupt {
            path: self.config_path(),
            source,
        })
    }

    fn write_config(&self, config: &Value) -> Result<(), RepoError> {
        if self.is_closed() {
            return Err(RepoError::Closed);
        }
        self.write_config_document(config)
    }
}
