//! In-memory repository for embedders and tests.

use std::sync::Mutex;

use camino::Utf8PathBuf;
use serde_json::Value;

use crate::{Repo, RepoError};

#[derive(Debug, Default)]
struct MemState {
    exists: bool,
    open: bool,
    config: Option<Value>,
}

/// Repository held entirely in memory.
///
/// Fresh instances model an uninitialised store; [`MemRepo::with_config`]
/// models one that already exists on "durable" storage but has not been
/// opened yet.
#[derive(Debug, Default)]
pub struct MemRepo {
    state: Mutex<MemState>,
}

impl MemRepo {
    /// An uninitialised repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An existing, not yet opened repository holding `config`.
    #[must_use]
    pub fn with_config(config: Value) -> Self {
        Self {
            state: Mutex::new(MemState {
                exists: true,
                open: false,
                config: Some(config),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemState> {
        // A poisoned lock means a test panicked mid-mutation; propagate the
        // inner state rather than the poison.
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Repo for MemRepo {
    fn exists(&self) -> Result<bool, RepoError> {
        Ok(self.lock().exists)
    }

    fn init(&self, config: &Value) -> Result<(), RepoError> {
        let mut state = self.lock();
        if !state.exists {
            state.config = Some(config.clone());
            state.exists = true;
        }
        state.open = true;
        Ok(())
    }

    fn open(&self) -> Result<(), RepoError> {
        let mut state = self.lock();
        if !state.exists {
            return Err(RepoError::Missing {
                path: Utf8PathBuf::from(":memory:"),
            });
        }
        state.open = true;
        Ok(())
    }

    fn close(&self) -> Result<(), RepoError> {
        self.lock().open = false;
        Ok(())
    }

    fn is_closed(&self) -> bool {
        !self.lock().open
    }

    fn read_config(&self) -> Result<Value, RepoError> {
        let state = self.lock();
        if !state.open {
            return Err(RepoError::Closed);
        }
        state.config.clone().ok_or(RepoError::Missing {
            path: Utf8PathBuf::from(":memory:"),
        })
    }

    fn write_config(&self, config: &Value) -> Result<(), RepoError> {
        let mut state = self.lock();
        if !state.open {
            return Err(RepoError::Closed);
        }
        state.config = Some(config.clone());
        Ok(())
    }
}
