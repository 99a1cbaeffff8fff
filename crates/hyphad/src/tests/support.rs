//! Recording doubles for the boot sequencer suite.

use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use camino::Utf8PathBuf;
use serde_json::{Value, json};

use hypha_config::InitOptions;
use hypha_repo::{MemRepo, Repo, RepoError};

use crate::capability::{CapabilityError, NodeProvider};

fn injected_failure() -> io::Error {
    io::Error::other("deliberate failure")
}

fn memory_path() -> Utf8PathBuf {
    Utf8PathBuf::from(":memory:")
}

/// Repository double that counts calls and injects failures on demand.
#[derive(Default)]
pub struct RecordingRepo {
    inner: MemRepo,
    exists_calls: AtomicUsize,
    open_calls: AtomicUsize,
    read_calls: AtomicUsize,
    write_calls: AtomicUsize,
    fail_exists: AtomicBool,
    fail_open: AtomicBool,
    fail_read: AtomicBool,
    fail_write: AtomicBool,
}

impl RecordingRepo {
    /// A repo that does not exist on durable storage.
    pub fn absent() -> Self {
        Self::default()
    }

    /// An existing, closed repo holding `config`.
    pub fn existing(config: Value) -> Self {
        Self {
            inner: MemRepo::with_config(config),
            ..Self::default()
        }
    }

    /// An existing repo whose handle is already open.
    pub fn open_with(config: Value) -> Self {
        let repo = Self::existing(config);
        repo.inner.open().expect("open must succeed");
        repo
    }

    pub fn fail_exists(&self) {
        self.fail_exists.store(true, Ordering::SeqCst);
    }

    pub fn fail_open(&self) {
        self.fail_open.store(true, Ordering::SeqCst);
    }

    pub fn fail_read(&self) {
        self.fail_read.store(true, Ordering::SeqCst);
    }

    pub fn fail_write(&self) {
        self.fail_write.store(true, Ordering::SeqCst);
    }

    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    pub fn open_calls(&self) -> usize {
        self.open_calls.load(Ordering::SeqCst)
    }

    pub fn read_calls(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    /// The stored config document, bypassing the closed flag.
    pub fn stored_config(&self) -> Value {
        let was_closed = self.inner.is_closed();
        if was_closed {
            self.inner.open().expect("open must succeed");
        }
        let config = self.inner.read_config().expect("config must be readable");
        if was_closed {
            self.inner.close().expect("close must succeed");
        }
        config
    }
}

impl Repo for RecordingRepo {
    fn exists(&self) -> Result<bool, RepoError> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_exists.load(Ordering::SeqCst) {
            return Err(RepoError::Io {
                path: memory_path(),
                source: injected_failure(),
            });
        }
        self.inner.exists()
    }

    fn init(&self, config: &Value) -> Result<(), RepoError> {
        self.inner.init(config)
    }

    fn open(&self) -> Result<(), RepoError> {
        self.open_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_open.load(Ordering::SeqCst) {
            return Err(RepoError::Io {
                path: memory_path(),
                source: injected_failure(),
            });
        }
        self.inner.open()
    }

    fn close(&self) -> Result<(), RepoError> {
        self.inner.close()
    }

    fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    fn read_config(&self) -> Result<Value, RepoError> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_read.load(Ordering::SeqCst) {
            return Err(RepoError::Io {
                path: memory_path(),
                source: injected_failure(),
            });
        }
        self.inner.read_config()
    }

    fn write_config(&self, config: &Value) -> Result<(), RepoError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_write.load(Ordering::SeqCst) {
            return Err(RepoError::Io {
                path: memory_path(),
                source: injected_failure(),
            });
        }
        self.inner.write_config(config)
    }
}

/// Capability provider double that counts calls and injects failures.
#[derive(Default)]
pub struct RecordingProvider {
    init_calls: AtomicUsize,
    start_calls: AtomicUsize,
    fail_init: AtomicBool,
    fail_start: AtomicBool,
    last_bits: Mutex<Option<u32>>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_init(&self) {
        self.fail_init.store(true, Ordering::SeqCst);
    }

    pub fn fail_start(&self) {
        self.fail_start.store(true, Ordering::SeqCst);
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn last_bits(&self) -> Option<u32> {
        *self.last_bits.lock().expect("bits mutex poisoned")
    }
}

impl NodeProvider for RecordingProvider {
    fn init(&self, params: &InitOptions, repo: &dyn Repo) -> Result<(), CapabilityError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_bits.lock().expect("bits mutex poisoned") = Some(params.bits);
        if self.fail_init.load(Ordering::SeqCst) {
            return Err(CapabilityError::new("deliberate init failure"));
        }
        repo.init(&json!({"Identity": {"KeyBits": params.bits}}))
            .map_err(|source| CapabilityError::with_source("repository init failed", source))
    }

    fn start(&self, _repo: &dyn Repo) -> Result<(), CapabilityError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(CapabilityError::new("deliberate start failure"));
        }
        Ok(())
    }
}
