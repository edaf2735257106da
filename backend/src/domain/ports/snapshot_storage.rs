//! Driven port for the durable client-local key-value slot.
//!
//! The session store keeps its identity snapshot here so a reload can restore
//! it. Access is synchronous, mirroring browser local storage; the HTTP adapter
//! backs it with the signed session cookie, which is not `Send`, so the trait
//! carries no thread-safety bounds.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by snapshot storage adapters.
    pub enum SnapshotStorageError {
        /// The stored value could not be read back.
        Read { message: String } => "snapshot read failed: {message}",
        /// The value could not be written or removed.
        Write { message: String } => "snapshot write failed: {message}",
    }
}

/// String-keyed storage for serialized snapshots.
pub trait SnapshotStorage {
    /// Fetch the raw value stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, SnapshotStorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), SnapshotStorageError>;

    /// Delete the value under `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), SnapshotStorageError>;
}

impl<T: SnapshotStorage + ?Sized> SnapshotStorage for &T {
    fn read(&self, key: &str) -> Result<Option<String>, SnapshotStorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SnapshotStorageError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), SnapshotStorageError> {
        (**self).remove(key)
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

/// Process-local storage for tests and tooling.
///
/// Clones share the same entries, so a test can keep a handle while the store
/// owns another and later simulate a reload by building a fresh store over it.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemorySnapshotStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.lock().entries.insert(key.to_owned(), value.to_owned());
        storage
    }

    /// Make subsequent writes and removals fail until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Raw value currently stored under `key`.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.lock().entries.get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SnapshotStorage for InMemorySnapshotStorage {
    fn read(&self, key: &str) -> Result<Option<String>, SnapshotStorageError> {
        Ok(self.lock().entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SnapshotStorageError> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(SnapshotStorageError::write("storage quota exceeded"));
        }
        state.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SnapshotStorageError> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(SnapshotStorageError::write("storage is read-only"));
        }
        state.entries.remove(key);
        Ok(())
    }
}
