//! Best-effort mirroring of the form snapshot to durable storage
//!
//! The guard exists only for reload recovery. Every failure is logged and
//! swallowed so storage trouble never blocks navigation.

mod file_store;
mod memory;

pub use file_store::FileSnapshotStore;
pub use memory::MemorySnapshotStore;

use thiserror::Error;

use crate::wizard::FormState;

/// Storage key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "brand-onboarding-form";

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("snapshot is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Raw key/value storage for one serialized snapshot
pub trait SnapshotStore: Send {
    /// Storage key the snapshot lives under
    fn key(&self) -> &str;

    fn read(&self) -> Result<Option<String>, PersistenceError>;

    /// Overwrite the stored snapshot
    fn write(&mut self, snapshot: &str) -> Result<(), PersistenceError>;

    /// Erase the stored snapshot; absent is not an error
    fn remove(&mut self) -> Result<(), PersistenceError>;
}

/// Gates snapshot reads and writes on the session's lifecycle flags
pub struct FormPersistenceGuard {
    store: Box<dyn SnapshotStore>,
    /// Set once `restore` has run; writes before that would clobber the
    /// stored snapshot with defaults
    initialized: bool,
    completed: bool,
}

impl FormPersistenceGuard {
    pub fn new(store: Box<dyn SnapshotStore>) -> Self {
        Self {
            store,
            initialized: false,
            completed: false,
        }
    }

    /// Guard over an in-memory store; nothing survives the process
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemorySnapshotStore::new(DEFAULT_STORAGE_KEY)))
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn storage_key(&self) -> &str {
        self.store.key()
    }

    /// Load the stored snapshot, if any, and mark the guard initialized.
    ///
    /// Returns `None` when the session is complete, nothing is stored, or
    /// the stored value cannot be read or parsed.
    pub fn restore(&mut self) -> Option<FormState> {
        self.initialized = true;
        if self.completed {
            return None;
        }

        let raw = match self.store.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = self.store.key(), error = %e, "Failed to read form snapshot");
                return None;
            }
        };

        match FormState::from_json(&raw) {
            Ok(form) => {
                tracing::debug!(key = self.store.key(), fields = form.len(), "Restored form snapshot");
                Some(form)
            }
            Err(e) => {
                tracing::warn!(
                    key = self.store.key(),
                    error = %PersistenceError::from(e),
                    "Ignoring unreadable form snapshot"
                );
                None
            }
        }
    }

    /// Overwrite the stored snapshot with `form`.
    ///
    /// No-op before `restore` and after completion. Failures are logged and
    /// returned for callers that care; navigation never depends on them.
    pub fn persist(&mut self, form: &FormState) -> Result<(), PersistenceError> {
        if !self.initialized || self.completed {
            return Ok(());
        }
        let result = form
            .to_json()
            .map_err(PersistenceError::from)
            .and_then(|json| self.store.write(&json));
        if let Err(ref e) = result {
            tracing::warn!(key = self.store.key(), error = %e, "Failed to save form snapshot");
        }
        result
    }

    /// Mark the session complete and erase the stored snapshot
    pub fn complete(&mut self) -> Result<(), PersistenceError> {
        self.completed = true;
        let result = self.store.remove();
        if let Err(ref e) = result {
            tracing::warn!(key = self.store.key(), error = %e, "Failed to clear form snapshot");
        }
        result
    }

    /// Erase the stored snapshot without completing the session
    pub fn clear(&mut self) -> Result<(), PersistenceError> {
        let result = self.store.remove();
        if let Err(ref e) = result {
            tracing::warn!(key = self.store.key(), error = %e, "Failed to clear form snapshot");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store whose every operation fails
    struct BrokenStore;

    impl SnapshotStore for BrokenStore {
        fn key(&self) -> &str {
            "broken"
        }

        fn read(&self) -> Result<Option<String>, PersistenceError> {
            Err(PersistenceError::Unavailable("disabled".to_string()))
        }

        fn write(&mut self, _snapshot: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable("quota exceeded".to_string()))
        }

        fn remove(&mut self) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable("disabled".to_string()))
        }
    }

    fn sample_form() -> FormState {
        let mut form = FormState::new();
        form.set("company_name", "Acme");
        form.set("preferred_niches", vec!["Beauty".to_string()]);
        form
    }

    #[test]
    fn test_persist_before_restore_is_noop() {
        let store = MemorySnapshotStore::new("k");
        let shared = store.clone();
        let mut guard = FormPersistenceGuard::new(Box::new(store));

        guard.persist(&sample_form()).unwrap();
        assert!(shared.peek().is_none());
    }

    #[test]
    fn test_round_trip_through_restore() {
        let store = MemorySnapshotStore::new("k");
        let shared = store.clone();

        let mut guard = FormPersistenceGuard::new(Box::new(store));
        assert!(guard.restore().is_none());
        guard.persist(&sample_form()).unwrap();

        let mut reloaded = FormPersistenceGuard::new(Box::new(shared));
        assert_eq!(reloaded.restore(), Some(sample_form()));
    }

    #[test]
    fn test_complete_erases_and_stops_writes() {
        let store = MemorySnapshotStore::new("k");
        let shared = store.clone();
        let mut guard = FormPersistenceGuard::new(Box::new(store));
        guard.restore();
        guard.persist(&sample_form()).unwrap();
        assert!(shared.peek().is_some());

        guard.complete().unwrap();
        assert!(shared.peek().is_none());

        guard.persist(&sample_form()).unwrap();
        assert!(shared.peek().is_none());
        assert!(guard.restore().is_none());
    }

    #[test]
    fn test_corrupt_snapshot_is_ignored() {
        let mut store = MemorySnapshotStore::new("k");
        store.write("{not json").unwrap();
        let mut guard = FormPersistenceGuard::new(Box::new(store));
        assert!(guard.restore().is_none());
        assert!(guard.is_initialized());
    }

    #[test]
    fn test_broken_store_never_panics() {
        let mut guard = FormPersistenceGuard::new(Box::new(BrokenStore));
        assert!(guard.restore().is_none());
        assert!(guard.persist(&sample_form()).is_err());
        assert!(guard.complete().is_err());
        assert!(guard.is_completed());
    }

    #[test]
    fn test_overwrite_not_merge() {
        let store = MemorySnapshotStore::new("k");
        let shared = store.clone();
        let mut guard = FormPersistenceGuard::new(Box::new(store));
        guard.restore();

        guard.persist(&sample_form()).unwrap();
        let mut smaller = FormState::new();
        smaller.set("website", "acme.com");
        guard.persist(&smaller).unwrap();

        let stored = FormState::from_json(&shared.peek().unwrap()).unwrap();
        assert_eq!(stored, smaller);
    }
}
