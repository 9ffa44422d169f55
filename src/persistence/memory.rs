//! In-memory snapshot store

use std::sync::{Arc, Mutex};

use super::{PersistenceError, SnapshotStore};

/// Snapshot held in process memory. Clones share the same slot, which lets
/// tests simulate a reload by handing a clone to a fresh guard.
#[derive(Debug, Clone)]
pub struct MemorySnapshotStore {
    key: String,
    slot: Arc<Mutex<Option<String>>>,
}

impl MemorySnapshotStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Current stored value
    pub fn peek(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|s| s.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, PersistenceError> {
        self.slot
            .lock()
            .map_err(|_| PersistenceError::Unavailable("snapshot lock poisoned".to_string()))
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn key(&self) -> &str {
        &self.key
    }

    fn read(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.lock()?.clone())
    }

    fn write(&mut self, snapshot: &str) -> Result<(), PersistenceError> {
        *self.lock()? = Some(snapshot.to_string());
        Ok(())
    }

    fn remove(&mut self) -> Result<(), PersistenceError> {
        *self.lock()? = None;
        Ok(())
    }
}
