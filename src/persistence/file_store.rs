//! File-backed snapshot store under the state directory

use std::fs;
use std::path::{Path, PathBuf};

use super::{PersistenceError, SnapshotStore};

/// Stores the snapshot at `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    key: String,
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl AsRef<Path>, key: impl Into<String>) -> Self {
        let key = key.into();
        let path = dir.as_ref().join(format!("{key}.json"));
        Self { key, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn key(&self) -> &str {
        &self.key
    }

    fn read(&self) -> Result<Option<String>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn write(&mut self, snapshot: &str) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Readers never observe a partially written snapshot
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, snapshot)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn remove(&mut self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_uses_key() {
        let store = FileSnapshotStore::new("/tmp/state", "brand-onboarding-form");
        assert_eq!(
            store.path(),
            Path::new("/tmp/state/brand-onboarding-form.json")
        );
    }

    #[test]
    fn test_read_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileSnapshotStore::new(dir.path(), "k");
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn test_write_creates_directory_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let mut store = FileSnapshotStore::new(dir.path().join("nested"), "k");

        store.write(r#"{"a":"1"}"#).unwrap();
        store.write(r#"{"b":"2"}"#).unwrap();

        assert_eq!(store.read().unwrap().as_deref(), Some(r#"{"b":"2"}"#));
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mut store = FileSnapshotStore::new(dir.path(), "k");
        store.write("{}").unwrap();
        store.remove().unwrap();
        store.remove().unwrap();
        assert!(store.read().unwrap().is_none());
    }
}
