//! Persistence collaborators for the task store.
//!
//! The store serialises its whole collection into one document and hands it to a
//! `KeyValueStore` under a single key. `FileStore` maps each key onto a JSON file in a data
//! directory; `MemoryStore` keeps documents in memory.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::rc::Rc;

use crate::error::Result;

/// Key the task collection is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "tasks";

/// Minimal key-value persistence used by `TaskStore`.
pub trait KeyValueStore {
    /// Read the document stored under `key`. `Ok(None)` when nothing has been stored yet.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the document stored under `key`.
    fn write(&self, key: &str, data: &[u8]) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, data: &[u8]) -> Result<()> {
        (**self).write(key, data)
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Atomic-ish write via temp file + rename.
    fn write(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let result = File::create(&tmp)
            .and_then(|mut f| {
                f.write_all(data)?;
                f.flush()
            })
            .and_then(|()| fs::rename(&tmp, &path));
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        Ok(result?)
    }
}

/// In-process store, mostly for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RefCell<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document, e.g. to simulate data left behind by an earlier run.
    pub fn with_document(key: &str, data: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        store.docs.borrow_mut().insert(key.to_string(), data.into());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.docs.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, data: &[u8]) -> Result<()> {
        self.docs.borrow_mut().insert(key.to_string(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_store_missing_key_reads_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.read("tasks").unwrap().is_none());
    }

    #[test]
    fn file_store_write_replaces_document() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        store.write("tasks", b"[1]").unwrap();
        store.write("tasks", b"[2]").unwrap();
        assert_eq!(store.read("tasks").unwrap().unwrap(), b"[2]".to_vec());
        assert!(dir.path().join("tasks.json").exists());
        assert!(!dir.path().join("tasks.json.tmp").exists());
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("tasks.json")).unwrap();
        fs::write(dir.path().join("tasks.json").join("keep"), b"x").unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.write("tasks", b"[]").is_err());
        assert!(!dir.path().join("tasks.json.tmp").exists());
    }

    #[test]
    fn file_store_write_fails_when_dir_is_missing() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nope"));
        assert!(store.write("tasks", b"[]").is_err());
    }

    #[test]
    fn memory_store_keys_are_independent() {
        let store = MemoryStore::with_document("a", "x");
        store.write("b", b"y").unwrap();
        assert_eq!(store.read("a").unwrap().unwrap(), b"x".to_vec());
        assert_eq!(store.read("b").unwrap().unwrap(), b"y".to_vec());
        assert!(store.read("c").unwrap().is_none());
    }
}
