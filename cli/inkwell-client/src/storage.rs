//! Persistent client-side key/value storage.
//!
//! Values are plain strings without versioning or expiry. The client reads
//! [TOKEN_KEY] on every request; the theme store owns [THEME_KEY].

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, trace};

pub const TOKEN_KEY: &str = "token";
pub const THEME_KEY: &str = "theme";
pub const LOCAL_STORAGE_FILE: &str = "local_storage.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not read local storage at {}", .0.display())]
    Read(PathBuf, #[source] std::io::Error),
    #[error("could not write local storage at {}", .0.display())]
    Write(PathBuf, #[source] std::io::Error),
    #[error("local storage at {} is not a JSON object of strings", .0.display())]
    Parse(PathBuf, #[source] serde_json::Error),
    #[error("could not persist local storage")]
    Persist(#[from] tempfile::PersistError),
}

pub trait LocalStorage: Debug + Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage that lives for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items<K, V>(items: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            items: Mutex::new(
                items
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .items
            .lock()
            .expect("local storage lock poisoned")
            .get(key)
            .cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .lock()
            .expect("local storage lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items
            .lock()
            .expect("local storage lock poisoned")
            .remove(key);
        Ok(())
    }
}

/// Storage backed by a JSON object in a single file.
///
/// The file is re-read on every access so that values written by another
/// process are picked up. Writes go through a temporary file in the same
/// directory and are renamed into place.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage at `<dir>/local_storage.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(LOCAL_STORAGE_FILE))
    }

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                trace!(path = %self.path.display(), "local storage file does not exist yet");
                return Ok(BTreeMap::new());
            },
            Err(e) => return Err(StorageError::Read(self.path.clone(), e)),
        };
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents).map_err(|e| StorageError::Parse(self.path.clone(), e))
    }

    fn write(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let dir = self.path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(dir).map_err(|e| StorageError::Write(self.path.clone(), e))?;

        let contents = serde_json::to_string_pretty(items)
            .map_err(|e| StorageError::Parse(self.path.clone(), e))?;
        let mut temp =
            NamedTempFile::new_in(dir).map_err(|e| StorageError::Write(self.path.clone(), e))?;
        temp.write_all(contents.as_bytes())
            .map_err(|e| StorageError::Write(self.path.clone(), e))?;
        temp.persist(&self.path)?;
        debug!(path = %self.path.display(), "wrote local storage");
        Ok(())
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.read()?;
        items.insert(key.to_string(), value.to_string());
        self.write(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.read()?;
        if items.remove(key).is_some() {
            self.write(&items)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn memory_storage_round_trips_items() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item(TOKEN_KEY).unwrap(), None);
        storage.set_item(TOKEN_KEY, "abc").unwrap();
        assert_eq!(storage.get_item(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
        storage.remove_item(TOKEN_KEY).unwrap();
        assert_eq!(storage.get_item(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn file_storage_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::in_dir(dir.path());
        assert_eq!(storage.get_item(THEME_KEY).unwrap(), None);
        assert!(!storage.path().exists());
    }

    #[test]
    fn file_storage_is_visible_to_a_second_handle() {
        let dir = tempfile::tempdir().unwrap();
        let first = FileStorage::in_dir(dir.path().join("nested"));
        first.set_item(THEME_KEY, "dark").unwrap();
        first.set_item(TOKEN_KEY, "t0k3n").unwrap();

        let second = FileStorage::in_dir(dir.path().join("nested"));
        assert_eq!(second.get_item(THEME_KEY).unwrap().as_deref(), Some("dark"));

        second.remove_item(TOKEN_KEY).unwrap();
        assert_eq!(first.get_item(TOKEN_KEY).unwrap(), None);
        assert_eq!(first.get_item(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn file_storage_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::in_dir(dir.path());
        fs::write(storage.path(), "[1, 2]").unwrap();
        assert!(matches!(
            storage.get_item(TOKEN_KEY),
            Err(StorageError::Parse(..))
        ));
    }
}
