//! Local key-value storage.
//!
//! String keys map to string values, the same contract as browser local
//! storage. `FileStorage` keeps the whole map in one JSON object file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use crate::error::{Error, Result};

pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path).map_err(|e| Error::storage(&self.path, e))?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    /// Like `read_map`, but an unparsable file counts as empty so writes can
    /// replace it.
    fn read_map_for_write(&self) -> Result<BTreeMap<String, String>> {
        match self.read_map() {
            Err(Error::Json(e)) => {
                warn!(path = %self.path.display(), error = %e, "storage file is malformed, overwriting");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| Error::storage(parent, e))?;
            }
        }
        let json = serde_json::to_string_pretty(map)?;

        // Write next to the target and rename so a crash never leaves half a file
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| Error::storage(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| Error::storage(&self.path, e))?;
        debug!(path = %self.path.display(), keys = map.len(), "storage written");
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map_for_write()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let mut map = self.read_map_for_write()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.write_map(&BTreeMap::new())
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.items.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("storage.json"));
        assert_eq!(storage.get_item("courses").unwrap(), None);
    }

    #[test]
    fn test_file_storage_set_get_remove() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");
        let mut storage = FileStorage::new(&path);

        storage.set_item("courses", "[]").unwrap();
        storage.set_item("other", "x").unwrap();
        assert!(path.exists());
        assert_eq!(storage.get_item("courses").unwrap().as_deref(), Some("[]"));

        // A second handle on the same file sees the same data
        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get_item("other").unwrap().as_deref(), Some("x"));

        storage.remove_item("courses").unwrap();
        assert_eq!(storage.get_item("courses").unwrap(), None);
        assert_eq!(storage.get_item("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_file_storage_clear() {
        let dir = TempDir::new().unwrap();
        let mut storage = FileStorage::new(dir.path().join("storage.json"));
        storage.set_item("a", "1").unwrap();
        storage.clear().unwrap();
        assert_eq!(storage.get_item("a").unwrap(), None);
    }

    #[test]
    fn test_file_storage_corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();
        let storage = FileStorage::new(&path);
        assert!(matches!(storage.get_item("courses"), Err(Error::Json(_))));
    }

    #[test]
    fn test_file_storage_set_item_replaces_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();
        let mut storage = FileStorage::new(&path);

        storage.set_item("courses", "[]").unwrap();
        assert_eq!(storage.get_item("courses").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
        storage.clear().unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
    }
}
