//! Small persistent key/value store for client-side preferences.
//!
//! Backed by one JSON object on disk, rewritten on every change. Keys used
//! by the client are `lastChannelId` and the legacy `username` / `password`
//! pair.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

pub const STORAGE_FILE: &str = "local_storage.json";

#[derive(Debug, Default)]
pub struct LocalStorage {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl LocalStorage {
    /// Open (or create) the storage file at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let entries = match std::fs::read_to_string(path) {
            Ok(json) if !json.trim().is_empty() => serde_json::from_str(&json)?,
            Ok(_) => BTreeMap::new(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), keys = entries.len(), "Local storage loaded");

        Ok(Self {
            path: Some(path.to_path_buf()),
            entries,
        })
    }

    /// Storage that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE);

        let mut storage = LocalStorage::open(&path).unwrap();
        assert!(storage.get("lastChannelId").is_none());
        storage.set("lastChannelId", "abc").unwrap();
        drop(storage);

        let storage = LocalStorage::open(&path).unwrap();
        assert_eq!(storage.get("lastChannelId"), Some("abc"));
    }

    #[test]
    fn test_remove() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE);

        let mut storage = LocalStorage::open(&path).unwrap();
        storage.set("username", "ada").unwrap();
        storage.remove("username").unwrap();
        storage.remove("username").unwrap();

        assert!(LocalStorage::open(&path).unwrap().get("username").is_none());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE);
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(LocalStorage::open(&path), Err(ClientError::Json(_))));
    }

    #[test]
    fn test_in_memory_never_touches_disk() {
        let mut storage = LocalStorage::in_memory();
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k"), Some("v"));
    }
}
