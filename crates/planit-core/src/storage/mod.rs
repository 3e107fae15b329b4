//! Client-side key-value storage.
//!
//! Stores are flat string maps persisted as JSON. A restricted store is
//! written with mode 0600 and plays the role of the platform keystore; a
//! plain store is an ordinary file anyone with access to the home can read.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use anyhow::{Context, Result};

pub mod auth;

pub use auth::{AuthStorage, UserInfo};

/// Minimal string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Reads a value.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value, replacing any previous one.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes a value. Returns whether it was present.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<bool>;
}

/// File permissions applied when a [`FileStore`] is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    /// Owner read/write only (0600 on Unix).
    Restricted,
    /// Default permissions.
    Plain,
}

/// JSON-file backed store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    protection: Protection,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>, protection: Protection) -> Self {
        Self {
            path: path.into(),
            protection,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn protection(&self) -> Protection {
        self.protection
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read store from {}", self.path.display()))?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse store from {}", self.path.display()))
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(entries).context("Failed to serialize store")?;
        let tmp_path = self.path.with_extension("json.tmp");

        write_file(&tmp_path, contents.as_bytes(), self.protection)?;
        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

fn write_file(path: &Path, contents: &[u8], protection: Protection) -> Result<()> {
    #[cfg(unix)]
    {
        use std::fs::OpenOptions;
        use std::io::Write;
        use std::os::unix::fs::OpenOptionsExt;

        let mode = match protection {
            Protection::Restricted => 0o600,
            Protection::Plain => 0o644,
        };
        // Stale temp files keep their old mode; start fresh.
        let _ = fs::remove_file(path);
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(mode)
            .open(path)
            .with_context(|| format!("Failed to open {} for writing", path.display()))?;
        file.write_all(contents)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    #[cfg(not(unix))]
    {
        let _ = protection;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    Ok(())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        tracing::debug!(store = %self.path.display(), key, "store set");
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.load()?;
        if entries.remove(key).is_none() {
            return Ok(false);
        }
        tracing::debug!(store = %self.path.display(), key, "store remove");
        self.save(&entries)?;
        Ok(true)
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store.json"), Protection::Plain);

        assert_eq!(store.get("anything").unwrap(), None);
        assert!(!store.remove("anything").unwrap());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_round_trips_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");
        let store = FileStore::new(&path, Protection::Plain);

        store.set("username", "alice").unwrap();
        store.set("user_id", "7").unwrap();
        assert_eq!(store.get("username").unwrap().as_deref(), Some("alice"));

        let reopened = FileStore::new(&path, Protection::Plain);
        assert_eq!(reopened.get("user_id").unwrap().as_deref(), Some("7"));

        assert!(reopened.remove("username").unwrap());
        assert_eq!(store.get("username").unwrap(), None);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileStore::new(&path, Protection::Plain);
        let err = store.get("k").unwrap_err();
        assert!(err.to_string().contains("Failed to parse store"));
    }

    #[cfg(unix)]
    #[test]
    fn test_restricted_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("secure.json");
        let store = FileStore::new(&path, Protection::Restricted);
        store.set("auth_token", "tok").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn test_memory_store_basic_ops() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.len(), 1);
        assert!(store.remove("a").unwrap());
        assert!(!store.remove("a").unwrap());
    }
}
