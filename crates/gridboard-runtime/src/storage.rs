#![forbid(unsafe_code)]

//! Key-value storage backends for saved layouts.
//!
//! The engine only needs `get`, `set`, and `remove` on string keys. Keys
//! are derived from the user identity and the dashboard key via
//! [`storage_key`]; values are the JSON record arrays produced by
//! `gridboard_layout::encode_records`.
//!
//! - [`MemoryStorage`] keeps everything in a map and can enforce a byte
//!   quota, which is how browser-style storage fails in practice.
//! - [`FileStorage`] keeps one JSON object (`key -> payload`) on disk and
//!   replaces it atomically: write a sibling temp file, then rename.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Storage failures. None of these affect the in-memory layout.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage quota exceeded: {required} bytes needed, {quota} allowed")]
    QuotaExceeded { required: usize, quota: usize },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Durable string store consumed by the session.
pub trait StorageBackend {
    /// Short name used in log events.
    fn name(&self) -> &str;

    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

impl<T: StorageBackend + ?Sized> StorageBackend for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

/// Storage key for one user's layout of one dashboard.
#[must_use]
pub fn storage_key(user: &str, dashboard: &str) -> String {
    format!("gridboard:layout:{user}:{dashboard}")
}

// ---------------------------------------------------------------------------
// MemoryStorage
// ---------------------------------------------------------------------------

/// In-memory backend, optionally limited to `quota` bytes of keys plus
/// values.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota: Some(quota),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bytes currently used by keys and values.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl StorageBackend for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(quota) = self.quota {
            let existing = self.entries.get(key).map_or(0, |v| key.len() + v.len());
            let required = self.used_bytes() - existing + key.len() + value.len();
            if required > quota {
                return Err(StorageError::QuotaExceeded { required, quota });
            }
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStorage
// ---------------------------------------------------------------------------

/// JSON-file backend. The whole map is rewritten on every change.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open `path`, reading existing entries. A missing file is an empty
    /// store; an unreadable or corrupt one is an error.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|source| {
                StorageError::Corrupt {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, entries })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "gridboard".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        let payload = serde_json::to_string_pretty(entries)
            .map_err(|err| StorageError::Unavailable(err.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let temp = self.temp_path();
        fs::write(&temp, payload)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

impl StorageBackend for FileStorage {
    fn name(&self) -> &str {
        "file"
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let mut next = self.entries.clone();
        next.insert(key.to_owned(), value.to_owned());
        self.persist(&next)?;
        self.entries = next;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.remove(key);
        self.persist(&next)?;
        self.entries = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_includes_user_and_dashboard() {
        assert_eq!(storage_key("ada", "sales"), "gridboard:layout:ada:sales");
        assert_ne!(storage_key("ada", "sales"), storage_key("bob", "sales"));
    }

    #[test]
    fn memory_round_trip_and_remove() {
        let mut store = MemoryStorage::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn memory_quota_rejects_without_mutation() {
        let mut store = MemoryStorage::with_quota(10);
        store.set("k", "12345").unwrap();
        // Replacing counts only the new value.
        store.set("k", "123456789").unwrap();
        let err = store.set("k2", "xxxxxxxx").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                required: 20,
                quota: 10
            }
        ));
        assert_eq!(store.get("k2").unwrap(), None);
        assert_eq!(store.used_bytes(), 10);
    }

    #[test]
    fn file_storage_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layouts.json");
        {
            let mut store = FileStorage::open(&path).unwrap();
            store.set("a", "[1]").unwrap();
            store.set("b", "[2]").unwrap();
            store.remove("a").unwrap();
        }
        let store = FileStorage::open(&path).unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("[2]"));
        assert!(!dir.path().join("layouts.json.tmp").exists());
    }

    #[test]
    fn file_storage_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");
        let mut store = FileStorage::open(&path).unwrap();
        store.set("k", "v").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layouts.json");
        fs::write(&path, "{not json").unwrap();
        let err = FileStorage::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
        assert!(err.to_string().contains("corrupt"));
    }

    #[test]
    fn boxed_backend_forwards() {
        let mut store: Box<dyn StorageBackend> = Box::new(MemoryStorage::new());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(store.name(), "memory");
    }
}
