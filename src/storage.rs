//! Storage port: a string-keyed, string-valued durable store.
//!
//! The gateway talks to storage only through the [`Storage`] trait, the same
//! narrow surface a browser's `localStorage` offers. Two backends ship here:
//!
//! - [`MemoryStorage`]: shared in-memory map. Clones share data, so several
//!   canvas instances can act as tabs over one store. Optional byte quota.
//! - [`FileStorage`]: one JSON file per key in a directory. Writes go to a
//!   temp file that is then renamed over the target.
//!
//! Backends never panic; every operation returns a [`StorageResult`].

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Errors raised by storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The write would exceed the store's capacity.
    #[error("storage quota exceeded")]
    QuotaExceeded,
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(io::Error),
    /// The backend cannot serve requests (poisoned lock, read-only mode).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::StorageFull {
            StorageError::QuotaExceeded
        } else {
            StorageError::Io(e)
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A durable string key-value store.
pub trait Storage {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Read the value under `key`. A missing key is `Ok(None)`.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value under `key` in a single write.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing a missing key succeeds.
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// MemoryStorage
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct MemoryInner {
    data: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
    writes: AtomicUsize,
    read_only: AtomicBool,
}

/// In-memory storage. Cloning yields a handle to the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<MemoryInner>,
}

impl MemoryStorage {
    /// Create an empty store with no quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store holding at most `bytes` of keys plus values.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            inner: Arc::new(MemoryInner { quota_bytes: Some(bytes), ..MemoryInner::default() }),
        }
    }

    /// Number of successful `set_item` calls since creation.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::Relaxed)
    }

    /// Make every write and removal fail with [`StorageError::Unavailable`].
    pub fn set_read_only(&self, read_only: bool) {
        self.inner.read_only.store(read_only, Ordering::Relaxed);
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.data.read().map_or(0, |data| data.len())
    }

    /// Returns `true` if no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_writable(&self) -> StorageResult<()> {
        if self.inner.read_only.load(Ordering::Relaxed) {
            return Err(StorageError::Unavailable("read-only".into()));
        }
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn name(&self) -> &str {
        "MemoryStorage"
    }

    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let data = self
            .inner
            .data
            .read()
            .map_err(|_| StorageError::Unavailable("lock poisoned".into()))?;
        Ok(data.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check_writable()?;
        let mut data = self
            .inner
            .data
            .write()
            .map_err(|_| StorageError::Unavailable("lock poisoned".into()))?;
        if let Some(quota) = self.inner.quota_bytes {
            let others: usize = data
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if others + key.len() + value.len() > quota {
                return Err(StorageError::QuotaExceeded);
            }
        }
        data.insert(key.to_owned(), value.to_owned());
        self.inner.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.check_writable()?;
        let mut data = self
            .inner
            .data
            .write()
            .map_err(|_| StorageError::Unavailable("lock poisoned".into()))?;
        data.remove(key);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// FileStorage
// ─────────────────────────────────────────────────────────────────────────────

/// Directory-backed storage: key `k` lives in `<dir>/<k>.json`.
///
/// Writes use a temporary file + rename so a crash never leaves a torn value.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    quota_bytes: Option<u64>,
}

impl FileStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf(), quota_bytes: None }
    }

    /// Cap the total size of all stored values at `bytes`.
    #[must_use]
    pub fn with_quota(mut self, bytes: u64) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{file}.json"))
    }

    fn stored_bytes_excluding(&self, skip: &Path) -> io::Result<u64> {
        let mut total = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path == skip || path.extension().is_none_or(|e| e != "json") {
                continue;
            }
            total += fs::metadata(&path)?.len();
        }
        Ok(total)
    }
}

impl Storage for FileStorage {
    fn name(&self) -> &str {
        "FileStorage"
    }

    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);

        if let Some(quota) = self.quota_bytes {
            let others = self.stored_bytes_excluding(&path)?;
            if others + value.len() as u64 > quota {
                return Err(StorageError::QuotaExceeded);
            }
        }

        let mut tmp = path.clone();
        tmp.set_extension("json.tmp");
        if let Err(e) = write_then_rename(&tmp, &path, value) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(path = %tmp.display(), error = %cleanup, "failed to remove temp file");
                }
            }
            return Err(e.into());
        }

        tracing::debug!(path = %path.display(), bytes = value.len(), "stored item");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn write_then_rename(tmp: &Path, path: &Path, value: &str) -> io::Result<()> {
    let mut file = fs::File::create(tmp)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()?;
    drop(file);
    fs::rename(tmp, path)
}
