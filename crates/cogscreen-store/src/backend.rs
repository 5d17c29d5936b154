//! Storage backend trait and implementations.
//!
//! The store reads and writes one JSON document. `JsonFileStorage` keeps it
//! in a file on disk; `MemoryStorage` is an in-memory mock for tests with
//! failure injection.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StoreError;

/// Trait for reading/writing the persisted results document.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read the whole document. `Ok(None)` means nothing was ever written.
    async fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replace the whole document.
    async fn write(&self, contents: &str) -> Result<(), StoreError>;
}

/// File-backed storage. One JSON document, whole-file rewrite on save.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl StorageBackend for JsonFileStorage {
    async fn read(&self) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Storage(format!(
                "failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    async fn write(&self, contents: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StoreError::Storage(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        tokio::fs::write(&self.path, contents).await.map_err(|e| {
            StoreError::Storage(format!("failed to write {}: {e}", self.path.display()))
        })
    }
}

/// In-memory mock backend for testing the store without real I/O.
///
/// Reads and writes can be toggled to fail, and write calls are counted so
/// tests can assert on persistence frequency.
#[derive(Default)]
pub struct MemoryStorage {
    contents: Mutex<Option<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    write_count: AtomicU32,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the document, e.g. with corrupt data.
    pub fn with_contents(contents: &str) -> Self {
        Self {
            contents: Mutex::new(Some(contents.to_string())),
            ..Self::default()
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Relaxed);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> u32 {
        self.write_count.load(Ordering::Relaxed)
    }

    /// The current document, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    async fn read(&self) -> Result<Option<String>, StoreError> {
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(StoreError::Storage("injected read failure".into()));
        }
        Ok(self.contents.lock().unwrap().clone())
    }

    async fn write(&self, contents: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StoreError::Storage("injected write failure".into()));
        }
        *self.contents.lock().unwrap() = Some(contents.to_string());
        self.write_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested/results.json"));

        assert!(storage.read().await.unwrap().is_none());
        storage.write("[]").await.unwrap();
        assert_eq!(storage.read().await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn memory_storage_failure_injection() {
        let storage = MemoryStorage::new();
        storage.write("[]").await.unwrap();
        assert_eq!(storage.write_count(), 1);

        storage.set_fail_writes(true);
        assert!(storage.write("x").await.is_err());
        assert_eq!(storage.contents().as_deref(), Some("[]"));

        storage.set_fail_reads(true);
        assert!(storage.read().await.is_err());
    }
}
