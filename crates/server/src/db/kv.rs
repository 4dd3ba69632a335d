//! Key-value store backing the persisted cart snapshot.
//!
//! The cart is the only client-local shared state: independent UI surfaces
//! read and write the same serialized snapshot under a fixed key, with
//! last-write-wins semantics at whole-value granularity. Two backends are
//! provided: one JSON file per key under a data directory, and an in-memory
//! map for tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors from the key-value boundary.
#[derive(Debug, Error)]
pub enum KvError {
    /// Underlying I/O failed.
    #[error("kv i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// A string key-value store.
///
/// Values are opaque to the store; callers own serialization. Writes replace
/// the whole value for the key.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read the value under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    /// Replace the value under `key`.
    async fn put(&self, key: &str, value: String) -> Result<(), KvError>;

    /// Remove the value under `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), KvError>;
}

/// File-backed store: one `<key>.json` file per key under a data directory.
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    /// Create a store rooted at `dir`. The directory is created on first
    /// write, not here.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KvStore for FileKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, value: String) -> Result<(), KvError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.path_for(key), value).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), KvError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Default)]
pub struct InMemoryKvStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKvStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<(), KvError> {
        self.values.write().await.insert(key.to_owned(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), KvError> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_roundtrip() {
        let kv = InMemoryKvStore::new();
        assert!(kv.get("cart").await.unwrap().is_none());

        kv.put("cart", "[]".to_owned()).await.unwrap();
        assert_eq!(kv.get("cart").await.unwrap().as_deref(), Some("[]"));

        kv.delete("cart").await.unwrap();
        assert!(kv.get("cart").await.unwrap().is_none());
        // deleting again is fine
        kv.delete("cart").await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let kv = FileKvStore::new(dir.path());

        assert!(kv.get("cart").await.unwrap().is_none());
        kv.put("cart", "{\"x\":1}".to_owned()).await.unwrap();
        assert_eq!(
            kv.get("cart").await.unwrap().as_deref(),
            Some("{\"x\":1}")
        );

        // a second store over the same directory sees the value
        let other = FileKvStore::new(dir.path());
        assert!(other.get("cart").await.unwrap().is_some());

        kv.delete("cart").await.unwrap();
        assert!(other.get("cart").await.unwrap().is_none());
    }
}
