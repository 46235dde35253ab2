// Primitive key-value backends.
// Defines the host store capability (sync get, async set/remove) and an in-memory implementation.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Flat string-keyed store provided by the host.
///
/// Reads are synchronous. Writes and removals are asynchronous and must be
/// awaited before a later `get` is guaranteed to observe them.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `data` under `key`, replacing any previous value.
    fn set(&self, key: &str, data: String) -> impl Future<Output = Result<()>> + Send;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Process-local store backed by a map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of physical entries, shadow keys included.
    pub fn len(&self) -> usize {
        self.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Backend("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, data: String) -> Result<()> {
        self.lock()?.insert(key.to_string(), data);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("token", "abc".to_string()).await.unwrap();
        assert_eq!(store.get("token").unwrap(), Some("abc".to_string()));
        assert_eq!(store.len(), 1);

        store.remove("token").await.unwrap();
        assert_eq!(store.get("token").unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_missing_is_ok() {
        let store = MemoryStore::new();
        store.remove("nothing").await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = MemoryStore::new();
        store.set("k", "1".to_string()).await.unwrap();
        store.set("k", "2".to_string()).await.unwrap();
        assert_eq!(store.get("k").unwrap(), Some("2".to_string()));
        assert_eq!(store.len(), 1);
    }
}
