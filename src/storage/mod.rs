//! Local fallback store.
//!
//! [`KvStore`] is the injectable capability (`get`/`set`/`remove` of byte values) the
//! fallback store is built on. [`SqliteStore`] keeps the values durably in the local
//! database; [`MemoryStore`] keeps them in process for tests and throwaway runs.
//! [`LocalStore`] layers the seven JSON collections, seeding and the admin session on top.

pub mod fixtures;
pub mod local;
pub mod sqlite;

pub use local::LocalStore;
pub use sqlite::SqliteStore;

use crate::errors::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Byte-valued key/value storage.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Value stored under `key`, or `None` if the key was never written.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// In-process [`KvStore`]; contents die with the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    #[allow(missing_docs)]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_set_get_remove() -> Result<()> {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").await?, None);

        store.set("k", b"one").await?;
        store.set("k", b"two").await?;
        assert_eq!(store.get("k").await?, Some(b"two".to_vec()));

        store.remove("k").await?;
        store.remove("k").await?;
        assert_eq!(store.get("k").await?, None);
        Ok(())
    }
}
