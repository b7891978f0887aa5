//! Durable [`KvStore`] on the local `SQLite` database.

use super::KvStore;
use crate::{
    config::database,
    entities::{StorageEntry, storage_entry},
    errors::Result,
};
use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, Set, sea_query::OnConflict};
use tracing::{debug, instrument};

/// Key/value pairs in the `storage_entries` table
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: DatabaseConnection,
}

impl SqliteStore {
    /// Wraps an existing connection. The table must already exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Connects to `database_url` and creates the table if needed.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let db = database::create_connection(database_url).await?;
        Ok(Self::new(db))
    }
}

#[async_trait]
impl KvStore for SqliteStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let entry = StorageEntry::find_by_id(key.to_string()).one(&self.db).await?;
        Ok(entry.map(|model| model.value))
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let entry = storage_entry::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_vec()),
            updated_at: Set(chrono::Utc::now()),
        };

        StorageEntry::insert(entry)
            .on_conflict(
                OnConflict::column(storage_entry::Column::Key)
                    .update_columns([
                        storage_entry::Column::Value,
                        storage_entry::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        debug!("Stored value for key '{}'", key);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, key: &str) -> Result<()> {
        StorageEntry::delete_by_id(key.to_string())
            .exec(&self.db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get_new_key() -> Result<()> {
        let store = SqliteStore::connect("sqlite::memory:").await?;

        store.set("zentra_services", b"[]").await?;
        assert_eq!(store.get("zentra_services").await?, Some(b"[]".to_vec()));
        Ok(())
    }

    #[tokio::test]
    async fn test_set_overwrites_existing_key() -> Result<()> {
        let store = SqliteStore::connect("sqlite::memory:").await?;

        store.set("admin_logged_in", b"true").await?;
        store.set("admin_logged_in", b"false").await?;
        assert_eq!(store.get("admin_logged_in").await?, Some(b"false".to_vec()));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_and_remove() -> Result<()> {
        let store = SqliteStore::connect("sqlite::memory:").await?;
        assert_eq!(store.get("missing").await?, None);

        store.set("admin_user", b"{}").await?;
        store.remove("admin_user").await?;
        store.remove("admin_user").await?;
        assert_eq!(store.get("admin_user").await?, None);
        Ok(())
    }
}
