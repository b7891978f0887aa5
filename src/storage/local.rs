//! Collections, seeding and the admin session on top of a [`KvStore`].
//!
//! Each collection is one JSON array under `<prefix><table>`. Inserts go to the front, so
//! the array reads newest first; updates keep a row's position and deletes keep the order
//! of the remainder. A read never fails: an absent, unreadable or malformed value is an
//! empty collection.
//!
//! Writes are read-modify-write of the whole array and are not atomic. Two concurrent
//! writers to the same collection can lose an update.

use super::{KvStore, fixtures};
use crate::{
    core::repository::Repository,
    errors::Result,
    models::{AdminSession, Patch, Table, row_id},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Key of the `"true"` flag set while an admin is logged in
pub const LOGGED_IN_KEY: &str = "admin_logged_in";
/// Key of the JSON-encoded [`AdminSession`]
pub const SESSION_KEY: &str = "admin_user";

/// The local fallback store
#[derive(Clone)]
pub struct LocalStore {
    kv: Arc<dyn KvStore>,
    prefix: String,
}

impl LocalStore {
    /// Creates a store writing collections under `prefix`-ed keys.
    pub fn new(kv: Arc<dyn KvStore>, prefix: impl Into<String>) -> Self {
        Self {
            kv,
            prefix: prefix.into(),
        }
    }

    /// Storage key of `table`.
    #[must_use]
    pub fn key_for(&self, table: Table) -> String {
        table.storage_key(&self.prefix)
    }

    /// The rows of `table` in stored order. Never fails.
    #[instrument(skip(self))]
    pub async fn read_collection(&self, table: Table) -> Vec<Value> {
        let key = self.key_for(table);
        let bytes = match self.kv.get(&key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(%table, error = %e, "Failed to read local collection, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<Value>>(&bytes) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(%table, error = %e, "Malformed local collection, treating as empty");
                Vec::new()
            }
        }
    }

    /// Replaces the stored rows of `table`.
    pub async fn write_collection(&self, table: Table, rows: &[Value]) -> Result<()> {
        let bytes = serde_json::to_vec(rows)?;
        self.kv.set(&self.key_for(table), &bytes).await?;
        debug!(%table, rows = rows.len(), "Wrote local collection");
        Ok(())
    }

    /// Writes fixture rows into every collection that has no stored value yet.
    ///
    /// Existing values, even malformed ones, are left alone, so running this twice changes
    /// nothing the second time. Returns the tables that were seeded.
    #[instrument(skip(self))]
    pub async fn seed(&self, now: DateTime<Utc>) -> Result<Vec<Table>> {
        let mut seeded = Vec::new();
        for table in Table::ALL {
            if self.kv.get(&self.key_for(table)).await?.is_some() {
                continue;
            }
            let rows = fixtures::seed_rows(table, now)?;
            self.write_collection(table, &rows).await?;
            seeded.push(table);
        }
        if !seeded.is_empty() {
            info!("Seeded {} local collections with demo data", seeded.len());
        }
        Ok(seeded)
    }

    /// Records a logged-in admin.
    pub async fn save_session(&self, session: &AdminSession) -> Result<()> {
        self.kv.set(LOGGED_IN_KEY, b"true").await?;
        self.kv
            .set(SESSION_KEY, &serde_json::to_vec(session)?)
            .await
    }

    /// The current session, if the logged-in flag is set and the session object parses.
    pub async fn session(&self) -> Option<AdminSession> {
        if !self.is_logged_in().await {
            return None;
        }
        let bytes = self.kv.get(SESSION_KEY).await.ok().flatten()?;
        serde_json::from_slice(&bytes)
            .inspect_err(|e| warn!(error = %e, "Malformed admin session"))
            .ok()
    }

    /// True when the logged-in flag is `"true"`.
    pub async fn is_logged_in(&self) -> bool {
        matches!(self.kv.get(LOGGED_IN_KEY).await, Ok(Some(flag)) if flag == b"true")
    }

    /// Forgets the session.
    pub async fn clear_session(&self) -> Result<()> {
        self.kv.remove(LOGGED_IN_KEY).await?;
        self.kv.remove(SESSION_KEY).await
    }
}

fn matches_filter(row: &Value, filter: &[(&str, &str)]) -> bool {
    filter
        .iter()
        .all(|(field, expected)| row.get(*field).and_then(Value::as_str) == Some(*expected))
}

#[async_trait]
impl Repository for LocalStore {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn select_all(&self, table: Table) -> Result<Vec<Value>> {
        Ok(self.read_collection(table).await)
    }

    async fn insert(&self, table: Table, row: Value) -> Result<()> {
        let mut rows = self.read_collection(table).await;
        rows.insert(0, row);
        self.write_collection(table, &rows).await
    }

    async fn update(&self, table: Table, id: &str, patch: &Patch) -> Result<usize> {
        let mut rows = self.read_collection(table).await;
        let Some(row) = rows.iter_mut().find(|row| row_id(row) == Some(id)) else {
            debug!(%table, id, "No local row to update");
            return Ok(0);
        };
        patch.apply_to(row);
        self.write_collection(table, &rows).await?;
        Ok(1)
    }

    async fn delete(&self, table: Table, id: &str) -> Result<usize> {
        let mut rows = self.read_collection(table).await;
        let before = rows.len();
        rows.retain(|row| row_id(row) != Some(id));
        let removed = before - rows.len();
        if removed > 0 {
            self.write_collection(table, &rows).await?;
        }
        Ok(removed)
    }

    async fn find_one(&self, table: Table, filter: &[(&str, &str)]) -> Result<Option<Value>> {
        Ok(self
            .read_collection(table)
            .await
            .into_iter()
            .find(|row| matches_filter(row, filter)))
    }
}
