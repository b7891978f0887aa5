//! Shared test utilities.
//!
//! This module provides an in-memory shim, a scripted stand-in for the hosted backend,
//! a mailer that records instead of sending, and records with sensible defaults.

use crate::{
    core::{repository::Repository, shim::DataShim},
    errors::{Error, Result},
    models::{Booking, BookingStatus, Patch, Table, row_id},
    notify::{EmailMessage, Mailer},
    storage::{KvStore, LocalStore, MemoryStore},
};
use async_trait::async_trait;
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

/// Installs a test subscriber once; later calls are ignored.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// A local store over a fresh [`MemoryStore`].
#[must_use]
pub fn memory_local() -> LocalStore {
    LocalStore::new(Arc::new(MemoryStore::new()) as Arc<dyn KvStore>, "zentra_")
}

/// A seeded shim with no remote backend.
/// This is the standard setup for shim-level tests.
pub async fn memory_shim() -> Result<DataShim> {
    init_test_tracing();
    DataShim::open(None, memory_local()).await
}

/// A seeded shim whose remote tier is `remote`.
pub async fn shim_with_remote(remote: Arc<FakeRemote>) -> Result<DataShim> {
    init_test_tracing();
    DataShim::open(Some(remote as Arc<dyn Repository>), memory_local()).await
}

/// A booking as submitted from the contact page.
///
/// # Defaults
/// * `service`: `"Lawn Mowing"`
/// * `status`: pending
/// * `message`: none
#[must_use]
pub fn sample_booking() -> Booking {
    Booking {
        name: "Alex Rivera".to_string(),
        email: "alex@example.com".to_string(),
        phone: "555-0100".to_string(),
        address: "12 Elm Street".to_string(),
        service: "Lawn Mowing".to_string(),
        preferred_date: "2026-05-14".to_string(),
        preferred_time: "Morning (8AM - 12PM)".to_string(),
        message: None,
        status: BookingStatus::Pending,
    }
}

/// In-memory stand-in for the hosted backend. Starts empty; can be told to fail every call.
#[derive(Default)]
pub struct FakeRemote {
    tables: RwLock<HashMap<Table, Vec<Value>>>,
    failing: bool,
}

impl FakeRemote {
    /// A reachable, empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose every call errors.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Rows currently held for `table`.
    pub async fn rows(&self, table: Table) -> Vec<Value> {
        self.tables
            .read()
            .await
            .get(&table)
            .cloned()
            .unwrap_or_default()
    }

    fn check(&self) -> Result<()> {
        if self.failing {
            return Err(Error::Remote {
                status: 503,
                message: "backend unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Repository for FakeRemote {
    fn name(&self) -> &'static str {
        "fake-remote"
    }

    async fn select_all(&self, table: Table) -> Result<Vec<Value>> {
        self.check()?;
        Ok(self.rows(table).await)
    }

    async fn insert(&self, table: Table, row: Value) -> Result<()> {
        self.check()?;
        self.tables
            .write()
            .await
            .entry(table)
            .or_default()
            .insert(0, row);
        Ok(())
    }

    async fn update(&self, table: Table, id: &str, patch: &Patch) -> Result<usize> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let rows = tables.entry(table).or_default();
        let mut matched = 0;
        for row in rows.iter_mut().filter(|row| row_id(row) == Some(id)) {
            patch.apply_to(row);
            matched += 1;
        }
        Ok(matched)
    }

    async fn delete(&self, table: Table, id: &str) -> Result<usize> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let rows = tables.entry(table).or_default();
        let before = rows.len();
        rows.retain(|row| row_id(row) != Some(id));
        Ok(before - rows.len())
    }

    async fn find_one(&self, table: Table, filter: &[(&str, &str)]) -> Result<Option<Value>> {
        self.check()?;
        Ok(self.rows(table).await.into_iter().find(|row| {
            filter
                .iter()
                .all(|(field, value)| row.get(*field).and_then(Value::as_str) == Some(*value))
        }))
    }
}

/// Mailer that keeps every message it is asked to send.
#[derive(Default)]
pub struct RecordingMailer {
    sent: RwLock<Vec<EmailMessage>>,
    failing: bool,
}

impl RecordingMailer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer that records the attempt and then errors.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Messages handed to [`Mailer::send`] so far.
    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.read().await.clone()
    }

    /// Yields to detached send tasks until `count` messages arrived, or gives up after
    /// a bounded number of turns and returns what it has.
    pub async fn wait_for(&self, count: usize) -> Vec<EmailMessage> {
        for _ in 0..100 {
            if self.sent.read().await.len() >= count {
                break;
            }
            tokio::task::yield_now().await;
        }
        self.sent().await
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<String> {
        self.sent.write().await.push(message.clone());
        if self.failing {
            return Err(Error::Remote {
                status: 500,
                message: "mail API down".to_string(),
            });
        }
        Ok(format!("msg-{}", self.sent.read().await.len()))
    }
}
