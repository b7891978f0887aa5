//! Data-access shim - one typed entry point over the remote and local tiers.
//!
//! Precedence policy, applied the same way by every operation:
//!
//! * No remote configured: the local store answers.
//! * Remote configured: it is tried first. A remote error is logged and the local store
//!   answers instead; a remote success is final and the local store is not touched.
//! * [`DataShim::authenticate`] also falls back when the remote answers but finds no
//!   matching credential, so either source can admit a login.
//!
//! `fetch` never fails. `insert` and `authenticate` report failure to the caller;
//! `update` and `delete` only fail when the local write itself fails.
//!
//! `insert` stores whatever body it is given. Form rules are checked by the caller, or
//! through [`DataShim::insert_validated`].

use super::repository::Repository;
use crate::{
    errors::{Error, Result},
    models::{AdminCredentials, Entry, Patch, Record, Table},
    storage::LocalStore,
};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Which tier served a write
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// The hosted backend
    Remote,
    /// The local fallback store
    Local,
}

/// Result of an update or delete.
///
/// A write that matched nothing still succeeds; `matched` lets callers tell the cases apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Tier that performed the write
    pub source: Source,
    /// Rows the write applied to
    pub matched: usize,
}

/// The data-access shim
#[derive(Clone)]
pub struct DataShim {
    remote: Option<Arc<dyn Repository>>,
    local: LocalStore,
}

impl DataShim {
    /// Builds the shim and seeds the local store once.
    pub async fn open(remote: Option<Arc<dyn Repository>>, local: LocalStore) -> Result<Self> {
        local.seed(Utc::now()).await?;
        if remote.is_some() {
            info!("Remote backend configured; local store is the fallback");
        } else {
            info!("No remote backend configured; using local store only");
        }
        Ok(Self { remote, local })
    }

    /// True when a remote backend is configured.
    #[must_use]
    pub const fn is_remote_enabled(&self) -> bool {
        self.remote.is_some()
    }

    /// The local fallback store, for session state.
    #[must_use]
    pub const fn local(&self) -> &LocalStore {
        &self.local
    }

    /// Raw rows of `table`, newest first. Never fails.
    #[instrument(skip(self))]
    pub async fn fetch_rows(&self, table: Table) -> Vec<Value> {
        if let Some(remote) = &self.remote {
            match remote.select_all(table).await {
                Ok(rows) => return rows,
                Err(e) => warn!(
                    %table,
                    backend = remote.name(),
                    error = %e,
                    "Remote fetch failed, using local store"
                ),
            }
        }
        self.local.read_collection(table).await
    }

    /// Every record of `T`, newest first. Never fails; rows that do not parse are skipped.
    pub async fn fetch<T: Record>(&self) -> Vec<Entry<T>> {
        self.fetch_rows(T::TABLE)
            .await
            .into_iter()
            .filter_map(|row| {
                Entry::from_value(row)
                    .inspect_err(|e| warn!(table = %T::TABLE, error = %e, "Skipping malformed row"))
                    .ok()
            })
            .collect()
    }

    /// Stamps `record` with a new id and the current time, and stores it.
    ///
    /// A remote success is not mirrored locally. If the remote is absent or fails, the row
    /// goes to the front of the local collection. Fails if neither tier stored it.
    #[instrument(skip(self, record), fields(table = %T::TABLE))]
    pub async fn insert<T: Record>(&self, record: T) -> Result<Entry<T>> {
        let entry = Entry::stamp(record, Utc::now());
        let row = entry.to_value()?;

        if let Some(remote) = &self.remote {
            match remote.insert(T::TABLE, row.clone()).await {
                Ok(()) => {
                    debug!(id = %entry.id, "Inserted remotely");
                    return Ok(entry);
                }
                Err(e) => warn!(
                    backend = remote.name(),
                    error = %e,
                    "Remote insert failed, using local store"
                ),
            }
        }

        self.local.insert(T::TABLE, row).await?;
        debug!(id = %entry.id, "Inserted locally");
        Ok(entry)
    }

    /// [`DataShim::insert`] after checking the record's form rules.
    pub async fn insert_validated<T: Record>(&self, record: T) -> Result<Entry<T>> {
        record.validate()?;
        self.insert(record).await
    }

    /// Shallow-merges `patch` into the `T` record with `id`. A missing id matches nothing.
    #[instrument(skip(self, patch), fields(table = %T::TABLE))]
    pub async fn update<T: Record>(&self, id: &str, patch: &Patch) -> Result<WriteOutcome> {
        if let Some(remote) = &self.remote {
            match remote.update(T::TABLE, id, patch).await {
                Ok(matched) => {
                    return Ok(WriteOutcome {
                        source: Source::Remote,
                        matched,
                    });
                }
                Err(e) => warn!(
                    backend = remote.name(),
                    error = %e,
                    "Remote update failed, using local store"
                ),
            }
        }

        let matched = self.local.update(T::TABLE, id, patch).await?;
        Ok(WriteOutcome {
            source: Source::Local,
            matched,
        })
    }

    /// Removes the `T` record with `id`. A missing id matches nothing.
    #[instrument(skip(self), fields(table = %T::TABLE))]
    pub async fn delete<T: Record>(&self, id: &str) -> Result<WriteOutcome> {
        if let Some(remote) = &self.remote {
            match remote.delete(T::TABLE, id).await {
                Ok(matched) => {
                    return Ok(WriteOutcome {
                        source: Source::Remote,
                        matched,
                    });
                }
                Err(e) => warn!(
                    backend = remote.name(),
                    error = %e,
                    "Remote delete failed, using local store"
                ),
            }
        }

        let matched = self.local.delete(T::TABLE, id).await?;
        Ok(WriteOutcome {
            source: Source::Local,
            matched,
        })
    }

    /// Finds the credential row matching both fields exactly.
    ///
    /// The remote is asked first; the local store is scanned whenever the remote is absent,
    /// fails, or finds nothing. No match anywhere is [`Error::InvalidCredentials`].
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Entry<AdminCredentials>> {
        let filter = [("username", username), ("password", password)];

        if let Some(remote) = &self.remote {
            match remote.find_one(Table::AdminCredentials, &filter).await {
                Ok(Some(row)) => match Entry::from_value(row) {
                    Ok(entry) => return Ok(entry),
                    Err(e) => warn!(error = %e, "Remote credential row is malformed"),
                },
                Ok(None) => debug!("No remote credential match, checking local store"),
                Err(e) => warn!(
                    backend = remote.name(),
                    error = %e,
                    "Remote credential lookup failed, using local store"
                ),
            }
        }

        let row = self
            .local
            .find_one(Table::AdminCredentials, &filter)
            .await?
            .ok_or(Error::InvalidCredentials)?;
        Entry::from_value(row).map_err(|_| Error::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::models::{Booking, BookingStatus, Service, ServiceCategory, Testimonial};
    use crate::test_utils::{FakeRemote, memory_shim, sample_booking, shim_with_remote};
    use std::collections::HashSet;

    fn service(title: &str) -> Service {
        Service {
            title: title.to_string(),
            description: "Seasonal mulch refresh".to_string(),
            image: None,
            category: ServiceCategory::General,
        }
    }

    #[tokio::test]
    async fn test_fetch_returns_seed_fixtures_once() -> Result<()> {
        let shim = memory_shim().await?;

        let titles: Vec<String> = shim
            .fetch::<Service>()
            .await
            .into_iter()
            .map(|s| s.record.title)
            .collect();
        assert_eq!(
            titles,
            vec![
                "Professional Lawn Mowing",
                "Landscape Design",
                "Tree Trimming & Pruning"
            ]
        );

        // Seeding is not repeated
        shim.local().seed(Utc::now()).await?;
        assert_eq!(shim.fetch::<Service>().await.len(), 3);
        assert_eq!(shim.fetch::<Service>().await, shim.fetch::<Service>().await);
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_stamps_fresh_id_and_time() -> Result<()> {
        let shim = memory_shim().await?;
        let before: HashSet<String> = shim
            .fetch::<Service>()
            .await
            .into_iter()
            .map(|s| s.id)
            .collect();
        let called_at = Utc::now();

        let entry = shim.insert(service("Mulching")).await?;

        assert!(!before.contains(&entry.id));
        assert!(entry.created_at >= called_at);
        Ok(())
    }

    #[tokio::test]
    async fn test_service_scenario_insert_then_delete_originals() -> Result<()> {
        let shim = memory_shim().await?;
        let originals = shim.fetch::<Service>().await;

        shim.insert(service("Mulching")).await?;
        let all = shim.fetch::<Service>().await;
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].title, "Mulching");

        for original in &originals {
            let outcome = shim.delete::<Service>(&original.id).await?;
            assert_eq!(outcome.matched, 1);
        }
        let remaining = shim.fetch::<Service>().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "Mulching");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_changes_one_field_in_place() -> Result<()> {
        let shim = memory_shim().await?;
        let before = shim.fetch::<Service>().await;
        let target = &before[1];

        let outcome = shim
            .update::<Service>(&target.id, &Patch::new().set("title", "Garden Design")?)
            .await?;
        assert_eq!(
            outcome,
            WriteOutcome {
                source: Source::Local,
                matched: 1
            }
        );

        let after = shim.fetch::<Service>().await;
        assert_eq!(after[1].id, target.id);
        assert_eq!(after[1].title, "Garden Design");
        assert_eq!(after[1].description, target.description);
        assert_eq!(after[1].created_at, target.created_at);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_ids_are_no_ops() -> Result<()> {
        let shim = memory_shim().await?;
        let before = shim.fetch::<Service>().await;

        let updated = shim
            .update::<Service>("missing", &Patch::new().set("title", "x")?)
            .await?;
        let deleted = shim.delete::<Service>("missing").await?;

        assert_eq!(updated.matched, 0);
        assert_eq!(deleted.matched, 0);
        assert_eq!(shim.fetch::<Service>().await, before);
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_accepts_title_only_service() -> Result<()> {
        let shim = memory_shim().await?;
        let entry = shim
            .insert(Service {
                title: "Mulching".to_string(),
                description: String::new(),
                image: None,
                category: ServiceCategory::default(),
            })
            .await?;

        let all = shim.fetch::<Service>().await;
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].id, entry.id);
        assert_eq!(all[0].title, "Mulching");
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_validated_rejects_invalid_record() -> Result<()> {
        let shim = memory_shim().await?;
        let err = shim.insert_validated(service("  ")).await.unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert_eq!(shim.fetch::<Service>().await.len(), 3);

        shim.insert_validated(service("Aeration")).await?;
        assert_eq!(shim.fetch::<Service>().await.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_authenticate_against_seed_data() -> Result<()> {
        let shim = memory_shim().await?;

        let entry = shim.authenticate("admin123", "admin123").await?;
        assert_eq!(entry.username, "admin123");

        let err = shim.authenticate("admin123", "wrong").await.unwrap_err();
        assert!(matches!(err, Error::InvalidCredentials));
        Ok(())
    }

    #[tokio::test]
    async fn test_booking_lifecycle_is_observable_per_step() -> Result<()> {
        let shim = memory_shim().await?;
        let booking = shim.insert(sample_booking()).await?;

        for status in [BookingStatus::Confirmed, BookingStatus::Completed] {
            shim.update::<Booking>(&booking.id, &Patch::new().set("status", status)?)
                .await?;
            let stored = shim.fetch::<Booking>().await;
            assert_eq!(stored[0].id, booking.id);
            assert_eq!(stored[0].status, status);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_rows_are_skipped() -> Result<()> {
        let shim = memory_shim().await?;
        let mut rows = shim.local().read_collection(Table::Testimonials).await;
        rows.insert(0, serde_json::json!({"id": "bad", "rating": "five"}));
        shim.local()
            .write_collection(Table::Testimonials, &rows)
            .await?;

        assert_eq!(shim.fetch::<Testimonial>().await.len(), 3);
        assert_eq!(shim.fetch_rows(Table::Testimonials).await.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_remote_success_is_final() -> Result<()> {
        let remote = Arc::new(FakeRemote::new());
        let shim = shim_with_remote(Arc::clone(&remote)).await?;

        let entry = shim.insert(service("Aeration")).await?;

        assert_eq!(remote.rows(Table::Services).await.len(), 1);
        assert_eq!(shim.local().read_collection(Table::Services).await.len(), 3);
        let fetched = shim.fetch::<Service>().await;
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].id, entry.id);

        let outcome = shim.delete::<Service>(&entry.id).await?;
        assert_eq!(outcome.source, Source::Remote);
        assert_eq!(outcome.matched, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_local() -> Result<()> {
        let remote = Arc::new(FakeRemote::failing());
        let shim = shim_with_remote(Arc::clone(&remote)).await?;

        assert_eq!(shim.fetch::<Service>().await.len(), 3);

        let entry = shim.insert(service("Aeration")).await?;
        assert_eq!(shim.fetch::<Service>().await[0].id, entry.id);

        let outcome = shim
            .update::<Service>(&entry.id, &Patch::new().set("title", "Core Aeration")?)
            .await?;
        assert_eq!(outcome.source, Source::Local);
        assert_eq!(shim.fetch::<Service>().await[0].title, "Core Aeration");

        let deleted = shim.delete::<Service>(&entry.id).await?;
        assert_eq!(deleted.source, Source::Local);
        assert_eq!(deleted.matched, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_authenticate_falls_back_when_remote_has_no_match() -> Result<()> {
        // Reachable remote with an empty credentials table
        let remote = Arc::new(FakeRemote::new());
        let shim = shim_with_remote(remote).await?;

        let entry = shim.authenticate("admin123", "admin123").await?;
        assert_eq!(entry.username, "admin123");
        Ok(())
    }

    #[tokio::test]
    async fn test_authenticate_prefers_remote_match() -> Result<()> {
        let remote = Arc::new(FakeRemote::new());
        let stamped = Entry::stamp(
            AdminCredentials {
                username: "owner".to_string(),
                password: "hunter22".to_string(),
                updated_at: Utc::now(),
            },
            Utc::now(),
        );
        remote
            .insert(Table::AdminCredentials, stamped.to_value()?)
            .await?;
        let shim = shim_with_remote(remote).await?;

        assert_eq!(shim.authenticate("owner", "hunter22").await?.id, stamped.id);
        assert!(matches!(
            shim.authenticate("owner", "nope").await,
            Err(Error::InvalidCredentials)
        ));
        Ok(())
    }
}
