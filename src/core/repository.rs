//! The interface both storage tiers implement.
//!
//! Rows cross this boundary as JSON objects; typing happens in [`super::shim::DataShim`].

use crate::{
    errors::Result,
    models::{Patch, Table},
};
use async_trait::async_trait;
use serde_json::Value;

/// Row-level access to the seven collections.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Short name used in logs ("remote", "local").
    fn name(&self) -> &'static str;

    /// Every row of `table`, newest first.
    async fn select_all(&self, table: Table) -> Result<Vec<Value>>;

    /// Stores an already-stamped row.
    async fn insert(&self, table: Table, row: Value) -> Result<()>;

    /// Shallow-merges `patch` into the row with `id`. Returns how many rows matched.
    async fn update(&self, table: Table, id: &str, patch: &Patch) -> Result<usize>;

    /// Removes the row with `id`. Returns how many rows matched.
    async fn delete(&self, table: Table, id: &str) -> Result<usize>;

    /// First row whose fields equal every `(field, value)` pair, compared exactly.
    async fn find_one(&self, table: Table, filter: &[(&str, &str)]) -> Result<Option<Value>>;
}
