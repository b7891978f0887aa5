//! Storage entry entity - one key/value pair of the durable local store.
//!
//! Each of the seven collections lives under its own key as a JSON array; the admin
//! session flags live under two more keys.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Storage entry database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "storage_entries")]
pub struct Model {
    /// Storage key (e.g. `"zentra_services"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Serialized value
    pub value: Vec<u8>,
    /// When the value was last written
    pub updated_at: DateTimeUtc,
}

/// `StorageEntry` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
