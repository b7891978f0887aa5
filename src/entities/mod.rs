//! Entity module - SeaORM entity definitions for the local database.
//! The local fallback store is a single key/value table.

pub mod storage_entry;

pub use storage_entry::{Entity as StorageEntry, Model as StorageEntryModel};
