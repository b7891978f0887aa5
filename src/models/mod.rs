//! Record types - the seven flat collections the site persists.
//!
//! Callers build a record body (e.g. [`Service`]) and hand it to the data-access shim,
//! which wraps it in an [`Entry`] carrying the generated id and creation timestamp.
//! Partial updates are expressed as a [`Patch`], a shallow field map.

pub mod booking;
pub mod credentials;
pub mod gallery;
pub mod project;
pub mod service;
pub mod slider;
pub mod testimonial;

pub use booking::{Booking, BookingStatus};
pub use credentials::{AdminCredentials, AdminSession};
pub use gallery::{GalleryCategory, GalleryImage};
pub use project::Project;
pub use service::{Service, ServiceCategory};
pub use slider::SliderImage;
pub use testimonial::{Testimonial, TestimonialStatus};

use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use std::{fmt, ops::Deref, str::FromStr};
use uuid::Uuid;

/// The seven known collections. Backend table names and local storage keys derive from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    /// Offered services
    Services,
    /// Before/after project showcases
    Projects,
    /// Gallery images
    Gallery,
    /// Customer reviews under moderation
    Testimonials,
    /// Home page hero slider
    SliderImages,
    /// The shared admin login
    AdminCredentials,
    /// Service booking requests
    Bookings,
}

impl Table {
    /// Every collection, in seeding order.
    pub const ALL: [Self; 7] = [
        Self::Services,
        Self::Projects,
        Self::Gallery,
        Self::Testimonials,
        Self::SliderImages,
        Self::AdminCredentials,
        Self::Bookings,
    ];

    /// Table name on the remote backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Services => "services",
            Self::Projects => "projects",
            Self::Gallery => "gallery",
            Self::Testimonials => "testimonials",
            Self::SliderImages => "slider_images",
            Self::AdminCredentials => "admin_credentials",
            Self::Bookings => "bookings",
        }
    }

    /// Local storage key for this collection, e.g. `zentra_services`.
    #[must_use]
    pub fn storage_key(self, prefix: &str) -> String {
        format!("{prefix}{}", self.as_str())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Table {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|table| table.as_str() == s)
            .ok_or_else(|| Error::UnknownTable {
                name: s.to_string(),
            })
    }
}

/// A record body bound to the collection it lives in.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The collection holding records of this type.
    const TABLE: Table;

    /// Rejects bodies that would violate the record's field rules.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// A stored record: the body plus the id and timestamp stamped by the access layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry<T> {
    /// Unique within the collection; assigned at insert, never by the caller
    pub id: String,
    /// Creation instant; assigned at insert and never mutated.
    /// Rows created outside the access layer may lack it and read as the epoch.
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    /// Caller-owned fields
    #[serde(flatten)]
    pub record: T,
}

impl<T: Record> Entry<T> {
    /// Wraps a body with a fresh v4 UUID and the given creation instant.
    pub fn stamp(record: T, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            record,
        }
    }

    /// JSON object form, as stored locally and sent to the remote backend.
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Into::into)
    }

    /// Parses a stored row.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(Into::into)
    }
}

impl<T> Deref for Entry<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.record
    }
}

/// Fields owned by the access layer; a patch never touches them.
const RESERVED_FIELDS: [&str; 2] = ["id", "created_at"];

/// A partial update: field name to new JSON value, shallow-merged into the stored row.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Patch(Map<String, Value>);

impl Patch {
    /// An empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one field. `id` and `created_at` are silently ignored.
    pub fn set<V: Serialize>(mut self, field: &str, value: V) -> Result<Self> {
        if !RESERVED_FIELDS.contains(&field) {
            self.0.insert(field.to_string(), serde_json::to_value(value)?);
        }
        Ok(self)
    }

    /// The fields this patch writes.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Shallow-merges the patch into a JSON object. Non-object targets are left alone.
    pub fn apply_to(&self, target: &mut Value) {
        if let Value::Object(row) = target {
            for (field, value) in &self.0 {
                row.insert(field.clone(), value.clone());
            }
        }
    }
}

impl From<Map<String, Value>> for Patch {
    fn from(mut fields: Map<String, Value>) -> Self {
        for reserved in RESERVED_FIELDS {
            fields.remove(reserved);
        }
        Self(fields)
    }
}

/// Returns the `id` field of a stored row, if it has a string one.
#[must_use]
pub fn row_id(row: &Value) -> Option<&str> {
    row.get("id").and_then(Value::as_str)
}

/// Reads an explicit JSON `null` as the field type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Rejects a blank form field.
pub(crate) fn required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{field} is required")));
    }
    Ok(())
}
