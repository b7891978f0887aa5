//! Service record - one offered service card.

use super::{Record, Table, null_as_default, required};
use crate::errors::Result;
use serde::{Deserialize, Serialize};

/// Service grouping; the presentation layer picks default imagery from it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    /// Recurring care (mowing, trimming)
    Maintenance,
    /// Landscape design work
    Design,
    /// Installations (gardens, irrigation, hardscape)
    Installation,
    /// Anything else
    #[default]
    General,
}

/// A service offered by the business
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Service {
    /// Card title
    pub title: String,
    /// Card body
    pub description: String,
    /// URL or data URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Grouping; a null column reads as general
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: ServiceCategory,
}

impl Record for Service {
    const TABLE: Table = Table::Services;

    fn validate(&self) -> Result<()> {
        required("Title", &self.title)?;
        required("Description", &self.description)
    }
}
