//! Project record - a before/after showcase.

use super::{Record, Table, required};
use crate::errors::Result;
use serde::{Deserialize, Serialize};

/// A completed job shown on the projects page
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project title
    pub title: String,
    /// What was done
    pub description: String,
    /// Photo before the work, URL or data URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_image: Option<String>,
    /// Photo after the work, URL or data URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_image: Option<String>,
    /// Client display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
}

impl Record for Project {
    const TABLE: Table = Table::Projects;

    fn validate(&self) -> Result<()> {
        required("Title", &self.title)?;
        required("Description", &self.description)
    }
}
