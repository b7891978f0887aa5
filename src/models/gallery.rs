//! Gallery image record and its fixed category set.

use super::{Record, Table, required};
use crate::errors::Result;
use serde::{Deserialize, Serialize};

/// Filter categories offered on the gallery pages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GalleryCategory {
    #[allow(missing_docs)]
    LawnCare,
    #[allow(missing_docs)]
    Landscaping,
    #[allow(missing_docs)]
    TreeCare,
    /// Garden installation
    Garden,
    #[allow(missing_docs)]
    Maintenance,
    #[allow(missing_docs)]
    Irrigation,
    #[allow(missing_docs)]
    General,
}

/// A photo in the public gallery
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// URL or data URI
    pub image: String,
    /// Caption under the photo
    pub caption: String,
    /// Optional filter category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<GalleryCategory>,
}

impl Record for GalleryImage {
    const TABLE: Table = Table::Gallery;

    fn validate(&self) -> Result<()> {
        required("Image", &self.image)
    }
}
