//! Slider image record. Display order is collection order.

use super::{Record, Table, required};
use crate::errors::Result;
use serde::{Deserialize, Serialize};

/// One slide of the home page hero slider
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SliderImage {
    /// URL or data URI
    pub image: String,
    /// Overlay text
    pub caption: String,
}

impl Record for SliderImage {
    const TABLE: Table = Table::SliderImages;

    fn validate(&self) -> Result<()> {
        required("Image", &self.image)
    }
}
