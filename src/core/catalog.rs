//! Read-side queries for the public pages.

use super::shim::DataShim;
use crate::models::{Entry, GalleryCategory, GalleryImage, Project, Service, ServiceCategory, SliderImage};

/// Services, optionally restricted to one category.
pub async fn services(shim: &DataShim, category: Option<ServiceCategory>) -> Vec<Entry<Service>> {
    shim.fetch::<Service>()
        .await
        .into_iter()
        .filter(|service| category.is_none_or(|c| service.category == c))
        .collect()
}

/// Project showcases, newest first.
pub async fn projects(shim: &DataShim) -> Vec<Entry<Project>> {
    shim.fetch::<Project>().await
}

/// Gallery images; `None` means every category, including uncategorized images.
pub async fn gallery(shim: &DataShim, category: Option<GalleryCategory>) -> Vec<Entry<GalleryImage>> {
    shim.fetch::<GalleryImage>()
        .await
        .into_iter()
        .filter(|image| category.is_none_or(|c| image.category == Some(c)))
        .collect()
}

/// Hero slides in display order.
pub async fn slider(shim: &DataShim) -> Vec<Entry<SliderImage>> {
    shim.fetch::<SliderImage>().await
}
