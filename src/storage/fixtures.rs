//! Demo records written into each empty collection on first start.

use crate::{
    errors::Result,
    models::{
        AdminCredentials, Entry, GalleryImage, Project, Record, Service, ServiceCategory,
        SliderImage, Table, Testimonial, TestimonialStatus,
    },
};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Username and password of the seeded admin login
pub const DEFAULT_ADMIN_LOGIN: &str = "admin123";

const LAWN_PHOTO: &str = "https://images.pexels.com/photos/1453499/pexels-photo-1453499.jpeg";
const DESIGN_PHOTO: &str = "https://images.pexels.com/photos/1080696/pexels-photo-1080696.jpeg";
const TREE_PHOTO: &str = "https://images.pexels.com/photos/416978/pexels-photo-416978.jpeg";
const GARDEN_PHOTO: &str = "https://images.pexels.com/photos/1049298/pexels-photo-1049298.jpeg";

fn card(photo: &str) -> String {
    format!("{photo}?auto=compress&cs=tinysrgb&w=800")
}

fn hero(photo: &str) -> String {
    format!("{photo}?auto=compress&cs=tinysrgb&w=1920")
}

/// Fixture rows for `table`, each with its own id and `now` as creation time.
pub fn seed_rows(table: Table, now: DateTime<Utc>) -> Result<Vec<Value>> {
    match table {
        Table::Services => stamp_all(services(), now),
        Table::Projects => stamp_all(projects(), now),
        Table::Gallery => stamp_all(gallery(), now),
        Table::Testimonials => stamp_all(testimonials(), now),
        Table::SliderImages => stamp_all(slider_images(), now),
        Table::AdminCredentials => stamp_all(admin_credentials(now), now),
        Table::Bookings => Ok(Vec::new()),
    }
}

fn stamp_all<T: Record>(records: Vec<T>, now: DateTime<Utc>) -> Result<Vec<Value>> {
    records
        .into_iter()
        .map(|record| Entry::stamp(record, now).to_value())
        .collect()
}

fn services() -> Vec<Service> {
    vec![
        Service {
            title: "Professional Lawn Mowing".to_string(),
            description:
                "Regular lawn mowing service to keep your grass healthy and well-maintained."
                    .to_string(),
            image: Some(card(LAWN_PHOTO)),
            category: ServiceCategory::Maintenance,
        },
        Service {
            title: "Landscape Design".to_string(),
            description: "Custom landscape design services to transform your outdoor space."
                .to_string(),
            image: Some(card(DESIGN_PHOTO)),
            category: ServiceCategory::Design,
        },
        Service {
            title: "Tree Trimming & Pruning".to_string(),
            description: "Professional tree care services to maintain healthy and beautiful trees."
                .to_string(),
            image: Some(card(TREE_PHOTO)),
            category: ServiceCategory::Maintenance,
        },
    ]
}

fn projects() -> Vec<Project> {
    vec![
        Project {
            title: "Modern Front Yard Makeover".to_string(),
            description:
                "Complete transformation of a residential front yard with new landscaping."
                    .to_string(),
            before_image: Some(card(LAWN_PHOTO)),
            after_image: Some(card(DESIGN_PHOTO)),
            client_name: Some("John Smith".to_string()),
        },
        Project {
            title: "Backyard Garden Installation".to_string(),
            description: "Beautiful garden installation with native plants and irrigation system."
                .to_string(),
            before_image: Some(card(TREE_PHOTO)),
            after_image: Some(card(GARDEN_PHOTO)),
            client_name: Some("Mary Johnson".to_string()),
        },
    ]
}

fn gallery() -> Vec<GalleryImage> {
    [
        (LAWN_PHOTO, "Beautiful lawn maintenance"),
        (DESIGN_PHOTO, "Professional landscaping"),
        (TREE_PHOTO, "Garden installation"),
    ]
    .into_iter()
    .map(|(photo, caption)| GalleryImage {
        image: card(photo),
        caption: caption.to_string(),
        category: None,
    })
    .collect()
}

fn testimonials() -> Vec<Testimonial> {
    [
        (
            "Sarah Johnson",
            "Excellent service! My lawn has never looked better.",
            5,
            TestimonialStatus::Approved,
        ),
        (
            "Mike Davis",
            "Professional team and great results. Highly recommended!",
            5,
            TestimonialStatus::Approved,
        ),
        (
            "Lisa Chen",
            "Amazing transformation of our backyard. Thank you!",
            4,
            TestimonialStatus::Pending,
        ),
    ]
    .into_iter()
    .map(|(name, text, rating, status)| Testimonial {
        client_name: name.to_string(),
        review_text: text.to_string(),
        rating,
        status,
    })
    .collect()
}

fn slider_images() -> Vec<SliderImage> {
    vec![
        SliderImage {
            image: hero(LAWN_PHOTO),
            caption: "Professional Lawn Care Services".to_string(),
        },
        SliderImage {
            image: hero(DESIGN_PHOTO),
            caption: "Beautiful Landscape Design".to_string(),
        },
    ]
}

fn admin_credentials(now: DateTime<Utc>) -> Vec<AdminCredentials> {
    vec![AdminCredentials {
        username: DEFAULT_ADMIN_LOGIN.to_string(),
        password: DEFAULT_ADMIN_LOGIN.to_string(),
        updated_at: now,
    }]
}
