//! Admin dashboard counters.

use super::shim::DataShim;
use crate::models::{Booking, BookingStatus, Table, Testimonial, TestimonialStatus};
use serde::Serialize;
use tracing::instrument;

/// Headline numbers on the admin landing page
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[allow(missing_docs)]
pub struct DashboardStats {
    pub total_services: usize,
    pub total_projects: usize,
    pub total_bookings: usize,
    pub pending_bookings: usize,
    pub pending_testimonials: usize,
    pub approved_testimonials: usize,
    pub total_gallery_images: usize,
    pub total_slider_images: usize,
}

/// Loads every collection the dashboard counts, concurrently.
#[instrument(skip(shim))]
pub async fn dashboard_stats(shim: &DataShim) -> DashboardStats {
    let (services, projects, bookings, testimonials, gallery, slider) = tokio::join!(
        shim.fetch_rows(Table::Services),
        shim.fetch_rows(Table::Projects),
        shim.fetch::<Booking>(),
        shim.fetch::<Testimonial>(),
        shim.fetch_rows(Table::Gallery),
        shim.fetch_rows(Table::SliderImages),
    );

    let testimonials_in =
        |status: TestimonialStatus| testimonials.iter().filter(|t| t.status == status).count();

    DashboardStats {
        total_services: services.len(),
        total_projects: projects.len(),
        total_bookings: bookings.len(),
        pending_bookings: bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Pending)
            .count(),
        pending_testimonials: testimonials_in(TestimonialStatus::Pending),
        approved_testimonials: testimonials_in(TestimonialStatus::Approved),
        total_gallery_images: gallery.len(),
        total_slider_images: slider.len(),
    }
}
