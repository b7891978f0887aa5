//! Core operations - framework-agnostic logic the site pages and admin screens call.

/// Admin login, logout and credential change
pub mod auth;
/// Booking submission and lifecycle
pub mod bookings;
/// Public catalog queries (services, projects, gallery, slider)
pub mod catalog;
/// Back-office summary counts
pub mod dashboard;
/// Image bytes to data URLs
pub mod media;
/// The interface both storage tiers implement
pub mod repository;
/// The remote-or-local data-access shim
pub mod shim;
/// Review submission and moderation
pub mod testimonials;

pub use repository::Repository;
pub use shim::{DataShim, Source, WriteOutcome};
