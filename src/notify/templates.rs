//! HTML bodies for the owner notifications.
//!
//! The bodies are askama templates under `templates/`; every interpolated customer value
//! is HTML-escaped by the template engine.

use super::EmailMessage;
use crate::{
    config::NotificationConfig,
    errors::Result,
    models::{Booking, Entry, Testimonial},
};
use askama::Template;
use chrono::{DateTime, NaiveDate, Utc};

const BOOKING_SUBJECT: &str = "New Service Booking Request";
const REVIEW_SUBJECT: &str = "New Customer Review Submitted";

#[derive(Template)]
#[template(path = "booking_email.html")]
struct BookingEmailTemplate<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    address: &'a str,
    service: &'a str,
    preferred_date: String,
    preferred_time: &'a str,
    message: Option<&'a str>,
    submitted_at: String,
}

#[derive(Template)]
#[template(path = "review_email.html")]
struct ReviewEmailTemplate<'a> {
    client_name: &'a str,
    rating: u8,
    review_text: &'a str,
    submitted_at: String,
}

/// `2026-05-14` becomes `May 14, 2026`; blank is "Not specified"; anything else is kept.
#[must_use]
pub fn format_preferred_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "Not specified".to_string();
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_or_else(|_| raw.to_string(), |date| date.format("%B %-d, %Y").to_string())
}

fn submitted(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

fn message(config: &NotificationConfig, subject: &str, html: String) -> EmailMessage {
    EmailMessage {
        from: config.from_header(),
        to: vec![config.to_email.clone()],
        subject: subject.to_string(),
        html,
    }
}

/// Owner notification for a new booking request.
pub fn booking_email(
    config: &NotificationConfig,
    booking: &Entry<Booking>,
    submitted_at: DateTime<Utc>,
) -> Result<EmailMessage> {
    let html = BookingEmailTemplate {
        name: &booking.name,
        email: &booking.email,
        phone: &booking.phone,
        address: &booking.address,
        service: &booking.service,
        preferred_date: format_preferred_date(&booking.preferred_date),
        preferred_time: &booking.preferred_time,
        message: booking.message.as_deref().filter(|m| !m.trim().is_empty()),
        submitted_at: submitted(submitted_at),
    }
    .render()?;
    Ok(message(config, BOOKING_SUBJECT, html))
}

/// Owner notification for a review awaiting moderation.
pub fn review_email(
    config: &NotificationConfig,
    review: &Entry<Testimonial>,
    submitted_at: DateTime<Utc>,
) -> Result<EmailMessage> {
    let html = ReviewEmailTemplate {
        client_name: &review.client_name,
        rating: review.rating,
        review_text: &review.review_text,
        submitted_at: submitted(submitted_at),
    }
    .render()?;
    Ok(message(config, REVIEW_SUBJECT, html))
}
