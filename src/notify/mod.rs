//! Outbound email notifications.
//!
//! After a booking or review is stored, the business owner gets an email. Delivery is
//! attempted once on a detached task: the caller never waits for it and a failure is
//! only logged.

pub mod resend;
pub mod templates;

pub use resend::ResendMailer;

use crate::{
    config::NotificationConfig,
    errors::Result,
    models::{Booking, Entry, Testimonial},
};
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// One email, in the shape the mail API accepts
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    /// `Display Name <address>`
    pub from: String,
    /// Recipients
    pub to: Vec<String>,
    #[allow(missing_docs)]
    pub subject: String,
    /// HTML body
    pub html: String,
}

/// Something that can deliver an [`EmailMessage`].
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Delivers the message once and returns the provider's message id.
    async fn send(&self, message: &EmailMessage) -> Result<String>;
}

/// Renders notifications and hands them to a [`Mailer`] off the caller's path
#[derive(Clone)]
pub struct Notifier {
    mailer: Option<Arc<dyn Mailer>>,
    config: NotificationConfig,
}

impl Notifier {
    /// A notifier delivering through `mailer`; `None` disables delivery.
    #[must_use]
    pub fn new(mailer: Option<Arc<dyn Mailer>>, config: NotificationConfig) -> Self {
        Self { mailer, config }
    }

    /// A notifier using the configured mail API, disabled when no API key is set.
    #[must_use]
    pub fn from_config(config: NotificationConfig) -> Self {
        let mailer = ResendMailer::from_config(&config).map(|m| Arc::new(m) as Arc<dyn Mailer>);
        Self::new(mailer, config)
    }

    /// A notifier that never sends anything.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(None, NotificationConfig::default())
    }

    /// Whether messages will actually be handed to a mailer.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.mailer.is_some()
    }

    /// Tells the owner about a new booking.
    pub fn booking_received(&self, booking: &Entry<Booking>) -> Option<JoinHandle<()>> {
        self.dispatch("booking", || {
            templates::booking_email(&self.config, booking, Utc::now())
        })
    }

    /// Tells the owner a review is waiting for moderation.
    pub fn review_received(&self, review: &Entry<Testimonial>) -> Option<JoinHandle<()>> {
        self.dispatch("review", || {
            templates::review_email(&self.config, review, Utc::now())
        })
    }

    /// Renders, spawns delivery and returns immediately. The handle may be dropped; the
    /// send still runs to completion. A body that fails to render is logged and not sent.
    fn dispatch<F>(&self, kind: &'static str, render: F) -> Option<JoinHandle<()>>
    where
        F: FnOnce() -> Result<EmailMessage>,
    {
        let Some(mailer) = self.mailer.clone() else {
            warn!(kind, "Mail API key not configured, skipping notification email");
            return None;
        };
        let message = render()
            .inspect_err(|e| error!(kind, error = %e, "Failed to render notification email"))
            .ok()?;

        Some(tokio::spawn(async move {
            match mailer.send(&message).await {
                Ok(id) => info!(kind, id = %id, "Notification email sent"),
                Err(e) => error!(kind, error = %e, "Notification email failed"),
            }
        }))
    }
}
