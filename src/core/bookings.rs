//! Booking business logic - contact-page submissions and the admin lifecycle.

use super::shim::{DataShim, Source, WriteOutcome};
use crate::{
    errors::{Error, Result},
    models::{Booking, BookingStatus, Entry, Patch},
    notify::Notifier,
};
use tracing::{info, instrument};

/// The contact-page booking form
#[derive(Clone, Debug, Default)]
pub struct BookingRequest {
    #[allow(missing_docs)]
    pub name: String,
    #[allow(missing_docs)]
    pub email: String,
    #[allow(missing_docs)]
    pub phone: String,
    #[allow(missing_docs)]
    pub address: String,
    /// Service picked from the form's list
    pub service: String,
    #[allow(missing_docs)]
    pub preferred_date: String,
    #[allow(missing_docs)]
    pub preferred_time: String,
    /// Free-text note; blank means none
    pub message: String,
}

impl From<BookingRequest> for Booking {
    fn from(request: BookingRequest) -> Self {
        let message = Some(request.message.trim().to_string()).filter(|m| !m.is_empty());
        Self {
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            phone: request.phone.trim().to_string(),
            address: request.address.trim().to_string(),
            service: request.service,
            preferred_date: request.preferred_date,
            preferred_time: request.preferred_time,
            message,
            status: BookingStatus::Pending,
        }
    }
}

/// Stores a booking request as pending and notifies the owner.
///
/// Only the insert is awaited; the email goes out on a detached task.
#[instrument(skip(shim, notifier, request))]
pub async fn submit_booking(
    shim: &DataShim,
    notifier: &Notifier,
    request: BookingRequest,
) -> Result<Entry<Booking>> {
    let booking = shim.insert_validated(Booking::from(request)).await?;
    info!(id = %booking.id, service = %booking.service, "Booking submitted");
    // dropping the handle detaches the send
    drop(notifier.booking_received(&booking));
    Ok(booking)
}

/// Moves a booking to `next` if the lifecycle allows it.
///
/// A booking that no longer exists is a no-op with `matched == 0`.
#[instrument(skip(shim))]
pub async fn set_booking_status(
    shim: &DataShim,
    id: &str,
    next: BookingStatus,
) -> Result<WriteOutcome> {
    let current = shim
        .fetch::<Booking>()
        .await
        .into_iter()
        .find(|booking| booking.id == id);

    let Some(current) = current else {
        return Ok(WriteOutcome {
            source: if shim.is_remote_enabled() {
                Source::Remote
            } else {
                Source::Local
            },
            matched: 0,
        });
    };

    if !current.status.can_transition_to(next) {
        return Err(Error::InvalidTransition {
            entity: "booking",
            from: current.status.to_string(),
            to: next.to_string(),
        });
    }

    shim.update::<Booking>(id, &Patch::new().set("status", next)?)
        .await
}

/// Bookings in one status, newest first.
pub async fn bookings_with_status(shim: &DataShim, status: BookingStatus) -> Vec<Entry<Booking>> {
    shim.fetch::<Booking>()
        .await
        .into_iter()
        .filter(|booking| booking.status == status)
        .collect()
}
