//! Booking record and its lifecycle.

use super::{Record, Table, null_as_default, required};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a booking request is in its lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Submitted, not yet answered
    #[default]
    Pending,
    /// Accepted by the business
    Confirmed,
    /// Work done
    Completed,
    /// Withdrawn or declined
    Cancelled,
}

impl BookingStatus {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// `pending -> confirmed|cancelled`, `confirmed -> completed|cancelled`, and an
    /// admin may still cancel a completed booking. Cancelled bookings do not move.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed | Self::Completed, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A service booking request from the contact page.
///
/// `service` names a service by free text; nothing ties it to a [`super::Service`] row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[allow(missing_docs)]
    pub name: String,
    #[allow(missing_docs)]
    pub email: String,
    #[allow(missing_docs)]
    pub phone: String,
    /// Where the work happens
    pub address: String,
    /// Requested service, free text
    pub service: String,
    /// As submitted by the date picker, normally `YYYY-MM-DD`
    pub preferred_date: String,
    /// Time slot label
    pub preferred_time: String,
    /// Optional note from the customer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Lifecycle state; a null column reads as pending
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: BookingStatus,
}

impl Record for Booking {
    const TABLE: Table = Table::Bookings;

    fn validate(&self) -> Result<()> {
        required("Name", &self.name)?;
        required("Email", &self.email)?;
        if !self.email.contains('@') {
            return Err(Error::validation("Invalid email"));
        }
        required("Phone", &self.phone)?;
        required("Address", &self.address)?;
        required("Service", &self.service)?;
        required("Preferred date", &self.preferred_date)?;
        required("Preferred time", &self.preferred_time)
    }
}
