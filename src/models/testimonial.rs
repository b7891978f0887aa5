//! Testimonial record and its moderation state machine.

use super::{Record, Table, null_as_default, required};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum length of a review body
pub const MIN_REVIEW_LEN: usize = 10;

/// Moderation flag on a testimonial
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestimonialStatus {
    /// Awaiting review; never shown publicly
    #[default]
    Pending,
    /// Shown on the public site
    Approved,
    /// Hidden
    Rejected,
}

impl TestimonialStatus {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Moderation moves: a pending review is approved or rejected, and a moderated one
    /// may be reset to pending by hand.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved | Self::Rejected)
                | (Self::Approved | Self::Rejected, Self::Pending)
        )
    }
}

impl fmt::Display for TestimonialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer review
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    /// Reviewer display name
    pub client_name: String,
    /// Review body
    pub review_text: String,
    /// Star rating, 1 to 5
    pub rating: u8,
    /// Moderation flag; a null column reads as pending
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: TestimonialStatus,
}

impl Record for Testimonial {
    const TABLE: Table = Table::Testimonials;

    fn validate(&self) -> Result<()> {
        required("Name", &self.client_name)?;
        if self.review_text.trim().chars().count() < MIN_REVIEW_LEN {
            return Err(Error::validation(format!(
                "Review must be at least {MIN_REVIEW_LEN} characters"
            )));
        }
        if !(1..=5).contains(&self.rating) {
            return Err(Error::validation("Rating must be between 1 and 5"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: u8, text: &str) -> Testimonial {
        Testimonial {
            client_name: "Dana".to_string(),
            review_text: text.to_string(),
            rating,
            status: TestimonialStatus::Pending,
        }
    }

    #[test]
    fn test_rating_bounds() {
        assert!(review(0, "Great crew, on time.").validate().is_err());
        assert!(review(6, "Great crew, on time.").validate().is_err());
        assert!(review(1, "Great crew, on time.").validate().is_ok());
        assert!(review(5, "Great crew, on time.").validate().is_ok());
    }

    #[test]
    fn test_short_review_is_rejected() {
        assert!(matches!(
            review(4, "ok").validate(),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_moderation_moves() {
        use TestimonialStatus::{Approved, Pending, Rejected};
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Approved.can_transition_to(Pending));
        assert!(Rejected.can_transition_to(Pending));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Pending.can_transition_to(Pending));
    }
}
