//! Testimonial business logic - public review submissions and admin moderation.

use super::shim::{DataShim, Source, WriteOutcome};
use crate::{
    errors::{Error, Result},
    models::{Entry, Patch, Testimonial, TestimonialStatus},
    notify::Notifier,
};
use tracing::{info, instrument};

/// The review form on the home page
#[derive(Clone, Debug)]
pub struct ReviewSubmission {
    #[allow(missing_docs)]
    pub client_name: String,
    #[allow(missing_docs)]
    pub review_text: String,
    /// 1 to 5
    pub rating: u8,
}

/// Stores a review as pending, whatever status the caller had in mind, and notifies the owner.
#[instrument(skip(shim, notifier, submission))]
pub async fn submit_testimonial(
    shim: &DataShim,
    notifier: &Notifier,
    submission: ReviewSubmission,
) -> Result<Entry<Testimonial>> {
    let testimonial = Testimonial {
        client_name: submission.client_name.trim().to_string(),
        review_text: submission.review_text.trim().to_string(),
        rating: submission.rating,
        status: TestimonialStatus::Pending,
    };
    let stored = shim.insert_validated(testimonial).await?;
    info!(id = %stored.id, rating = stored.rating, "Review submitted for moderation");
    // dropping the handle detaches the send
    drop(notifier.review_received(&stored));
    Ok(stored)
}

/// Approves, rejects, or resets a review to pending.
///
/// A review that no longer exists is a no-op with `matched == 0`.
#[instrument(skip(shim))]
pub async fn moderate_testimonial(
    shim: &DataShim,
    id: &str,
    next: TestimonialStatus,
) -> Result<WriteOutcome> {
    let Some(current) = shim
        .fetch::<Testimonial>()
        .await
        .into_iter()
        .find(|t| t.id == id)
    else {
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
            entity: "testimonial",
            from: current.status.to_string(),
            to: next.to_string(),
        });
    }

    shim.update::<Testimonial>(id, &Patch::new().set("status", next)?)
        .await
}

/// Reviews cleared for the public site, newest first.
pub async fn approved_testimonials(shim: &DataShim) -> Vec<Entry<Testimonial>> {
    shim.fetch::<Testimonial>()
        .await
        .into_iter()
        .filter(|t| t.status == TestimonialStatus::Approved)
        .collect()
}
