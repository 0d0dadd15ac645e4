//! Feedback activities

use sqlx::PgPool;
use tracing::{debug, info};

use crate::common::{Actor, Capability};
use crate::domains::feedback::data::{FeedbackStats, SubmitFeedbackInput};
use crate::domains::feedback::errors::FeedbackError;
use crate::domains::feedback::models::Feedback;
use crate::domains::matches::models::{Match, MatchStatus};

/// Rate a match the caller took part in (sender, receiver or attached newcomer)
pub async fn submit_feedback(
    actor: Actor,
    input: SubmitFeedbackInput,
    pool: &PgPool,
) -> Result<Feedback, FeedbackError> {
    let new_feedback = input
        .validate(actor.user_id())
        .map_err(FeedbackError::Validation)?;

    let record = Match::find_by_id(new_feedback.match_id, pool)
        .await?
        .filter(|m| m.involves(actor.user_id()) || m.newcomer_id == Some(actor.user_id()))
        .ok_or_else(|| {
            debug!(match_id = %new_feedback.match_id, user_id = %actor.user_id(), "Feedback rejected: match not visible");
            FeedbackError::MatchNotFound
        })?;

    if !matches!(record.status, MatchStatus::Accepted | MatchStatus::Completed) {
        return Err(FeedbackError::NotEligible);
    }

    let feedback = match Feedback::insert(&new_feedback, pool).await {
        Ok(feedback) => feedback,
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            return Err(FeedbackError::AlreadySubmitted)
        }
        Err(e) => return Err(e.into()),
    };

    info!(
        feedback_id = %feedback.id,
        match_id = %feedback.match_id,
        user_id = %feedback.user_id,
        rating = feedback.rating,
        "Feedback submitted"
    );

    Ok(feedback)
}

/// Aggregate ratings for HR reporting
pub async fn feedback_stats(actor: Actor, pool: &PgPool) -> Result<FeedbackStats, FeedbackError> {
    actor.can(Capability::ViewFeedbackStats).check()?;

    Ok(Feedback::averages(pool).await?.into())
}
