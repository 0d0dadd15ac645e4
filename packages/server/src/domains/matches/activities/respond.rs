use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use super::queries::{not_found, with_participants_one};
use crate::common::{Actor, Capability};
use crate::domains::buddies::activities::{current_load, has_capacity};
use crate::domains::buddies::models::BuddyProfile;
use crate::domains::matches::data::{MatchData, RespondInput};
use crate::domains::matches::errors::{MatchError, NotFoundCause};
use crate::domains::matches::models::{Match, MatchStatus};
use crate::domains::notifications::activities::{notify, response_notification};

/// Receiver accepts or rejects a PENDING match. Succeeds at most once per match.
///
/// Missing match, wrong receiver and already-responded all return the same
/// `NotFound`. Accepting re-checks capacity under the buddy profile row lock;
/// running out of capacity is reported as `CapacityReached`.
pub async fn respond_to_match(
    actor: Actor,
    match_id: Uuid,
    input: RespondInput,
    pool: &PgPool,
) -> Result<MatchData, MatchError> {
    actor.can(Capability::RespondToMatch).check()?;

    let (status, message) = input.validate().map_err(MatchError::Validation)?;
    let responder_id = actor.user_id();

    let mut tx = pool.begin().await?;

    let record = match Match::lock_by_id(match_id, &mut *tx).await? {
        None => return Err(not_found(match_id, responder_id, NotFoundCause::Missing)),
        Some(m) if m.receiver_id != responder_id => {
            return Err(not_found(match_id, responder_id, NotFoundCause::NotReceiver))
        }
        Some(m) if m.status != MatchStatus::Pending => {
            return Err(not_found(match_id, responder_id, NotFoundCause::WrongState))
        }
        Some(m) => m,
    };

    if status == MatchStatus::Accepted {
        // A buddy profile removed since creation leaves no capacity
        let max_buddies = BuddyProfile::lock_by_user(record.receiver_id, &mut *tx)
            .await?
            .map(|b| b.max_buddies)
            .unwrap_or(0);

        let load = current_load(record.receiver_id, &mut *tx).await?;
        if !has_capacity(load, max_buddies) {
            debug!(
                match_id = %match_id,
                receiver_id = %record.receiver_id,
                current = load,
                max = max_buddies,
                "Accept rejected: buddy at capacity"
            );
            return Err(MatchError::CapacityReached);
        }
    }

    let updated = Match::record_response(match_id, status, message.as_deref(), &mut *tx)
        .await?
        .ok_or_else(|| not_found(match_id, responder_id, NotFoundCause::WrongState))?;

    let data = with_participants_one(updated, &mut *tx).await?;

    tx.commit().await?;

    info!(
        match_id = %data.record.id,
        sender_id = %data.record.sender_id,
        receiver_id = %data.record.receiver_id,
        status = %data.record.status,
        "Match response recorded"
    );

    let receiver_name = data
        .receiver
        .as_ref()
        .map(|r| r.full_name())
        .unwrap_or_else(|| "Your buddy".to_string());
    notify(response_notification(&data.record, &receiver_name), pool).await;

    Ok(data)
}
