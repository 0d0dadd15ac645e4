use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::queries::{not_found, with_participants_one};
use crate::common::Actor;
use crate::domains::matches::data::MatchData;
use crate::domains::matches::errors::{MatchError, NotFoundCause};
use crate::domains::matches::models::{Match, MatchStatus};
use crate::domains::notifications::activities::{completion_notification, notify};
use crate::domains::users::User;

/// ACCEPTED -> COMPLETED, by HR or either participant
pub async fn complete_match(
    actor: Actor,
    match_id: Uuid,
    pool: &PgPool,
) -> Result<MatchData, MatchError> {
    let caller_id = actor.user_id();

    let mut tx = pool.begin().await?;

    let record = match Match::lock_by_id(match_id, &mut *tx).await? {
        None => return Err(not_found(match_id, caller_id, NotFoundCause::Missing)),
        Some(m) if !actor.role().is_hr() && !m.involves(caller_id) => {
            return Err(not_found(match_id, caller_id, NotFoundCause::NotParticipant))
        }
        Some(m) if m.status != MatchStatus::Accepted => {
            return Err(not_found(match_id, caller_id, NotFoundCause::WrongState))
        }
        Some(m) => m,
    };

    let updated = Match::mark_completed(record.id, &mut *tx)
        .await?
        .ok_or_else(|| not_found(match_id, caller_id, NotFoundCause::WrongState))?;

    let data = with_participants_one(updated, &mut *tx).await?;
    let completer_name = User::find_by_id(caller_id, &mut *tx)
        .await?
        .map(|user| user.full_name())
        .unwrap_or_else(|| "HR".to_string());

    tx.commit().await?;

    info!(
        match_id = %data.record.id,
        sender_id = %data.record.sender_id,
        receiver_id = %data.record.receiver_id,
        completed_by = %caller_id,
        "Match completed"
    );

    // HR completing someone else's match informs both participants
    let recipients = if data.record.involves(caller_id) {
        vec![data.record.counterpart_of(caller_id)]
    } else {
        vec![data.record.sender_id, data.record.receiver_id]
    };
    for recipient in recipients {
        notify(
            completion_notification(&data.record, recipient, &completer_name),
            pool,
        )
        .await;
    }

    Ok(data)
}
