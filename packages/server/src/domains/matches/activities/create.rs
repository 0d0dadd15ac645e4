use sqlx::PgPool;
use tracing::{debug, info};

use super::queries::with_participants_one;
use crate::common::{Actor, Capability, Role};
use crate::domains::buddies::activities::{current_load, has_capacity};
use crate::domains::buddies::models::BuddyProfile;
use crate::domains::matches::data::{CreateMatchInput, MatchData};
use crate::domains::matches::errors::MatchError;
use crate::domains::matches::models::{Match, MatchType};
use crate::domains::notifications::activities::{notify, request_notification};
use crate::domains::users::User;

/// Create a PENDING match request.
///
/// Checks run in a fixed order and the first failure wins: field validation,
/// receiver is a buddy, newcomer is a NEWCOMER, receiver has capacity, no
/// pending request from this sender to this receiver. The receiver's buddy
/// profile row stays locked from the first database check until the insert
/// commits, so concurrent creates for one buddy run one at a time.
pub async fn create_match(
    actor: Actor,
    input: CreateMatchInput,
    pool: &PgPool,
) -> Result<MatchData, MatchError> {
    // Roles that cannot create any type are turned away before validation
    actor.can(Capability::CreatePeerMatch).check()?;

    let new_match = input
        .validate(actor.user_id())
        .map_err(MatchError::Validation)?;

    if new_match.match_type == MatchType::NewcomerMatch {
        actor.can(Capability::CreateNewcomerMatch).check()?;
    }

    if new_match.receiver_id == new_match.sender_id {
        return Err(MatchError::SelfRequest);
    }

    let mut tx = pool.begin().await?;

    let Some(buddy) = BuddyProfile::lock_by_user(new_match.receiver_id, &mut *tx).await? else {
        debug!(receiver_id = %new_match.receiver_id, "Create rejected: receiver has no buddy profile");
        return Err(MatchError::ReceiverNotBuddy);
    };

    if let Some(newcomer_id) = new_match.newcomer_id {
        let newcomer = User::find_by_id(newcomer_id, &mut *tx).await?;
        if !newcomer.is_some_and(|u| u.role == Role::Newcomer) {
            debug!(newcomer_id = %newcomer_id, "Create rejected: newcomer missing or wrong role");
            return Err(MatchError::InvalidNewcomer);
        }
    }

    let load = current_load(new_match.receiver_id, &mut *tx).await?;
    if !has_capacity(load, buddy.max_buddies) {
        debug!(
            receiver_id = %new_match.receiver_id,
            current = load,
            max = buddy.max_buddies,
            "Create rejected: buddy at capacity"
        );
        return Err(MatchError::CapacityReached);
    }

    if Match::find_pending_between(new_match.sender_id, new_match.receiver_id, &mut *tx)
        .await?
        .is_some()
    {
        debug!(
            sender_id = %new_match.sender_id,
            receiver_id = %new_match.receiver_id,
            "Create rejected: pending request already exists"
        );
        return Err(MatchError::DuplicatePending);
    }

    let record = match Match::insert(&new_match, &mut *tx).await {
        Ok(record) => record,
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            return Err(MatchError::DuplicatePending)
        }
        Err(e) => return Err(e.into()),
    };

    let data = with_participants_one(record, &mut *tx).await?;

    tx.commit().await?;

    info!(
        match_id = %data.record.id,
        sender_id = %data.record.sender_id,
        receiver_id = %data.record.receiver_id,
        match_type = %data.record.match_type,
        "Match request created"
    );

    let sender_name = data
        .sender
        .as_ref()
        .map(|s| s.full_name())
        .unwrap_or_else(|| "Someone".to_string());
    let newcomer_name = data.newcomer.as_ref().map(|n| n.full_name());
    notify(
        request_notification(&data.record, &sender_name, newcomer_name.as_deref()),
        pool,
    )
    .await;

    Ok(data)
}
