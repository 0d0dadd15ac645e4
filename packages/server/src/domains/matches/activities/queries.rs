use std::collections::HashMap;

use anyhow::Result;
use sqlx::{PgExecutor, PgPool};
use tracing::debug;
use uuid::Uuid;

use crate::common::{Actor, UserSummary};
use crate::domains::matches::data::{ListMatchesQuery, MatchData};
use crate::domains::matches::errors::{MatchError, NotFoundCause};
use crate::domains::matches::models::Match;
use crate::domains::users::User;

/// Attach sender/receiver/newcomer display fields, one user query for the batch
pub async fn with_participants<'e>(
    records: Vec<Match>,
    executor: impl PgExecutor<'e>,
) -> Result<Vec<MatchData>> {
    let mut ids: Vec<Uuid> = records
        .iter()
        .flat_map(|m| [Some(m.sender_id), Some(m.receiver_id), m.newcomer_id])
        .flatten()
        .collect();
    ids.sort_unstable();
    ids.dedup();

    let users: HashMap<Uuid, UserSummary> = User::find_summaries(&ids, executor)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    Ok(records
        .into_iter()
        .map(|m| MatchData::assemble(m, &users))
        .collect())
}

/// Lifecycle writes call this on their transaction, before commit
pub async fn with_participants_one<'e>(
    record: Match,
    executor: impl PgExecutor<'e>,
) -> Result<MatchData> {
    let mut data = with_participants(vec![record], executor).await?;
    data.pop()
        .ok_or_else(|| anyhow::anyhow!("participant lookup returned no rows"))
}

/// Log the internal cause, return the caller-facing collapsed error
pub(crate) fn not_found(match_id: Uuid, user_id: Uuid, cause: NotFoundCause) -> MatchError {
    debug!(match_id = %match_id, user_id = %user_id, cause = ?cause, "Match not found for caller");
    MatchError::NotFound(cause)
}

/// Matches where the caller is sender or receiver, newest first
pub async fn list_matches(
    actor: Actor,
    query: &ListMatchesQuery,
    pool: &PgPool,
) -> Result<Vec<MatchData>, MatchError> {
    let (status, match_type) = query.validate().map_err(MatchError::Validation)?;

    let records = Match::find_for_user(actor.user_id(), status, match_type, pool).await?;
    Ok(with_participants(records, pool).await?)
}

/// A single match, visible only to its sender and receiver
pub async fn get_match(actor: Actor, match_id: Uuid, pool: &PgPool) -> Result<MatchData, MatchError> {
    let record = Match::find_by_id(match_id, pool)
        .await?
        .ok_or_else(|| not_found(match_id, actor.user_id(), NotFoundCause::Missing))?;

    if !record.involves(actor.user_id()) {
        return Err(not_found(match_id, actor.user_id(), NotFoundCause::NotParticipant));
    }

    Ok(with_participants_one(record, pool).await?)
}
