//! Capacity ledger
//!
//! A buddy's load is the number of ACCEPTED matches where they are the
//! receiver. It is always counted from the matches table; nothing caches it.

use std::collections::HashMap;

use anyhow::Result;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::common::round2;
use crate::domains::buddies::data::CapacityData;
use crate::domains::buddies::models::BuddyProfile;

/// Accepted matches currently held by a buddy.
pub async fn current_load<'e>(buddy_user_id: Uuid, executor: impl PgExecutor<'e>) -> Result<i64> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM matches WHERE receiver_id = $1 AND status = 'ACCEPTED'",
    )
    .bind(buddy_user_id)
    .fetch_one(executor)
    .await?;

    Ok(count)
}

/// Accepted-match counts for many buddies in one query.
/// Buddies with no accepted matches are present with a count of zero.
pub async fn current_loads(buddy_user_ids: &[Uuid], pool: &PgPool) -> Result<HashMap<Uuid, i64>> {
    let rows: Vec<(Uuid, i64)> = sqlx::query_as(
        "SELECT receiver_id, COUNT(*) FROM matches
         WHERE receiver_id = ANY($1) AND status = 'ACCEPTED'
         GROUP BY receiver_id",
    )
    .bind(buddy_user_ids)
    .fetch_all(pool)
    .await?;

    let mut loads: HashMap<Uuid, i64> = buddy_user_ids.iter().map(|id| (*id, 0)).collect();
    loads.extend(rows);
    Ok(loads)
}

/// Utilization percentage, rounded to two decimals.
///
/// Not clamped: lowering `max_buddies` below the current load reports more
/// than 100. Returns `None` when `max_buddies` is not positive.
pub fn utilization(accepted: i64, max_buddies: i32) -> Option<f64> {
    if max_buddies <= 0 {
        return None;
    }
    Some(round2(accepted as f64 * 100.0 / max_buddies as f64))
}

/// Whether one more match may move into ACCEPTED.
pub fn has_capacity(accepted: i64, max_buddies: i32) -> bool {
    accepted < i64::from(max_buddies)
}

/// Load and utilization for one buddy, or `None` if the user has no buddy profile.
pub async fn capacity_for(buddy_user_id: Uuid, pool: &PgPool) -> Result<Option<CapacityData>> {
    let Some(profile) = BuddyProfile::find_by_user(buddy_user_id, pool).await? else {
        return Ok(None);
    };

    let load = current_load(buddy_user_id, pool).await?;

    Ok(Some(CapacityData {
        user_id: buddy_user_id,
        max_buddies: profile.max_buddies,
        current_buddies: load,
        utilization_rate: utilization(load, profile.max_buddies),
    }))
}
