use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{PgConnection, PgExecutor, PgPool};
use uuid::Uuid;

crate::text_enum! {
    /// Kind of connection a match represents
    pub enum MatchType {
        /// HR placing a newcomer with a buddy
        NewcomerMatch => "NEWCOMER_MATCH",
        RelocationSupport => "RELOCATION_SUPPORT",
        OfficeConnection => "OFFICE_CONNECTION",
    }
}

impl MatchType {
    /// Peer-to-peer types may be requested by buddies as well as HR
    pub fn is_peer(&self) -> bool {
        !matches!(self, MatchType::NewcomerMatch)
    }
}

crate::text_enum! {
    /// PENDING -> ACCEPTED | REJECTED, ACCEPTED -> COMPLETED
    pub enum MatchStatus {
        Pending => "PENDING",
        Accepted => "ACCEPTED",
        Rejected => "REJECTED",
        Completed => "COMPLETED",
    }
}

impl MatchStatus {
    /// Valid targets for a receiver's response
    pub fn is_response(&self) -> bool {
        matches!(self, MatchStatus::Accepted | MatchStatus::Rejected)
    }
}

/// A request linking a sender to a buddy receiver, optionally on behalf of a newcomer.
///
/// Status is only ever written by the lifecycle activities in
/// `domains::matches::activities`.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub newcomer_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub match_type: MatchType,
    pub status: MatchStatus,
    pub message: Option<String>,
    pub response_message: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Validated insert payload
#[derive(Debug, Clone)]
pub struct NewMatch {
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub newcomer_id: Option<Uuid>,
    pub match_type: MatchType,
    pub message: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl Match {
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }

    /// The participant on the other side from `user_id`
    pub fn counterpart_of(&self, user_id: Uuid) -> Uuid {
        if self.sender_id == user_id {
            self.receiver_id
        } else {
            self.sender_id
        }
    }

    pub async fn find_by_id<'e>(id: Uuid, executor: impl PgExecutor<'e>) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM matches WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(Into::into)
    }

    /// Row-lock a match for the rest of the transaction
    pub async fn lock_by_id(id: Uuid, conn: &mut PgConnection) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM matches WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(Into::into)
    }

    pub async fn find_pending_between(
        sender_id: Uuid,
        receiver_id: Uuid,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM matches
             WHERE sender_id = $1 AND receiver_id = $2 AND status = 'PENDING'
             LIMIT 1",
        )
        .bind(sender_id)
        .bind(receiver_id)
        .fetch_optional(conn)
        .await
        .map_err(Into::into)
    }

    /// Insert a PENDING match.
    ///
    /// Returns the raw sqlx error so callers can recognise the
    /// one-pending-per-pair unique violation.
    pub async fn insert(input: &NewMatch, conn: &mut PgConnection) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO matches (
                sender_id, receiver_id, newcomer_id, match_type, status,
                message, start_date, end_date
             )
             VALUES ($1, $2, $3, $4, 'PENDING', $5, $6, $7)
             RETURNING *",
        )
        .bind(input.sender_id)
        .bind(input.receiver_id)
        .bind(input.newcomer_id)
        .bind(input.match_type)
        .bind(&input.message)
        .bind(input.start_date)
        .bind(input.end_date)
        .fetch_one(conn)
        .await
    }

    /// Record the receiver's response. Only PENDING rows are touched.
    pub async fn record_response(
        id: Uuid,
        status: MatchStatus,
        response_message: Option<&str>,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE matches
             SET status = $2, response_message = $3, responded_at = NOW()
             WHERE id = $1 AND status = 'PENDING'
             RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(response_message)
        .fetch_optional(conn)
        .await
        .map_err(Into::into)
    }

    /// ACCEPTED -> COMPLETED. Only ACCEPTED rows are touched.
    pub async fn mark_completed(id: Uuid, conn: &mut PgConnection) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE matches
             SET status = 'COMPLETED', completed_at = NOW()
             WHERE id = $1 AND status = 'ACCEPTED'
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(Into::into)
    }

    /// Matches where the user is sender or receiver, newest first
    pub async fn find_for_user(
        user_id: Uuid,
        status: Option<MatchStatus>,
        match_type: Option<MatchType>,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM matches
             WHERE (sender_id = $1 OR receiver_id = $1)
               AND ($2::text IS NULL OR status = $2)
               AND ($3::text IS NULL OR match_type = $3)
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .bind(status.map(|s| s.as_str()))
        .bind(match_type.map(|t| t.as_str()))
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
