use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

crate::text_enum! {
    pub enum NotificationKind {
        MatchRequest => "MATCH_REQUEST",
        MatchAccepted => "MATCH_ACCEPTED",
        MatchRejected => "MATCH_REJECTED",
        MatchCompleted => "MATCH_COMPLETED",
    }
}

/// Notification record - a match transition addressed to one user
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub match_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub match_id: Option<Uuid>,
}

impl Notification {
    pub async fn record(input: &NewNotification, pool: &PgPool) -> Result<Self> {
        let notification = sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (user_id, kind, title, body, match_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(input.user_id)
        .bind(input.kind)
        .bind(&input.title)
        .bind(&input.body)
        .bind(input.match_id)
        .fetch_one(pool)
        .await?;

        Ok(notification)
    }

    /// Notifications for a user, newest first
    pub async fn find_for_user(user_id: Uuid, unread_only: bool, pool: &PgPool) -> Result<Vec<Self>> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications
             WHERE user_id = $1 AND (NOT $2 OR is_read = false)
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .bind(unread_only)
        .fetch_all(pool)
        .await?;

        Ok(notifications)
    }

    /// Mark one of the user's own notifications read. `None` if it is not theirs.
    pub async fn mark_read(id: Uuid, user_id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        let notification = sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET is_read = true
             WHERE id = $1 AND user_id = $2
             RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(notification)
    }

    pub async fn find_by_match(match_id: Uuid, pool: &PgPool) -> Result<Vec<Self>> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE match_id = $1 ORDER BY created_at",
        )
        .bind(match_id)
        .fetch_all(pool)
        .await?;

        Ok(notifications)
    }
}
