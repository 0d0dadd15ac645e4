use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// One participant's rating of a match. Unique per (match, user).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: Uuid,
    pub match_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub helpfulness: Option<i32>,
    pub communication: Option<i32>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedback {
    pub match_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub helpfulness: Option<i32>,
    pub communication: Option<i32>,
    pub comment: Option<String>,
}

/// Raw aggregate row; averages are NULL when nothing has been rated
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FeedbackAverages {
    pub total: i64,
    pub avg_rating: Option<f64>,
    pub avg_helpfulness: Option<f64>,
    pub avg_communication: Option<f64>,
}

impl Feedback {
    /// Insert feedback. The raw sqlx error is returned so the caller can
    /// recognise the one-per-(match, user) unique violation.
    pub async fn insert(input: &NewFeedback, pool: &PgPool) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO feedback (match_id, user_id, rating, helpfulness, communication, comment)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(input.match_id)
        .bind(input.user_id)
        .bind(input.rating)
        .bind(input.helpfulness)
        .bind(input.communication)
        .bind(&input.comment)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_match_and_user(
        match_id: Uuid,
        user_id: Uuid,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM feedback WHERE match_id = $1 AND user_id = $2")
            .bind(match_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn averages(pool: &PgPool) -> Result<FeedbackAverages> {
        sqlx::query_as::<_, FeedbackAverages>(
            "SELECT COUNT(*) AS total,
                    AVG(rating)::float8 AS avg_rating,
                    AVG(helpfulness)::float8 AS avg_helpfulness,
                    AVG(communication)::float8 AS avg_communication
             FROM feedback",
        )
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
