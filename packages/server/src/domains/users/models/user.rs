use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::common::{Role, UserSummary};

/// User model - identity plus role
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl User {
    pub async fn find_by_id<'e>(id: Uuid, executor: impl PgExecutor<'e>) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE lower(email) = lower($1)")
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Display fields for a batch of users (missing ids are skipped)
    pub async fn find_summaries<'e>(
        ids: &[Uuid],
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<UserSummary>> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT id, first_name, last_name, email FROM users WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(executor)
        .await
        .map_err(Into::into)
    }

    pub async fn create(input: CreateUser, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO users (email, first_name, last_name, role)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(&input.email)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(input.role)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Deactivate or reactivate a user (inactive users drop out of the directory)
    pub async fn set_active(id: Uuid, active: bool, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("UPDATE users SET is_active = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(active)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
