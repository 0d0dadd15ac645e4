use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgExecutor, PgPool};
use uuid::Uuid;

use crate::common::Role;
use crate::domains::users::User;

/// Mentor extension of a BUDDY user. At most one per user.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuddyProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub location: Option<String>,
    pub unit: Option<String>,
    pub tech_stack: Vec<String>,
    pub interests: Vec<String>,
    pub max_buddies: i32,
    pub is_available: bool,
    pub experience: Option<String>,
    pub mentoring_style: Option<String>,
    pub availability: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a buddy profile
#[derive(Debug, Clone)]
pub struct CreateBuddyProfile {
    pub location: Option<String>,
    pub unit: Option<String>,
    pub tech_stack: Vec<String>,
    pub interests: Vec<String>,
    pub max_buddies: i32,
    pub is_available: bool,
    pub experience: Option<String>,
    pub mentoring_style: Option<String>,
    pub availability: Option<String>,
}

impl Default for CreateBuddyProfile {
    fn default() -> Self {
        Self {
            location: None,
            unit: None,
            tech_stack: Vec::new(),
            interests: Vec::new(),
            max_buddies: 3,
            is_available: true,
            experience: None,
            mentoring_style: None,
            availability: None,
        }
    }
}

/// Buddy profile joined with its owner's display fields and languages
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct BuddyWithUser {
    #[sqlx(flatten)]
    pub profile: BuddyProfile,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub languages: Vec<String>,
}

impl BuddyWithUser {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

const BUDDY_WITH_USER_SELECT: &str = "
    SELECT b.*, u.first_name, u.last_name, u.email,
           COALESCE(p.languages, '{}') AS languages
    FROM buddy_profiles b
    JOIN users u ON u.id = b.user_id
    LEFT JOIN profiles p ON p.user_id = b.user_id
    WHERE u.is_active = true";

impl BuddyProfile {
    pub async fn find_by_user<'e>(
        user_id: Uuid,
        executor: impl PgExecutor<'e>,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM buddy_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(executor)
            .await
            .map_err(Into::into)
    }

    /// Row-lock the buddy's profile for the rest of the transaction.
    ///
    /// Every operation that counts accepted matches and then writes a match
    /// for this buddy takes this lock first, so count-then-write sequences
    /// for the same buddy are serialized.
    pub async fn lock_by_user(user_id: Uuid, conn: &mut PgConnection) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM buddy_profiles WHERE user_id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(conn)
            .await
            .map_err(Into::into)
    }

    /// Create the buddy profile for a BUDDY user
    pub async fn create(user_id: Uuid, input: CreateBuddyProfile, pool: &PgPool) -> Result<Self> {
        if input.max_buddies < 1 {
            bail!("max_buddies must be at least 1");
        }

        let mut tx = pool.begin().await?;

        let user = User::find_by_id(user_id, &mut *tx).await?;
        match user {
            Some(user) if user.role == Role::Buddy => {}
            Some(_) => bail!("buddy profiles can only be attached to BUDDY users"),
            None => bail!("user {} not found", user_id),
        }

        let profile = sqlx::query_as::<_, Self>(
            "INSERT INTO buddy_profiles (
                user_id, location, unit, tech_stack, interests, max_buddies,
                is_available, experience, mentoring_style, availability
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(user_id)
        .bind(&input.location)
        .bind(&input.unit)
        .bind(&input.tech_stack)
        .bind(&input.interests)
        .bind(input.max_buddies)
        .bind(input.is_available)
        .bind(&input.experience)
        .bind(&input.mentoring_style)
        .bind(&input.availability)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(profile)
    }

    /// Change the capacity limit. Lowering it below the current load is allowed.
    pub async fn set_max_buddies(user_id: Uuid, max_buddies: i32, pool: &PgPool) -> Result<Self> {
        if max_buddies < 1 {
            bail!("max_buddies must be at least 1");
        }

        sqlx::query_as::<_, Self>(
            "UPDATE buddy_profiles SET max_buddies = $2, updated_at = NOW()
             WHERE user_id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(max_buddies)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn set_available(user_id: Uuid, is_available: bool, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE buddy_profiles SET is_available = $2, updated_at = NOW()
             WHERE user_id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(is_available)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// All buddies owned by active users, with display fields
    pub async fn find_all_with_users(pool: &PgPool) -> Result<Vec<BuddyWithUser>> {
        let sql = format!("{} ORDER BY u.last_name, u.first_name", BUDDY_WITH_USER_SELECT);
        sqlx::query_as::<_, BuddyWithUser>(&sql)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Available buddies owned by active users (the AI candidate pool)
    pub async fn find_available_with_users(pool: &PgPool) -> Result<Vec<BuddyWithUser>> {
        let sql = format!(
            "{} AND b.is_available = true ORDER BY u.last_name, u.first_name",
            BUDDY_WITH_USER_SELECT
        );
        sqlx::query_as::<_, BuddyWithUser>(&sql)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}
