//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly. Every user gets a unique
//! email so tests sharing the database never collide.

use anyhow::Result;
use server_core::common::{Actor, Role};
use server_core::domains::buddies::models::{BuddyProfile, CreateBuddyProfile};
use server_core::domains::matches::activities::create_match;
use server_core::domains::matches::{CreateMatchInput, MatchData, MatchType};
use server_core::domains::users::{CreateUser, Profile, UpsertProfile, User};
use sqlx::PgPool;
use uuid::Uuid;

/// Create an active user with the given role
pub async fn create_user(pool: &PgPool, role: Role) -> Result<User> {
    let tag = Uuid::new_v4().simple().to_string();
    User::create(
        CreateUser {
            email: format!("{}-{}@example.com", role.as_str().to_lowercase(), &tag[..12]),
            first_name: role.as_str().to_string(),
            last_name: tag[..6].to_string(),
            role,
        },
        pool,
    )
    .await
}

/// Create a BUDDY user with a buddy profile
pub async fn create_buddy(pool: &PgPool, profile: CreateBuddyProfile) -> Result<User> {
    let user = create_user(pool, Role::Buddy).await?;
    BuddyProfile::create(user.id, profile, pool).await?;
    Ok(user)
}

/// Buddy with the given capacity and otherwise default profile
pub async fn create_buddy_with_capacity(pool: &PgPool, max_buddies: i32) -> Result<User> {
    create_buddy(
        pool,
        CreateBuddyProfile {
            max_buddies,
            ..Default::default()
        },
    )
    .await
}

/// NEWCOMER user with a profile complete enough for AI suggestions
pub async fn create_newcomer_with_profile(pool: &PgPool) -> Result<User> {
    let user = create_user(pool, Role::Newcomer).await?;
    Profile::upsert(
        user.id,
        UpsertProfile {
            department: Some("Engineering".to_string()),
            location: Some("Berlin".to_string()),
            interests: vec!["climbing".to_string()],
            ..Default::default()
        },
        pool,
    )
    .await?;
    Ok(user)
}

pub fn actor(user: &User) -> Actor {
    Actor::new(user.id, user.role)
}

pub fn create_input(receiver: &User, match_type: MatchType) -> CreateMatchInput {
    CreateMatchInput {
        receiver_id: Some(receiver.id.to_string()),
        match_type: Some(match_type.as_str().to_string()),
        ..Default::default()
    }
}

/// PENDING NEWCOMER_MATCH from `hr` to `buddy` about `newcomer`
pub async fn create_pending_match(
    pool: &PgPool,
    hr: &User,
    buddy: &User,
    newcomer: &User,
) -> Result<MatchData> {
    let input = CreateMatchInput {
        newcomer_id: Some(newcomer.id.to_string()),
        message: Some("Could you show them around?".to_string()),
        ..create_input(buddy, MatchType::NewcomerMatch)
    };
    Ok(create_match(actor(hr), input, pool).await?)
}
