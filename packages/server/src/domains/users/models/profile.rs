use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Free-form descriptive attributes attached 1:1 to a user. Optional.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: Uuid,
    pub department: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub interests: Vec<String>,
    pub languages: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub timezone: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating or replacing a profile
#[derive(Debug, Clone, Default)]
pub struct UpsertProfile {
    pub department: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub interests: Vec<String>,
    pub languages: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub timezone: Option<String>,
}

impl Profile {
    pub async fn find_by_user(user_id: Uuid, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn upsert(user_id: Uuid, input: UpsertProfile, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO profiles (user_id, department, position, location, bio, interests, languages, start_date, timezone)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             ON CONFLICT (user_id) DO UPDATE SET
                department = EXCLUDED.department,
                position = EXCLUDED.position,
                location = EXCLUDED.location,
                bio = EXCLUDED.bio,
                interests = EXCLUDED.interests,
                languages = EXCLUDED.languages,
                start_date = EXCLUDED.start_date,
                timezone = EXCLUDED.timezone,
                updated_at = NOW()
             RETURNING *",
        )
        .bind(user_id)
        .bind(&input.department)
        .bind(&input.position)
        .bind(&input.location)
        .bind(&input.bio)
        .bind(&input.interests)
        .bind(&input.languages)
        .bind(input.start_date)
        .bind(&input.timezone)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Enough information to rank buddies against: at least one of
    /// department, position, location or interests.
    pub fn is_complete_for_matching(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());

        filled(&self.department)
            || filled(&self.position)
            || filled(&self.location)
            || self.interests.iter().any(|i| !i.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_profile() -> Profile {
        Profile {
            user_id: Uuid::new_v4(),
            department: None,
            position: None,
            location: None,
            bio: Some("Hello".to_string()),
            interests: vec![],
            languages: vec!["English".to_string()],
            start_date: None,
            timezone: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_bio_and_languages_alone_are_incomplete() {
        assert!(!empty_profile().is_complete_for_matching());
    }

    #[test]
    fn test_blank_strings_do_not_count() {
        let mut profile = empty_profile();
        profile.department = Some("   ".to_string());
        profile.interests = vec!["".to_string()];
        assert!(!profile.is_complete_for_matching());
    }

    #[test]
    fn test_any_matching_field_completes() {
        let mut profile = empty_profile();
        profile.interests = vec!["climbing".to_string()];
        assert!(profile.is_complete_for_matching());

        let mut profile = empty_profile();
        profile.position = Some("Backend Engineer".to_string());
        assert!(profile.is_complete_for_matching());
    }
}
