use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domains::buddies::models::BuddyWithUser;

/// Directory query string (`?location=&unit=&techStack=&interests=&available=`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuddyDirectoryQuery {
    pub location: Option<String>,
    pub unit: Option<String>,
    pub tech_stack: Option<String>,
    pub interests: Option<String>,
    pub available: Option<String>,
}

/// One directory entry: buddy profile, owner display fields and live load
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuddyListing {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub location: Option<String>,
    pub unit: Option<String>,
    pub tech_stack: Vec<String>,
    pub interests: Vec<String>,
    pub languages: Vec<String>,
    pub max_buddies: i32,
    pub is_available: bool,
    pub experience: Option<String>,
    pub mentoring_style: Option<String>,
    pub availability: Option<String>,
    pub current_buddies: i64,
}

impl BuddyListing {
    pub fn from_buddy(buddy: BuddyWithUser, current_buddies: i64) -> Self {
        let profile = buddy.profile;
        Self {
            id: profile.id,
            user_id: profile.user_id,
            first_name: buddy.first_name,
            last_name: buddy.last_name,
            email: buddy.email,
            location: profile.location,
            unit: profile.unit,
            tech_stack: profile.tech_stack,
            interests: profile.interests,
            languages: buddy.languages,
            max_buddies: profile.max_buddies,
            is_available: profile.is_available,
            experience: profile.experience,
            mentoring_style: profile.mentoring_style,
            availability: profile.availability,
            current_buddies,
        }
    }
}

/// HR dashboard row
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardEntry {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub location: Option<String>,
    pub unit: Option<String>,
    pub max_buddies: i32,
    pub current_buddies: i64,
    pub availability: bool,
    pub utilization_rate: Option<f64>,
}

/// Load and utilization for a single buddy
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityData {
    pub user_id: Uuid,
    pub max_buddies: i32,
    pub current_buddies: i64,
    pub utilization_rate: Option<f64>,
}
