//! Buddy directory search and the HR utilization dashboard

use anyhow::Result;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::capacity::{current_loads, utilization};
use crate::domains::buddies::data::{BuddyDirectoryQuery, BuddyListing, DashboardEntry};
use crate::domains::buddies::models::{BuddyProfile, BuddyWithUser};

/// Parsed directory filters. All supplied filters must hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuddyFilter {
    /// Case-insensitive substring of the buddy's location
    pub location: Option<String>,
    /// Case-insensitive substring of the buddy's unit
    pub unit: Option<String>,
    /// Any tech-stack entry must equal (case-insensitively) any of these
    pub tech_stack: Vec<String>,
    /// Any interest must equal (case-insensitively) any of these
    pub interests: Vec<String>,
    /// Only buddies flagged available
    pub available_only: bool,
}

impl From<&BuddyDirectoryQuery> for BuddyFilter {
    fn from(query: &BuddyDirectoryQuery) -> Self {
        Self {
            location: lowered(query.location.as_deref()),
            unit: lowered(query.unit.as_deref()),
            tech_stack: split_terms(query.tech_stack.as_deref()),
            interests: split_terms(query.interests.as_deref()),
            available_only: query.available.as_deref() == Some("true"),
        }
    }
}

impl BuddyFilter {
    pub fn matches(&self, profile: &BuddyProfile) -> bool {
        if self.available_only && !profile.is_available {
            return false;
        }
        if let Some(needle) = &self.location {
            if !contains_ci(profile.location.as_deref(), needle) {
                return false;
            }
        }
        if let Some(needle) = &self.unit {
            if !contains_ci(profile.unit.as_deref(), needle) {
                return false;
            }
        }
        if !self.tech_stack.is_empty() && !any_equal_ci(&profile.tech_stack, &self.tech_stack) {
            return false;
        }
        if !self.interests.is_empty() && !any_equal_ci(&profile.interests, &self.interests) {
            return false;
        }
        true
    }
}

fn lowered(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

/// Comma-separated terms, trimmed and lower-cased, blanks dropped
fn split_terms(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn contains_ci(haystack: Option<&str>, lowered_needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(lowered_needle))
}

fn any_equal_ci(values: &[String], lowered_terms: &[String]) -> bool {
    values
        .iter()
        .any(|v| lowered_terms.iter().any(|t| v.trim().to_lowercase() == *t))
}

/// Directory search for `requester_id`, who never appears in their own results.
pub async fn search_directory(
    query: &BuddyDirectoryQuery,
    requester_id: Uuid,
    pool: &PgPool,
) -> Result<Vec<BuddyListing>> {
    let filter = BuddyFilter::from(query);

    let candidates: Vec<BuddyWithUser> = BuddyProfile::find_all_with_users(pool)
        .await?
        .into_iter()
        .filter(|b| b.profile.user_id != requester_id)
        .filter(|b| filter.matches(&b.profile))
        .collect();

    let ids: Vec<Uuid> = candidates.iter().map(|b| b.profile.user_id).collect();
    let loads = current_loads(&ids, pool).await?;

    debug!(results = candidates.len(), filter = ?filter, "Buddy directory search");

    Ok(candidates
        .into_iter()
        .map(|b| {
            let load = loads.get(&b.profile.user_id).copied().unwrap_or(0);
            BuddyListing::from_buddy(b, load)
        })
        .collect())
}

/// Per-buddy load and utilization for HR
pub async fn dashboard(pool: &PgPool) -> Result<Vec<DashboardEntry>> {
    let buddies = BuddyProfile::find_all_with_users(pool).await?;
    let ids: Vec<Uuid> = buddies.iter().map(|b| b.profile.user_id).collect();
    let loads = current_loads(&ids, pool).await?;

    Ok(buddies
        .into_iter()
        .map(|b| {
            let load = loads.get(&b.profile.user_id).copied().unwrap_or(0);
            DashboardEntry {
                user_id: b.profile.user_id,
                name: b.full_name(),
                email: b.email,
                location: b.profile.location,
                unit: b.profile.unit,
                max_buddies: b.profile.max_buddies,
                current_buddies: load,
                availability: b.profile.is_available,
                utilization_rate: utilization(load, b.profile.max_buddies),
            }
        })
        .collect())
}
