//! Ranking prompt construction

use ai_client::{CompletionRequest, Message};
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::domains::buddies::models::BuddyWithUser;
use crate::domains::users::{Profile, User};

/// Newcomer fields the ranking is based on.
///
/// Also the cache key input: any change here produces a fresh ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewcomerSnapshot {
    pub id: Uuid,
    pub name: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub interests: Vec<String>,
    pub languages: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub timezone: Option<String>,
}

impl NewcomerSnapshot {
    pub fn new(user: &User, profile: &Profile) -> Self {
        Self {
            id: user.id,
            name: user.full_name(),
            department: profile.department.clone(),
            position: profile.position.clone(),
            location: profile.location.clone(),
            bio: profile.bio.clone(),
            interests: profile.interests.clone(),
            languages: profile.languages.clone(),
            start_date: profile.start_date,
            timezone: profile.timezone.clone(),
        }
    }
}

/// Compact buddy record offered to the provider
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub unit: Option<String>,
    pub tech_stack: Vec<String>,
    pub interests: Vec<String>,
    pub experience: Option<String>,
    pub languages: Vec<String>,
}

impl Candidate {
    /// One-line description shown next to a suggestion
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(unit) = self.unit.as_deref().filter(|u| !u.is_empty()) {
            parts.push(unit.to_string());
        }
        if let Some(location) = self.location.as_deref().filter(|l| !l.is_empty()) {
            parts.push(location.to_string());
        }
        if !self.tech_stack.is_empty() {
            parts.push(format!("Tech: {}", self.tech_stack.join(", ")));
        }
        if !self.interests.is_empty() {
            parts.push(format!("Interests: {}", self.interests.join(", ")));
        }
        parts.join(" | ")
    }
}

impl From<&BuddyWithUser> for Candidate {
    fn from(buddy: &BuddyWithUser) -> Self {
        Self {
            id: buddy.profile.user_id,
            name: buddy.full_name(),
            location: buddy.profile.location.clone(),
            unit: buddy.profile.unit.clone(),
            tech_stack: buddy.profile.tech_stack.clone(),
            interests: buddy.profile.interests.clone(),
            experience: buddy.profile.experience.clone(),
            languages: buddy.languages.clone(),
        }
    }
}

const SYSTEM_PROMPT: &str = "You are an onboarding assistant that matches new employees with \
experienced buddy mentors. Judge compatibility from location, team, technical background, \
interests and languages. Respond with JSON only.";

fn render_list(values: &[String]) -> String {
    if values.is_empty() {
        "none".to_string()
    } else {
        values.join(", ")
    }
}

fn render_opt(value: &Option<String>) -> &str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or("unknown")
}

/// Newcomer profile plus every candidate, asking for a scored JSON list
pub fn build_request(newcomer: &NewcomerSnapshot, candidates: &[Candidate]) -> CompletionRequest {
    let mut prompt = String::new();

    prompt.push_str("## Newcomer\n");
    prompt.push_str(&format!("Name: {}\n", newcomer.name));
    prompt.push_str(&format!("Department: {}\n", render_opt(&newcomer.department)));
    prompt.push_str(&format!("Position: {}\n", render_opt(&newcomer.position)));
    prompt.push_str(&format!("Location: {}\n", render_opt(&newcomer.location)));
    prompt.push_str(&format!("Interests: {}\n", render_list(&newcomer.interests)));
    prompt.push_str(&format!("Languages: {}\n", render_list(&newcomer.languages)));
    if let Some(bio) = newcomer.bio.as_deref().filter(|b| !b.is_empty()) {
        prompt.push_str(&format!("Bio: {}\n", bio));
    }

    prompt.push_str("\n## Candidate buddies\n");
    for candidate in candidates {
        prompt.push_str(&format!(
            "- id: {} | name: {} | location: {} | unit: {} | tech: {} | interests: {} | experience: {} | languages: {}\n",
            candidate.id,
            candidate.name,
            render_opt(&candidate.location),
            render_opt(&candidate.unit),
            render_list(&candidate.tech_stack),
            render_list(&candidate.interests),
            render_opt(&candidate.experience),
            render_list(&candidate.languages),
        ));
    }

    prompt.push_str(
        "\nScore every candidate from 0.0 (poor fit) to 1.0 (ideal fit). Use only the ids listed above. \
Return exactly this shape:\n\
{\"suggestions\": [{\"buddyId\": \"<id>\", \"score\": 0.0, \"reasoning\": \"<one or two sentences>\"}]}\n",
    );

    CompletionRequest::new()
        .message(Message::system(SYSTEM_PROMPT))
        .message(Message::user(prompt))
        .temperature(0.3)
        .max_tokens(2000)
}
