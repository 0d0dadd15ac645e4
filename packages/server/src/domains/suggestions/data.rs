use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `POST /api/ai/suggestions` body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestRequest {
    pub newcomer_id: Option<String>,
}

/// One ranked buddy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub buddy_id: Uuid,
    pub buddy_name: String,
    /// Always within [0, 1]
    pub score: f64,
    pub reasoning: String,
    pub buddy_profile_summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResult {
    /// Sorted by score, highest first; at most five
    pub suggestions: Vec<Suggestion>,
    /// Candidates offered to the provider, not the number returned
    pub total_analyzed: usize,
    pub processing_time_ms: u64,
}

impl SuggestionResult {
    pub fn empty() -> Self {
        Self {
            suggestions: Vec::new(),
            total_analyzed: 0,
            processing_time_ms: 0,
        }
    }
}

/// `GET /api/ai/status`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiStatus {
    pub provider: String,
    pub model: Option<String>,
    pub configured: bool,
    pub cache_entries: u64,
    pub cache_ttl_seconds: u64,
}
