//! Suggestion activities - load newcomer and candidates, rank, administer the cache

use tracing::{debug, info};
use uuid::Uuid;

use crate::common::{Actor, Capability, FieldError, Role};
use crate::domains::buddies::models::BuddyProfile;
use crate::domains::suggestions::data::{AiStatus, SuggestRequest, SuggestionResult};
use crate::domains::suggestions::errors::SuggestionError;
use crate::domains::suggestions::prompt::{Candidate, NewcomerSnapshot};
use crate::domains::suggestions::ranker::SuggestionRanker;
use crate::domains::users::{Profile, User};
use crate::kernel::ServerDeps;

fn parse_newcomer_id(request: &SuggestRequest) -> Result<Uuid, SuggestionError> {
    match request.newcomer_id.as_deref().map(str::trim) {
        None | Some("") => Err(SuggestionError::Validation(vec![FieldError::new(
            "newcomerId",
            "newcomerId is required",
        )])),
        Some(raw) => Uuid::parse_str(raw).map_err(|_| {
            SuggestionError::Validation(vec![FieldError::new(
                "newcomerId",
                "newcomerId must be a valid id",
            )])
        }),
    }
}

/// Ranked buddy suggestions for a newcomer (HR only)
pub async fn suggest_buddies(
    actor: Actor,
    request: SuggestRequest,
    deps: &ServerDeps,
) -> Result<SuggestionResult, SuggestionError> {
    actor.can(Capability::UseAiSuggestions).check()?;
    let newcomer_id = parse_newcomer_id(&request)?;

    let Some(provider) = deps.ready_ai() else {
        debug!(provider = %deps.ai_settings.provider_name, "Suggestions requested but AI is not configured");
        return Err(SuggestionError::NotConfigured);
    };

    let newcomer = User::find_by_id(newcomer_id, &deps.db_pool)
        .await?
        .filter(|u| u.role == Role::Newcomer)
        .ok_or(SuggestionError::NewcomerNotFound)?;

    let profile = Profile::find_by_user(newcomer.id, &deps.db_pool)
        .await?
        .filter(Profile::is_complete_for_matching)
        .ok_or(SuggestionError::ProfileIncomplete)?;

    let candidates: Vec<Candidate> = BuddyProfile::find_available_with_users(&deps.db_pool)
        .await?
        .iter()
        .map(Candidate::from)
        .collect();

    let snapshot = NewcomerSnapshot::new(&newcomer, &profile);

    SuggestionRanker::new(
        provider,
        deps.suggestion_cache.as_ref(),
        deps.ai_settings.timeout,
    )
    .rank(&snapshot, &candidates)
    .await
}

pub fn ai_status(actor: Actor, deps: &ServerDeps) -> Result<AiStatus, SuggestionError> {
    actor.can(Capability::UseAiSuggestions).check()?;

    Ok(AiStatus {
        provider: deps.ai_settings.provider_name.clone(),
        model: deps
            .ai
            .as_ref()
            .map(|p| p.default_model().to_string())
            .or_else(|| deps.ai_settings.model.clone()),
        configured: deps.ready_ai().is_some(),
        cache_entries: deps.suggestion_cache.entry_count(),
        cache_ttl_seconds: deps.suggestion_cache.ttl().as_secs(),
    })
}

pub fn clear_cache(actor: Actor, deps: &ServerDeps) -> Result<(), SuggestionError> {
    actor.can(Capability::UseAiSuggestions).check()?;

    deps.suggestion_cache.clear();
    info!(user_id = %actor.user_id(), "Suggestion cache cleared");
    Ok(())
}
