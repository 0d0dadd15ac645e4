//! AI suggestion ranking
//!
//! Offers every candidate to the completion provider, then trusts only the
//! parts of the answer that refer to candidates it was actually given.

use std::time::{Duration, Instant};

use ai_client::CompletionProvider;
use anyhow::Result;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use super::data::SuggestionResult;
use super::errors::SuggestionError;
use super::parse::{extract_json_payload, reconcile};
use super::prompt::{build_request, Candidate, NewcomerSnapshot};
use crate::kernel::BaseSuggestionCache;

/// Cache key for a newcomer's ranking: hash of id plus profile content
pub fn cache_key(newcomer: &NewcomerSnapshot) -> Result<String> {
    let snapshot = serde_json::to_vec(newcomer)?;

    let mut hasher = Sha256::new();
    hasher.update(b"buddy-suggestions:");
    hasher.update(newcomer.id.as_bytes());
    hasher.update(&snapshot);
    Ok(hex::encode(hasher.finalize()))
}

pub struct SuggestionRanker<'a> {
    provider: &'a dyn CompletionProvider,
    cache: &'a dyn BaseSuggestionCache,
    timeout: Duration,
}

impl<'a> SuggestionRanker<'a> {
    pub fn new(
        provider: &'a dyn CompletionProvider,
        cache: &'a dyn BaseSuggestionCache,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            cache,
            timeout,
        }
    }

    pub async fn rank(
        &self,
        newcomer: &NewcomerSnapshot,
        candidates: &[Candidate],
    ) -> Result<SuggestionResult, SuggestionError> {
        if candidates.is_empty() {
            debug!(newcomer_id = %newcomer.id, "No available buddies, skipping provider call");
            return Ok(SuggestionResult::empty());
        }

        let key = cache_key(newcomer)?;
        if let Some(cached) = self.cache.get(&key) {
            debug!(newcomer_id = %newcomer.id, "Suggestion cache hit");
            return Ok(cached);
        }

        if !self.provider.is_ready() {
            return Err(SuggestionError::NotConfigured);
        }

        let started = Instant::now();
        let request = build_request(newcomer, candidates);

        let response = match tokio::time::timeout(self.timeout, self.provider.complete(request)).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!(provider = self.provider.name(), error = %e, "Completion provider call failed");
                return Err(SuggestionError::GenerationFailed(e.to_string()));
            }
            Err(_) => {
                warn!(
                    provider = self.provider.name(),
                    timeout_secs = self.timeout.as_secs(),
                    "Completion provider call timed out"
                );
                return Err(SuggestionError::GenerationFailed(format!(
                    "provider did not answer within {}s",
                    self.timeout.as_secs()
                )));
            }
        };

        let payload = extract_json_payload(&response).ok_or_else(|| {
            warn!(provider = self.provider.name(), "Provider response contained no suggestions payload");
            SuggestionError::GenerationFailed("no suggestions payload in provider response".to_string())
        })?;
        let suggestions = reconcile(&payload, candidates).map_err(SuggestionError::GenerationFailed)?;

        let result = SuggestionResult {
            suggestions,
            total_analyzed: candidates.len(),
            processing_time_ms: started.elapsed().as_millis() as u64,
        };

        info!(
            newcomer_id = %newcomer.id,
            provider = self.provider.name(),
            model = self.provider.default_model(),
            candidates = result.total_analyzed,
            returned = result.suggestions.len(),
            duration_ms = result.processing_time_ms,
            "Buddy suggestions generated"
        );

        self.cache.insert(key, result.clone());
        Ok(result)
    }
}
