//! Server dependencies for activities (using traits for testability)
//!
//! This module provides the central dependency container used by domain
//! activities. External services sit behind trait objects so tests can
//! substitute mocks.

use std::sync::Arc;
use std::time::Duration;

use ai_client::CompletionProvider;
use sqlx::PgPool;

use crate::domains::auth::JwtService;
use crate::kernel::BaseSuggestionCache;

/// What the AI status endpoint reports about the configured provider
#[derive(Debug, Clone)]
pub struct AiSettings {
    /// Configured provider name, even when it could not be built
    pub provider_name: String,
    pub model: Option<String>,
    /// Hard limit for one completion call
    pub timeout: Duration,
}

/// Server dependencies accessible to activities
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// Completion provider, `None` when AI is disabled or missing credentials
    pub ai: Option<Arc<dyn CompletionProvider>>,
    pub ai_settings: AiSettings,
    pub suggestion_cache: Arc<dyn BaseSuggestionCache>,
    /// JWT service for token creation and verification
    pub jwt_service: Arc<JwtService>,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        ai: Option<Arc<dyn CompletionProvider>>,
        ai_settings: AiSettings,
        suggestion_cache: Arc<dyn BaseSuggestionCache>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            db_pool,
            ai,
            ai_settings,
            suggestion_cache,
            jwt_service,
        }
    }

    /// Provider that can take calls right now
    pub fn ready_ai(&self) -> Option<&dyn CompletionProvider> {
        self.ai.as_deref().filter(|p| p.is_ready())
    }
}
