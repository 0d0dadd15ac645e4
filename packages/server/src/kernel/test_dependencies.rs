// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ai_client::{AiError, CompletionProvider, CompletionRequest};
use async_trait::async_trait;
use sqlx::PgPool;

use super::{AiSettings, MokaSuggestionCache, ServerDeps};
use crate::domains::auth::JwtService;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret";
pub const TEST_JWT_ISSUER: &str = "buddy-matching-test";

// =============================================================================
// Mock Completion Provider
// =============================================================================

enum Scripted {
    Text(String),
    Failure(String),
}

pub struct MockCompletionProvider {
    responses: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<CompletionRequest>>,
    delay: Option<Duration>,
    ready: bool,
}

impl MockCompletionProvider {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            delay: None,
            ready: true,
        }
    }

    /// Queue a text response
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Scripted::Text(response.into()));
        self
    }

    /// Queue an API failure
    pub fn with_failure(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Scripted::Failure(message.to_string()));
        self
    }

    /// Sleep before answering (for timeout tests)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Behave like a provider without credentials
    pub fn not_ready(mut self) -> Self {
        self.ready = false;
        self
    }

    /// Get all requests that were sent
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockCompletionProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    async fn complete(&self, request: CompletionRequest) -> ai_client::Result<String> {
        // Record the call
        self.calls.lock().unwrap().push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Text(text)) => Ok(text),
            Some(Scripted::Failure(message)) => Err(AiError::Api {
                status: 500,
                message,
            }),
            // Default: a well-formed but empty ranking
            None => Ok("{\"suggestions\": []}".to_string()),
        }
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub ai: Option<Arc<MockCompletionProvider>>,
    pub cache_ttl: Duration,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            ai: Some(Arc::new(MockCompletionProvider::new())),
            cache_ttl: Duration::from_secs(300),
        }
    }

    /// Set a mock completion provider
    pub fn mock_ai(mut self, ai: MockCompletionProvider) -> Self {
        self.ai = Some(Arc::new(ai));
        self
    }

    /// No completion provider at all (AI disabled)
    pub fn without_ai(mut self) -> Self {
        self.ai = None;
        self
    }

    pub fn jwt_service() -> JwtService {
        JwtService::new(TEST_JWT_SECRET, TEST_JWT_ISSUER.to_string())
    }

    /// Convert into ServerDeps for testing
    pub fn into_server_deps(self, db_pool: PgPool) -> ServerDeps {
        let (provider_name, ai): (String, Option<Arc<dyn CompletionProvider>>) = match self.ai {
            Some(mock) => ("mock".to_string(), Some(mock as Arc<dyn CompletionProvider>)),
            None => ("none".to_string(), None),
        };

        ServerDeps::new(
            db_pool,
            ai,
            AiSettings {
                provider_name,
                model: None,
                timeout: Duration::from_secs(5),
            },
            Arc::new(MokaSuggestionCache::new(100, self.cache_ttl)),
            Arc::new(Self::jwt_service()),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
