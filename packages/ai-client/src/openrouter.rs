//! OpenRouter backend (OpenAI wire format behind a different gateway).

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::openai::OpenAiProvider;
use crate::provider::CompletionProvider;
use crate::types::CompletionRequest;

pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const OPENROUTER_DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

#[derive(Clone)]
pub struct OpenRouterProvider {
    inner: OpenAiProvider,
}

impl OpenRouterProvider {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let inner = OpenAiProvider::new(api_key, timeout)?
            .with_base_url(OPENROUTER_BASE_URL)
            .with_model(OPENROUTER_DEFAULT_MODEL)
            .with_name("openrouter")
            .with_header("x-title", "Buddy Matching");

        Ok(Self { inner })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.inner = self.inner.with_model(model);
        self
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn default_model(&self) -> &str {
        self.inner.default_model()
    }

    fn is_ready(&self) -> bool {
        self.inner.is_ready()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        self.inner.complete(request).await
    }
}
