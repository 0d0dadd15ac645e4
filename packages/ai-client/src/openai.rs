//! OpenAI chat-completions backend.
//!
//! Also the wire implementation for any OpenAI-compatible endpoint; see
//! [`crate::openrouter`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AiError, Result};
use crate::provider::CompletionProvider;
use crate::types::{CompletionRequest, Message};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseRaw {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

/// OpenAI (or OpenAI-compatible) completion provider.
#[derive(Clone)]
pub struct OpenAiProvider {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
    name: &'static str,
    extra_headers: HeaderMap,
}

impl OpenAiProvider {
    /// Create a provider with the given API key and per-request timeout.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AiError::NotConfigured(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            base_url: OPENAI_BASE_URL.to_string(),
            model: OPENAI_DEFAULT_MODEL.to_string(),
            name: "openai",
            extra_headers: HeaderMap::new(),
        })
    }

    /// Set a custom base URL (Azure, proxies, local gateways).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub(crate) fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Attach a header sent with every request. Invalid names/values are ignored.
    pub(crate) fn with_header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.extra_headers
                .insert(HeaderName::from_static(name), value);
        }
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        self.name
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    fn is_ready(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        if !self.is_ready() {
            return Err(AiError::NotConfigured(format!("{} API key missing", self.name)));
        }

        let start = Instant::now();
        let model = request.model.as_deref().unwrap_or(&self.model);
        let body = ChatBody {
            model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .headers(self.extra_headers.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(provider = self.name, error = %e, timeout = e.is_timeout(), "Completion request failed");
                AiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(provider = self.name, status = %status, error = %error_text, "Completion API error");
            return Err(AiError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let raw: ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| AiError::Parse(e.to_string()))?;

        let content = raw
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AiError::Parse("response contained no message content".into()))?;

        debug!(
            provider = self.name,
            model = %model,
            duration_ms = start.elapsed().as_millis() as u64,
            response_length = content.len(),
            "Completion received"
        );

        Ok(content)
    }
}
