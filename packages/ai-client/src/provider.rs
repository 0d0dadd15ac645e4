//! Completion capability and the configuration-driven factory.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AiError, Result};
use crate::openai::OpenAiProvider;
use crate::openrouter::OpenRouterProvider;
use crate::types::CompletionRequest;

/// A text-completion backend.
///
/// Implementations must be cheap to share (`Arc<dyn CompletionProvider>`)
/// and must not perform network I/O in `is_ready`.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short provider identifier ("openai", "openrouter", ...)
    fn name(&self) -> &str;

    /// Model used when the request does not name one
    fn default_model(&self) -> &str;

    /// Whether the provider has everything it needs to make a call
    fn is_ready(&self) -> bool;

    /// Send role-tagged messages, get generated text back
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

/// Which backend to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    OpenRouter,
    /// AI features switched off
    Disabled,
}

impl std::str::FromStr for ProviderKind {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "openrouter" => Ok(ProviderKind::OpenRouter),
            "none" | "disabled" | "" => Ok(ProviderKind::Disabled),
            other => Err(AiError::NotConfigured(format!(
                "unknown AI provider '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::OpenRouter => write!(f, "openrouter"),
            ProviderKind::Disabled => write!(f, "none"),
        }
    }
}

/// Everything the factory needs to build a provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub api_key: Option<String>,
    pub model: Option<String>,
    /// Client-side request timeout
    pub timeout: Duration,
}

/// Build the provider selected by `config`.
///
/// Returns `NotConfigured` when the kind is disabled or the API key is
/// missing, so callers can report the condition without a network call.
pub fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn CompletionProvider>> {
    let api_key = match config.api_key.as_deref() {
        Some(key) if !key.trim().is_empty() => key.to_string(),
        _ if config.kind == ProviderKind::Disabled => String::new(),
        _ => {
            return Err(AiError::NotConfigured(format!(
                "no API key set for provider '{}'",
                config.kind
            )))
        }
    };

    let provider: Arc<dyn CompletionProvider> = match config.kind {
        ProviderKind::Disabled => {
            return Err(AiError::NotConfigured("AI provider disabled".into()))
        }
        ProviderKind::OpenAi => {
            let mut provider = OpenAiProvider::new(api_key, config.timeout)?;
            if let Some(model) = &config.model {
                provider = provider.with_model(model.clone());
            }
            Arc::new(provider)
        }
        ProviderKind::OpenRouter => {
            let mut provider = OpenRouterProvider::new(api_key, config.timeout)?;
            if let Some(model) = &config.model {
                provider = provider.with_model(model.clone());
            }
            Arc::new(provider)
        }
    };

    tracing::info!(
        provider = provider.name(),
        model = provider.default_model(),
        "Completion provider configured"
    );

    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(kind: ProviderKind, api_key: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            kind,
            api_key: api_key.map(str::to_string),
            model: None,
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!(
            "OpenRouter".parse::<ProviderKind>().unwrap(),
            ProviderKind::OpenRouter
        );
        assert_eq!("none".parse::<ProviderKind>().unwrap(), ProviderKind::Disabled);
        assert!("gemini".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_missing_key_is_not_configured() {
        let result = build_provider(&config(ProviderKind::OpenAi, None));
        assert!(matches!(result, Err(AiError::NotConfigured(_))));

        let result = build_provider(&config(ProviderKind::OpenRouter, Some("  ")));
        assert!(matches!(result, Err(AiError::NotConfigured(_))));
    }

    #[test]
    fn test_disabled_is_not_configured() {
        let result = build_provider(&config(ProviderKind::Disabled, Some("sk-test")));
        assert!(matches!(result, Err(AiError::NotConfigured(_))));
    }

    #[test]
    fn test_builds_selected_backend() {
        let provider = build_provider(&config(ProviderKind::OpenRouter, Some("or-key"))).unwrap();
        assert_eq!(provider.name(), "openrouter");
        assert!(provider.is_ready());

        let mut cfg = config(ProviderKind::OpenAi, Some("sk-test"));
        cfg.model = Some("gpt-4o".into());
        let provider = build_provider(&cfg).unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.default_model(), "gpt-4o");
    }
}
