use std::env;
use std::time::Duration;

use ai_client::{ProviderConfig, ProviderKind};
use anyhow::{Context, Result};
use dotenvy::dotenv;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub app_env: String,
    pub allowed_origins: Vec<String>,
    pub ai: AiConfig,
}

/// Completion provider and suggestion cache settings
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub provider: ProviderKind,
    pub model: Option<String>,
    pub openai_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
    pub timeout: Duration,
    pub cache_ttl: Duration,
    pub cache_max_entries: u64,
}

impl AiConfig {
    /// Provider factory input for the selected backend
    pub fn provider_config(&self) -> ProviderConfig {
        let api_key = match self.provider {
            ProviderKind::OpenAi => self.openai_api_key.clone(),
            ProviderKind::OpenRouter => self.openrouter_api_key.clone(),
            ProviderKind::Disabled => None,
        };

        ProviderConfig {
            kind: self.provider,
            api_key,
            model: self.model.clone(),
            timeout: self.timeout,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Disabled,
            model: None,
            openai_api_key: None,
            openrouter_api_key: None,
            timeout: Duration::from_secs(30),
            cache_ttl: Duration::from_secs(300),
            cache_max_entries: 1000,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let ai = AiConfig {
            provider: env::var("AI_PROVIDER")
                .unwrap_or_else(|_| "openai".to_string())
                .parse()
                .context("AI_PROVIDER must be one of openai, openrouter, none")?,
            model: non_empty(env::var("AI_MODEL").ok()),
            openai_api_key: non_empty(env::var("OPENAI_API_KEY").ok()),
            openrouter_api_key: non_empty(env::var("OPENROUTER_API_KEY").ok()),
            timeout: Duration::from_secs(
                parse_or("AI_TIMEOUT_SECS", 30).context("AI_TIMEOUT_SECS must be a number")?,
            ),
            cache_ttl: Duration::from_secs(
                parse_or("AI_CACHE_TTL_SECS", 300).context("AI_CACHE_TTL_SECS must be a number")?,
            ),
            cache_max_entries: parse_or("AI_CACHE_MAX_ENTRIES", 1000)
                .context("AI_CACHE_MAX_ENTRIES must be a number")?,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: parse_or("PORT", 8080).context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "buddy-matching".to_string()),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            allowed_origins: parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
            ai,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => Ok(raw.trim().parse()?),
        Err(_) => Ok(default),
    }
}

/// Comma-separated origin list; empty or "*" means any origin
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty() && *o != "*")
        .map(str::to_string)
        .collect()
}
