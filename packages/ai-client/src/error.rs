//! Error types for completion providers.

use thiserror::Error;

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, AiError>;

#[derive(Debug, Error)]
pub enum AiError {
    /// Provider cannot be used (unknown kind, missing API key)
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// Transport failure, including client-side timeouts
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response from the provider
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}
