//! Provider-agnostic completion client
//!
//! Callers depend on the [`CompletionProvider`] trait only. Concrete backends
//! (OpenAI, OpenRouter) are chosen at start-up from a [`ProviderConfig`] via
//! [`build_provider`], so swapping vendors is a configuration change.
//!
//! # Example
//!
//! ```rust,ignore
//! use ai_client::{build_provider, CompletionRequest, Message, ProviderConfig, ProviderKind};
//!
//! let provider = build_provider(&ProviderConfig {
//!     kind: ProviderKind::OpenAi,
//!     api_key: Some(std::env::var("OPENAI_API_KEY")?),
//!     model: None,
//!     timeout: std::time::Duration::from_secs(30),
//! })?;
//!
//! let text = provider
//!     .complete(
//!         CompletionRequest::new()
//!             .message(Message::system("You rank mentors."))
//!             .message(Message::user("..."))
//!             .temperature(0.3),
//!     )
//!     .await?;
//! ```

pub mod error;
pub mod openai;
pub mod openrouter;
pub mod provider;
pub mod types;

pub use error::{AiError, Result};
pub use openai::OpenAiProvider;
pub use openrouter::OpenRouterProvider;
pub use provider::{build_provider, CompletionProvider, ProviderConfig, ProviderKind};
pub use types::*;
