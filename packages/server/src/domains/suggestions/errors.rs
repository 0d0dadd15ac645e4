use thiserror::Error;

use crate::common::{AuthError, FieldError};

#[derive(Error, Debug)]
pub enum SuggestionError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("AI service is not configured")]
    NotConfigured,

    #[error("Newcomer not found")]
    NewcomerNotFound,

    #[error("Newcomer profile is incomplete")]
    ProfileIncomplete,

    /// Provider failure, timeout or unusable response. The cause is only
    /// shown to callers outside production.
    #[error("Failed to generate suggestions")]
    GenerationFailed(String),

    #[error(transparent)]
    Forbidden(#[from] AuthError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
