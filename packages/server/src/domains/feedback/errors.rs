use thiserror::Error;

use crate::common::{AuthError, FieldError};

#[derive(Error, Debug)]
pub enum FeedbackError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Missing match, or one the caller took no part in
    #[error("Match not found")]
    MatchNotFound,

    #[error("Feedback can only be submitted for accepted or completed matches")]
    NotEligible,

    #[error("Feedback already submitted for this match")]
    AlreadySubmitted,

    #[error(transparent)]
    Forbidden(#[from] AuthError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for FeedbackError {
    fn from(err: sqlx::Error) -> Self {
        FeedbackError::Internal(err.into())
    }
}
