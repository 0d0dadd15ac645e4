use thiserror::Error;

use crate::common::{AuthError, FieldError};

/// Why a respond/complete/get was turned away as "not found".
///
/// Logged, never returned to the caller: all causes surface as the same
/// [`MatchError::NotFound`] message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundCause {
    /// No match with that id
    Missing,
    /// Caller is not the receiver
    NotReceiver,
    /// Caller is neither sender nor receiver
    NotParticipant,
    /// Match is no longer in the state the operation requires
    WrongState,
}

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("Cannot send a match request to yourself")]
    SelfRequest,

    #[error("Receiver must be a buddy")]
    ReceiverNotBuddy,

    #[error("Newcomer not found or user is not a newcomer")]
    InvalidNewcomer,

    #[error("Buddy has reached maximum capacity")]
    CapacityReached,

    #[error("A pending match request already exists for this buddy")]
    DuplicatePending,

    #[error("Match not found or already responded")]
    NotFound(NotFoundCause),

    #[error(transparent)]
    Forbidden(#[from] AuthError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl MatchError {
    pub fn validation(field: &str, message: &str) -> Self {
        MatchError::Validation(vec![FieldError::new(field, message)])
    }

    /// Business-rule violations: single fixed message, HTTP 400
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            MatchError::SelfRequest
                | MatchError::ReceiverNotBuddy
                | MatchError::InvalidNewcomer
                | MatchError::CapacityReached
                | MatchError::DuplicatePending
        )
    }
}

impl From<sqlx::Error> for MatchError {
    fn from(err: sqlx::Error) -> Self {
        MatchError::Internal(err.into())
    }
}
