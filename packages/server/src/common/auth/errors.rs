use thiserror::Error;

/// Authentication and authorization failures at the identity boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Insufficient permissions")]
    PermissionDenied,

    #[error("Invalid or expired token")]
    InvalidToken,
}
