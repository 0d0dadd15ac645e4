//! HTTP error mapping
//!
//! Every handler returns `Result<_, ApiError>`. Domain errors convert into
//! `ApiError` and render one of three JSON shapes:
//! `{"errors": [{field, message}]}` for validation, `{"error": msg}` for
//! everything else, plus `detail` on provider failures outside production.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::common::{AuthError, FieldError};
use crate::domains::feedback::FeedbackError;
use crate::domains::matches::MatchError;
use crate::domains::suggestions::SuggestionError;

#[derive(Debug)]
pub enum ApiError {
    /// 400 with a field list
    Validation(Vec<FieldError>),
    /// 400 with one fixed message
    BadRequest(String),
    Unauthorized,
    Forbidden,
    NotFound(String),
    ServiceUnavailable(String),
    /// 500 from a completion provider; `detail` is dropped in production
    Upstream {
        message: String,
        detail: Option<String>,
    },
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Upstream { .. } | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Remove provider causes before the response leaves a production server
    pub fn redact(self, expose_details: bool) -> Self {
        match self {
            Self::Upstream { message, .. } if !expose_details => Self::Upstream {
                message,
                detail: None,
            },
            other => other,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::Validation(errors) => json!({ "errors": errors }),
            Self::BadRequest(message)
            | Self::NotFound(message)
            | Self::ServiceUnavailable(message) => json!({ "error": message }),
            Self::Unauthorized => json!({ "error": AuthError::AuthenticationRequired.to_string() }),
            Self::Forbidden => json!({ "error": AuthError::PermissionDenied.to_string() }),
            Self::Upstream { message, detail } => match detail {
                Some(detail) => json!({ "error": message, "detail": detail }),
                None => json!({ "error": message }),
            },
            Self::Internal(err) => {
                error!(error = ?err, "Request failed with internal error");
                json!({ "error": "Internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationRequired | AuthError::InvalidToken => Self::Unauthorized,
            AuthError::PermissionDenied => Self::Forbidden,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<MatchError> for ApiError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::Validation(errors) => Self::Validation(errors),
            MatchError::NotFound(_) => Self::NotFound(err.to_string()),
            MatchError::Forbidden(auth) => auth.into(),
            MatchError::Internal(e) => Self::Internal(e),
            business => Self::BadRequest(business.to_string()),
        }
    }
}

impl From<SuggestionError> for ApiError {
    fn from(err: SuggestionError) -> Self {
        match err {
            SuggestionError::Validation(errors) => Self::Validation(errors),
            SuggestionError::NotConfigured => Self::ServiceUnavailable(err.to_string()),
            SuggestionError::NewcomerNotFound => Self::NotFound(err.to_string()),
            SuggestionError::ProfileIncomplete => Self::BadRequest(err.to_string()),
            SuggestionError::GenerationFailed(ref cause) => {
                warn!(cause = %cause, "Suggestion generation failed");
                Self::Upstream {
                    message: err.to_string(),
                    detail: Some(cause.clone()),
                }
            }
            SuggestionError::Forbidden(auth) => auth.into(),
            SuggestionError::Internal(e) => Self::Internal(e),
        }
    }
}

impl From<FeedbackError> for ApiError {
    fn from(err: FeedbackError) -> Self {
        match err {
            FeedbackError::Validation(errors) => Self::Validation(errors),
            FeedbackError::MatchNotFound => Self::NotFound(err.to_string()),
            FeedbackError::NotEligible | FeedbackError::AlreadySubmitted => {
                Self::BadRequest(err.to_string())
            }
            FeedbackError::Forbidden(auth) => auth.into(),
            FeedbackError::Internal(e) => Self::Internal(e),
        }
    }
}

/// Unparseable bodies are reported like any other validation failure
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(vec![FieldError::new("body", rejection.body_text())])
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(vec![FieldError::new("query", rejection.body_text())])
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(vec![FieldError::new("path", rejection.body_text())])
    }
}
