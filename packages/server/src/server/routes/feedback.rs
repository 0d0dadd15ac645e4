use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    Json,
};

use crate::domains::feedback::activities::{feedback_stats, submit_feedback};
use crate::domains::feedback::{Feedback, FeedbackStats, SubmitFeedbackInput};
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;

pub async fn submit(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    body: Result<Json<SubmitFeedbackInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Feedback>), ApiError> {
    let Json(input) = body?;
    let feedback = submit_feedback(user.actor(), input, &state.deps.db_pool).await?;
    Ok((StatusCode::CREATED, Json(feedback)))
}

/// HR only
pub async fn stats(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
) -> Result<Json<FeedbackStats>, ApiError> {
    Ok(Json(feedback_stats(user.actor(), &state.deps.db_pool).await?))
}
