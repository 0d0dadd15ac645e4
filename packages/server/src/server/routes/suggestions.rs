//! AI suggestion endpoints (HR only)

use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};
use serde_json::{json, Value};

use crate::domains::suggestions::activities::{self, ai_status, suggest_buddies};
use crate::domains::suggestions::{AiStatus, SuggestRequest, SuggestionResult};
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;

pub async fn suggest(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    body: Result<Json<SuggestRequest>, JsonRejection>,
) -> Result<Json<SuggestionResult>, ApiError> {
    let Json(request) = body?;
    suggest_buddies(user.actor(), request, &state.deps)
        .await
        .map(Json)
        .map_err(|e| ApiError::from(e).redact(state.expose_error_details))
}

pub async fn status(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
) -> Result<Json<AiStatus>, ApiError> {
    Ok(Json(ai_status(user.actor(), &state.deps)?))
}

pub async fn clear_cache(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
) -> Result<Json<Value>, ApiError> {
    activities::clear_cache(user.actor(), &state.deps)?;
    Ok(Json(json!({ "cleared": true })))
}
