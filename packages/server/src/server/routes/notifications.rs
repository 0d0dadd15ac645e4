use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Extension, Path, Query,
    },
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::domains::notifications::activities;
use crate::domains::notifications::Notification;
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationQuery {
    #[serde(default)]
    pub unread_only: bool,
}

/// Caller's notifications, newest first
pub async fn list(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    query: Result<Query<NotificationQuery>, QueryRejection>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let Query(query) = query?;
    let notifications =
        activities::list_notifications(user.user_id, query.unread_only, &state.deps.db_pool)
            .await?;
    Ok(Json(notifications))
}

pub async fn mark_read(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Notification>, ApiError> {
    let Path(id) = path?;
    activities::mark_read(id, user.user_id, &state.deps.db_pool)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Notification not found".to_string()))
}
