//! Buddy directory, dashboard and capacity endpoints

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Extension, Path, Query,
    },
    Json,
};
use uuid::Uuid;

use crate::common::Capability;
use crate::domains::buddies::activities::{self, capacity_for, search_directory};
use crate::domains::buddies::{BuddyDirectoryQuery, BuddyListing, CapacityData, DashboardEntry};
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;

pub async fn directory(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    query: Result<Query<BuddyDirectoryQuery>, QueryRejection>,
) -> Result<Json<Vec<BuddyListing>>, ApiError> {
    let Query(query) = query?;
    let listings = search_directory(&query, user.user_id, &state.deps.db_pool).await?;
    Ok(Json(listings))
}

/// HR only
pub async fn dashboard(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
) -> Result<Json<Vec<DashboardEntry>>, ApiError> {
    user.actor().can(Capability::ViewDashboard).check()?;
    let entries = activities::dashboard(&state.deps.db_pool).await?;
    Ok(Json(entries))
}

pub async fn capacity(
    Extension(state): Extension<AxumAppState>,
    _user: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<CapacityData>, ApiError> {
    let Path(user_id) = path?;
    capacity_for(user_id, &state.deps.db_pool)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Buddy profile not found".to_string()))
}
