//! Match lifecycle endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::domains::matches::activities::{
    complete_match, create_match, get_match, list_matches, respond_to_match,
};
use crate::domains::matches::{CreateMatchInput, ListMatchesQuery, MatchData, RespondInput};
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;

pub async fn create(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    body: Result<Json<CreateMatchInput>, JsonRejection>,
) -> Result<(StatusCode, Json<MatchData>), ApiError> {
    let Json(input) = body?;
    let created = create_match(user.actor(), input, &state.deps.db_pool).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    query: Result<Query<ListMatchesQuery>, QueryRejection>,
) -> Result<Json<Vec<MatchData>>, ApiError> {
    let Query(query) = query?;
    let matches = list_matches(user.actor(), &query, &state.deps.db_pool).await?;
    Ok(Json(matches))
}

pub async fn get_one(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MatchData>, ApiError> {
    let Path(id) = path?;
    let record = get_match(user.actor(), id, &state.deps.db_pool).await?;
    Ok(Json(record))
}

pub async fn respond(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<RespondInput>, JsonRejection>,
) -> Result<Json<MatchData>, ApiError> {
    let Path(id) = path?;
    let Json(input) = body?;
    let updated = respond_to_match(user.actor(), id, input, &state.deps.db_pool).await?;
    Ok(Json(updated))
}

pub async fn complete(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MatchData>, ApiError> {
    let Path(id) = path?;
    let completed = complete_match(user.actor(), id, &state.deps.db_pool).await?;
    Ok(Json(completed))
}
