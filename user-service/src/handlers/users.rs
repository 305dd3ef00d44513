//! `/api/users` endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use service_core::error::AppError;
use service_core::extract::ApiJson;

use crate::{
    dtos::{RegisterRequest, UserResponse},
    AppState,
};

pub async fn get_user_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    tracing::info!(user_id = %user_id, "Fetching user profile");

    let profile = state.users.get_user_profile(&user_id).await?;
    Ok(Json(profile))
}

pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let profile = state.users.register(request).await?;
    Ok(Json(profile))
}

/// `userId` here is the identity-provider subject id, not the internal id.
pub async fn validate_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<bool>, AppError> {
    let exists = state.users.exist_by_user_id(&user_id).await?;
    Ok(Json(exists))
}
