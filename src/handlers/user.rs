// src/handlers/user.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{db::user_repo, error::AppError, models::user::UpdateProfileRequest};

/// User ids follow the same policy as post ids: a malformed path segment
/// answers 404, not 400.
fn parse_user_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("User not found".to_string()))
}

/// Fetches a user's profile. The password hash never serializes.
pub async fn get_user(
    State(pool): State<PgPool>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_user_id(&id)?;

    let user = user_repo::find_by_id(&pool, id)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Updates the editable profile fields: name, email, phone.
///
/// Partial update: absent fields keep their stored value. Posts keep the
/// author name they were created with; only the profile row changes.
pub async fn update_user(
    State(pool): State<PgPool>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_user_id(&id)?;

    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = user_repo::update_profile(
        &pool,
        id,
        payload.name.as_deref(),
        payload.email.as_deref(),
        payload.phone.as_deref(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to update user {}: {:?}", id, e);
        AppError::InternalServerError(e.to_string())
    })?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}
