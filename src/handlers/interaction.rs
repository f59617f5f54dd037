// src/handlers/interaction.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::PgPool;
use validator::Validate;

use crate::{db::post_repo, error::AppError, models::comment::CreateCommentRequest};

use super::feed::parse_post_id;

/// Likes a post.
///
/// One unconditional +1 per call: there is no per-user ledger and no unlike,
/// so repeated calls from the same client keep counting. Answers with the
/// whole updated post.
pub async fn like_post(
    State(pool): State<PgPool>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_post_id(&id)?;

    let post = post_repo::increment_likes(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Post not found".to_string()))?;

    Ok(Json(post))
}

/// Comments on a post.
///
/// Empty or whitespace-only text is rejected here; the store below appends
/// whatever it is handed. The author name comes from the request body and is
/// not checked against the users table.
pub async fn create_comment(
    State(pool): State<PgPool>,
    Path(id): Path<String>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_post_id(&id)?;

    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let post = post_repo::append_comment(&pool, id, &payload.user, &payload.text)
        .await?
        .ok_or(AppError::NotFound("Post not found".to_string()))?;

    Ok(Json(post))
}
