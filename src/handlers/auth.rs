// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    db::user_repo,
    error::AppError,
    models::user::{LoginRequest, LoginResponse, RegisterRequest},
    utils::hash::{hash_password, verify_password},
};

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it.
/// Returns 201 Created and the user object (password hash excluded by serde).
pub async fn register(
    State(pool): State<PgPool>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let hashed_password = hash_password(&payload.password)?;

    let user = user_repo::insert_user(
        &pool,
        &payload.username,
        &hashed_password,
        payload.name.as_deref(),
        payload.email.as_deref(),
        payload.phone.as_deref(),
        payload.dob,
        payload.gender.as_deref(),
    )
    .await
    .map_err(|e| {
        // Postgres error code for unique violation is 23505
        if e.to_string().contains("unique constraint") || e.to_string().contains("23505") {
            AppError::Conflict(format!("Username '{}' already exists", payload.username))
        } else {
            tracing::error!("Failed to register user: {:?}", e);
            AppError::from(e)
        }
    })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered", "user": user })),
    ))
}

/// Authenticates a user.
///
/// On success returns the stored profile; the client keeps it and sends the
/// ids back with later writes, there is no server-side session. Unknown
/// username and wrong password answer with the same message so the response
/// does not say which half was wrong.
pub async fn login(
    State(pool): State<PgPool>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = user_repo::find_by_username(&pool, &payload.username)
        .await
        .map_err(|e| {
            tracing::error!("Login DB error: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or(AppError::AuthError(
            "Invalid username or password".to_string(),
        ))?;

    let is_valid = verify_password(&payload.password, &user.password)?;

    if !is_valid {
        return Err(AppError::AuthError(
            "Invalid username or password".to_string(),
        ));
    }

    Ok(Json(LoginResponse {
        user_id: user.id,
        username: user.username,
        name: user.name,
        email: user.email,
        phone: user.phone,
        dob: user.dob,
        gender: user.gender,
    }))
}
