// src/db/user_repo.rs

use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::user::User;

/// Insert a new user with an already-hashed password.
#[allow(clippy::too_many_arguments)]
pub async fn insert_user(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
    name: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
    dob: Option<NaiveDate>,
    gender: Option<&str>,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, password, name, email, phone, dob, gender)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, username, password, name, email, phone, dob, gender, created_at
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(dob)
    .bind(gender)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Fetch a user by id.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password, name, email, phone, dob, gender, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Fetch a user by username, for login.
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password, name, email, phone, dob, gender, created_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Apply the provided profile fields; fields passed as `None` keep their
/// stored value. Returns the updated row, or `None` when no such user exists.
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    name: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<Option<User>, sqlx::Error> {
    // Nothing to change; answer with the current row.
    if name.is_none() && email.is_none() && phone.is_none() {
        return find_by_id(pool, id).await;
    }

    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE users SET ");
    let mut separated = builder.separated(", ");

    if let Some(name) = name {
        separated.push("name = ");
        separated.push_bind_unseparated(name);
    }
    if let Some(email) = email {
        separated.push("email = ");
        separated.push_bind_unseparated(email);
    }
    if let Some(phone) = phone {
        separated.push("phone = ");
        separated.push_bind_unseparated(phone);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING id, username, password, name, email, phone, dob, gender, created_at");

    let user = builder
        .build_query_as::<User>()
        .fetch_optional(pool)
        .await?;

    Ok(user)
}
