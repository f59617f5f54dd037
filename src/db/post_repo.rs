// src/db/post_repo.rs

use chrono::Utc;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::comment::Comment;
use crate::models::post::Post;

/// Insert a new post and return the stored row.
///
/// `author_id` and `author_name` are whatever the caller handed over; the
/// name is denormalized into the row here and never touched again.
pub async fn insert_post(
    pool: &PgPool,
    author_id: Uuid,
    author_name: &str,
    text: &str,
    image: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (author_id, author_name, text, image)
        VALUES ($1, $2, $3, $4)
        RETURNING id, author_id, author_name, text, image, like_count, comments, created_at
        "#,
    )
    .bind(author_id)
    .bind(author_name)
    .bind(text)
    .bind(image)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Row offset for a 1-based page: `(page - 1) * limit`, saturating.
///
/// `page` and `limit` arrive unclamped from the query string, so the
/// arithmetic must hold up under any i64. Saturation turns an absurd page
/// number into an out-of-range offset, which Postgres answers like any
/// other (empty page, or an error for a negative value).
fn page_offset(page: i64, limit: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(limit)
}

/// One feed page (newest first) together with the total post count.
///
/// The page select and the count run as two independent statements with no
/// shared snapshot, so a write landing between them can skew `total`
/// relative to the rows. `page`/`limit` arrive unclamped; Postgres itself
/// rejects a negative LIMIT or OFFSET.
pub async fn list_page(
    pool: &PgPool,
    page: i64,
    limit: i64,
) -> Result<(Vec<Post>, i64), sqlx::Error> {
    let offset = page_offset(page, limit);

    // id breaks ties between posts created in the same instant, keeping the
    // order stable across page fetches.
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, author_name, text, image, like_count, comments, created_at
        FROM posts
        ORDER BY created_at DESC, id DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total = sqlx::query("SELECT COUNT(*) AS count FROM posts")
        .fetch_one(pool)
        .await?
        .get::<i64, _>("count");

    Ok((posts, total))
}

/// Fetch a single post by id.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, author_name, text, image, like_count, comments, created_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Add one like and return the updated row.
///
/// A single UPDATE, so concurrent calls serialize on the row lock and every
/// increment lands. Returns `None` when the post does not exist; nothing is
/// created in that case.
pub async fn increment_likes(pool: &PgPool, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET like_count = like_count + 1
        WHERE id = $1
        RETURNING id, author_id, author_name, text, image, like_count, comments, created_at
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Append one comment to a post's jsonb array and return the updated row.
///
/// The creation timestamp is assigned here, at append time. `comments || $2`
/// treats the bound object as a one-element array, so the whole append is a
/// single atomic statement and concurrent comments cannot overwrite each
/// other. Text arrives as given; emptiness checks happen before this layer.
pub async fn append_comment(
    pool: &PgPool,
    id: Uuid,
    author: &str,
    text: &str,
) -> Result<Option<Post>, sqlx::Error> {
    let comment = Comment {
        author: author.to_string(),
        text: text.to_string(),
        created_at: Utc::now(),
    };

    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET comments = comments || $2
        WHERE id = $1
        RETURNING id, author_id, author_name, text, image, like_count, comments, created_at
        "#,
    )
    .bind(id)
    .bind(Json(comment))
    .fetch_optional(pool)
    .await?;

    Ok(post)
}
