// src/handlers/feed.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE},
    db::post_repo,
    error::AppError,
    models::post::{CreatePostRequest, FeedPage, ListPostsParams},
};

/// Parse one raw paging parameter.
///
/// Absent or non-numeric input falls back to the default. Zero and negative
/// numbers are not corrected here: they travel on to the store, where
/// Postgres rejects a negative LIMIT/OFFSET and the request surfaces as 500.
fn parse_paging_param(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(default)
}

/// Whether more pages exist, judged from page fullness alone.
///
/// Deliberately approximate: when the total count is an exact multiple of
/// `limit`, the last full page still answers `true` and only the empty page
/// after it answers `false`.
fn has_more(returned: usize, limit: i64) -> bool {
    returned as i64 == limit
}

/// Pages needed to hold `total` rows: `ceil(total / limit)`.
/// Zero when `limit <= 0`, which only occurs via unclamped client input.
/// Quotient-plus-remainder form rather than `(total + limit - 1) / limit`,
/// which overflows once `limit` gets anywhere near i64::MAX.
fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    total / limit + (total % limit != 0) as i64
}

/// Post ids are opaque UUIDs; a path segment that does not parse maps to
/// the same 404 a missing post produces.
pub(crate) fn parse_post_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Post not found".to_string()))
}

/// Creates a new post.
///
/// `userId`/`username` name the author and are stored as given; the optional
/// `image` is an already-hosted URL kept verbatim.
pub async fn create_post(
    State(pool): State<PgPool>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let post = post_repo::insert_post(
        &pool,
        payload.user_id,
        &payload.username,
        &payload.text,
        payload.image.as_deref(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to create post: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// Paginated feed, newest first.
pub async fn list_posts(
    State(pool): State<PgPool>,
    Query(params): Query<ListPostsParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = parse_paging_param(params.page.as_deref(), DEFAULT_PAGE);
    let limit = parse_paging_param(params.limit.as_deref(), DEFAULT_PAGE_SIZE);

    let (posts, total) = post_repo::list_page(&pool, page, limit).await.map_err(|e| {
        tracing::error!("Failed to list posts: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(FeedPage {
        has_more: has_more(posts.len(), limit),
        current_page: page,
        total_pages: total_pages(total, limit),
        posts,
    }))
}

/// Fetches a single post by id.
pub async fn get_post(
    State(pool): State<PgPool>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_post_id(&id)?;

    let post = post_repo::find_by_id(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Post not found".to_string()))?;

    Ok(Json(post))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_param_defaults_when_absent() {
        assert_eq!(parse_paging_param(None, DEFAULT_PAGE), 1);
        assert_eq!(parse_paging_param(None, DEFAULT_PAGE_SIZE), 10);
    }

    #[test]
    fn paging_param_defaults_when_non_numeric() {
        assert_eq!(parse_paging_param(Some("abc"), 1), 1);
        assert_eq!(parse_paging_param(Some(""), 10), 10);
        assert_eq!(parse_paging_param(Some("2.5"), 10), 10);
    }

    #[test]
    fn paging_param_passes_numbers_through() {
        assert_eq!(parse_paging_param(Some("7"), 1), 7);
        assert_eq!(parse_paging_param(Some("100"), 10), 100);
    }

    #[test]
    fn paging_param_does_not_clamp_zero_or_negative() {
        assert_eq!(parse_paging_param(Some("0"), 1), 0);
        assert_eq!(parse_paging_param(Some("-4"), 10), -4);
    }

    #[test]
    fn has_more_true_for_full_page() {
        assert!(has_more(10, 10));
        assert!(has_more(1, 1));
    }

    #[test]
    fn has_more_false_for_short_or_empty_page() {
        assert!(!has_more(3, 10));
        assert!(!has_more(0, 10));
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
    }

    #[test]
    fn total_pages_guards_non_positive_limit() {
        assert_eq!(total_pages(5, 0), 0);
        assert_eq!(total_pages(5, -3), 0);
    }

    #[test]
    fn total_pages_survives_extreme_limits() {
        assert_eq!(total_pages(2, i64::MAX), 1);
        assert_eq!(total_pages(25, i64::MAX), 1);
        assert_eq!(total_pages(0, i64::MAX), 0);
    }

    #[test]
    fn total_pages_survives_extreme_totals() {
        assert_eq!(total_pages(i64::MAX, 1), i64::MAX);
        assert_eq!(total_pages(i64::MAX, 10), i64::MAX / 10 + 1);
        assert_eq!(total_pages(i64::MAX, i64::MAX), 1);
    }
}
