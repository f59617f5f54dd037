// src/models/post.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;
use validator::Validate;

use super::comment::Comment;
use super::validate_not_blank;

/// Represents the 'posts' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,

    /// Author identity as supplied by the client at creation; stored as given.
    pub author_id: Uuid,

    /// Display name captured at creation time. Later profile edits do not
    /// rewrite it, so old posts keep the old name.
    pub author_name: String,

    pub text: String,

    /// URL of an already-hosted image, carried verbatim.
    /// Left out of the JSON entirely when the post has no image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Total likes. Only ever incremented; there is no unlike.
    pub like_count: i32,

    /// Append-only comment list, stored as a jsonb array inside the row
    /// so an append is a single-statement update.
    pub comments: Json<Vec<Comment>>,

    /// Sole feed ordering key; never updated after insert.
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a new post.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(
        length(min = 1, max = 10000, message = "Text length must be between 1 and 10000 chars"),
        custom(function = validate_not_blank)
    )]
    pub text: String,

    /// Caller identity, taken from the request body on trust.
    pub user_id: Uuid,

    #[validate(length(min = 1, max = 50))]
    pub username: String,

    /// Optional hosted-image URL; no shape checks are applied to it.
    pub image: Option<String>,
}

/// Query parameters for the paginated feed.
///
/// Kept as raw strings so that absent or non-numeric values can fall back
/// to defaults while zero and negative numbers still pass through to the
/// store unclamped.
#[derive(Debug, Deserialize)]
pub struct ListPostsParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// One page of the feed plus the pagination envelope around it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    pub posts: Vec<Post>,
    pub current_page: i64,
    pub total_pages: i64,
    /// Inferred from page fullness alone, not from the total count.
    pub has_more: bool,
}
