// src/models/comment.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_not_blank;

/// One reply on a post, embedded in the post row's jsonb comment array.
/// Flat structure: no ids, no threading, no edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Display name supplied by the commenting client; not cross-checked
    /// against the users table.
    pub author: String,
    pub text: String,
    /// Stamped by the store at append time.
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a new comment. The author field is `user` on the wire.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 50))]
    pub user: String,

    #[validate(
        length(max = 1000, message = "Comment must be at most 1000 characters"),
        custom(function = validate_not_blank)
    )]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_normal_comment() {
        let req = CreateCommentRequest {
            user: "alice".to_string(),
            text: "Great shot!".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn rejects_empty_text() {
        let req = CreateCommentRequest {
            user: "alice".to_string(),
            text: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_whitespace_only_text() {
        let req = CreateCommentRequest {
            user: "alice".to_string(),
            text: "   \t  ".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn rejects_missing_author_name() {
        let req = CreateCommentRequest {
            user: String::new(),
            text: "hello".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
