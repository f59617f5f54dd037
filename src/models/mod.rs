// src/models/mod.rs

pub mod comment;
pub mod post;
pub mod user;

/// Rejects strings that are empty or whitespace-only once trimmed.
pub(crate) fn validate_not_blank(text: &str) -> Result<(), validator::ValidationError> {
    if text.trim().is_empty() {
        return Err(validator::ValidationError::new("blank_text"));
    }
    Ok(())
}
