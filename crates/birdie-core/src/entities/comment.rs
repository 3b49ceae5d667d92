//! Comment entity - an append-only reply attached to a post

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{DocId, UserId};

/// Comment on a post.
///
/// Comments live in a subcollection under the post's per-user feed record.
/// They are appended, never edited, and ordered ascending by timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: DocId,
    pub post_id: DocId,
    pub author_id: UserId,
    pub author_display_name: String,
    pub author_photo_url: Option<String>,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment stamped with the current time
    pub fn new(
        id: DocId,
        post_id: DocId,
        author_id: UserId,
        author_display_name: String,
        author_photo_url: Option<String>,
        body: String,
    ) -> Self {
        Self {
            id,
            post_id,
            author_id,
            author_display_name,
            author_photo_url,
            body,
            timestamp: Utc::now(),
        }
    }

    /// Validate a comment body before submission; blank bodies are rejected
    pub fn validate_body(body: &str) -> Result<(), DomainError> {
        if body.trim().is_empty() {
            return Err(DomainError::EmptyComment);
        }
        Ok(())
    }
}
