//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{DocId, UserId};

/// Domain layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Post not found: {0}")]
    PostNotFound(DocId),

    #[error("Profile not found: {0}")]
    ProfileNotFound(UserId),

    #[error("Comment not found: {0}")]
    CommentNotFound(DocId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Post body must not be empty")]
    EmptyBody,

    #[error("Post body too long: max {max} characters")]
    BodyTooLong { max: usize },

    #[error("Comment body must not be empty")]
    EmptyComment,

    #[error("Invalid golf round: {0}")]
    InvalidRound(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only the post's author may delete it")]
    NotPostAuthor,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Store error: {0}")]
    Store(String),

    #[error("Comment subscription closed")]
    SubscriptionClosed,

    #[error("Media storage error: {0}")]
    Media(String),
}

impl DomainError {
    /// Get an error code string for surfacing to the presentation layer
    pub fn code(&self) -> &'static str {
        match self {
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::ProfileNotFound(_) => "UNKNOWN_PROFILE",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::EmptyBody => "EMPTY_BODY",
            Self::BodyTooLong { .. } => "BODY_TOO_LONG",
            Self::EmptyComment => "EMPTY_COMMENT",
            Self::InvalidRound(_) => "INVALID_ROUND",
            Self::NotPostAuthor => "NOT_POST_AUTHOR",
            Self::Store(_) => "STORE_ERROR",
            Self::SubscriptionClosed => "SUBSCRIPTION_CLOSED",
            Self::Media(_) => "MEDIA_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PostNotFound(_) | Self::ProfileNotFound(_) | Self::CommentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyBody | Self::BodyTooLong { .. } | Self::EmptyComment | Self::InvalidRound(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotPostAuthor)
    }

    /// Check if this error came from the backing store or media storage
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::Store(_) | Self::SubscriptionClosed | Self::Media(_)
        )
    }
}
