//! Chat boundary errors

use birdie_common::AppError;

/// Errors crossing the chat SDK boundary
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Chat authentication failed: {0}")]
    Auth(String),

    #[error("Chat transport error: {0}")]
    Transport(String),

    #[error("Chat session is disconnected")]
    Disconnected,

    #[error("Store error: {0}")]
    Store(#[from] birdie_core::DomainError),
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Store(e) => AppError::Domain(e),
            other => AppError::ExternalService(other.to_string()),
        }
    }
}

/// Result type for chat boundary operations
pub type ChatResult<T> = Result<T, ChatError>;
