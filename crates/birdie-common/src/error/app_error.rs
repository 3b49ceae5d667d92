//! Application error types
//!
//! Unified error handling for the whole application. Failures are caught at
//! the operation boundary and converted into a transient user-visible
//! `Notice`; nothing propagates to the rendering layer as an unhandled fault.

use birdie_core::DomainError;
use serde::Serialize;
use std::fmt;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    // Authorization
    #[error("Not allowed")]
    NotAllowed,

    // Backing store errors
    #[error("Store error: {0}")]
    Store(String),

    // Object storage errors
    #[error("Media storage error: {0}")]
    Media(String),

    // External service errors (chat SDK, token minting)
    #[error("External service error: {0}")]
    ExternalService(String),

    // Internal errors
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get error code for notices and logs
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::NotAllowed => "NOT_ALLOWED",
            Self::Store(_) => "STORE_ERROR",
            Self::Media(_) => "MEDIA_ERROR",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Check if this error was caused by the user's own input or action
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::Validation(_) | Self::InvalidInput(_) | Self::NotAllowed => true,
            Self::Domain(e) => e.is_validation() || e.is_authorization(),
            _ => false,
        }
    }

    /// Check if retrying the same action later could succeed
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Store(_) | Self::Media(_) | Self::ExternalService(_) => true,
            Self::Domain(e) => e.is_infrastructure(),
            _ => false,
        }
    }

    /// Create a not found error for a resource type
    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(msg: impl fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Create an internal error from any error
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        Self::Internal(err.into())
    }
}

/// Transient notification shown to the user when an operation fails
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub code: String,
    pub message: String,
    /// Whether scrolling / resubmitting may succeed
    pub retryable: bool,
}

impl From<&AppError> for Notice {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.to_string(),
            retryable: err.is_transient(),
        }
    }
}

impl From<AppError> for Notice {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
