//! # birdie-common
//!
//! Shared utilities including configuration, error handling, and telemetry.

pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{
    AppConfig, AppSettings, ChatConfig, ConfigError, Environment, FeedConfig, PreviewCacheConfig,
};
pub use error::{AppError, AppResult, Notice};
pub use telemetry::{init_tracing, TracingConfig, TracingError};
