//! Application configuration structs
//!
//! Loads configuration from environment variables (with a `.env` file for
//! local development).

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub feed: FeedConfig,
    pub chat: ChatConfig,
    pub preview_cache: PreviewCacheConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Feed pagination configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Fixed page size for feed fetches
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Scroll-proximity trigger: load more when the remaining scroll
    /// distance drops below `client_height * threshold`
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            scroll_threshold: default_scroll_threshold(),
        }
    }
}

/// Chat SDK configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Vendor API key
    pub api_key: String,
    /// Per-channel listing limit
    #[serde(default = "default_channel_limit")]
    pub channel_limit: usize,
}

/// Channel-preview user cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewCacheConfig {
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for PreviewCacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl_secs(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "birdie".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_page_size() -> usize {
    5
}

fn default_scroll_threshold() -> f64 {
    1.5
}

fn default_channel_limit() -> usize {
    10
}

fn default_cache_capacity() -> usize {
    256
}

fn default_cache_ttl_secs() -> u64 {
    300
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            feed: FeedConfig {
                page_size: env::var("FEED_PAGE_SIZE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_page_size),
                scroll_threshold: env::var("FEED_SCROLL_THRESHOLD")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_scroll_threshold),
            },
            chat: ChatConfig {
                api_key: env::var("CHAT_API_KEY")
                    .map_err(|_| ConfigError::MissingVar("CHAT_API_KEY"))?,
                channel_limit: env::var("CHAT_CHANNEL_LIMIT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_channel_limit),
            },
            preview_cache: PreviewCacheConfig {
                capacity: env::var("PREVIEW_CACHE_CAPACITY")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_cache_capacity),
                ttl_secs: env::var("PREVIEW_CACHE_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_cache_ttl_secs),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
