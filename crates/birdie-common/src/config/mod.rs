//! Configuration loading

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ChatConfig, ConfigError, Environment, FeedConfig, PreviewCacheConfig,
};
