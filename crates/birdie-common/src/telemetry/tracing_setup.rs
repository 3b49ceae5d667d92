//! Tracing subscriber setup
//!
//! Output shape follows the runtime environment: human-readable lines with
//! span open/close events during development, JSON without source locations
//! in production. `RUST_LOG` overrides the level filter when set.

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::Environment;

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Fallback level when `RUST_LOG` is not set
    pub level: Level,
    /// Emit JSON instead of human-readable lines
    pub json: bool,
    /// Emit span new/close events
    pub span_events: bool,
    /// Annotate events with file and line
    pub file_line: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::Development)
    }
}

impl TracingConfig {
    /// The preset for a runtime environment
    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        if env.is_production() {
            Self {
                level: Level::INFO,
                json: true,
                span_events: false,
                file_line: false,
            }
        } else {
            Self {
                level: Level::DEBUG,
                json: false,
                span_events: true,
                file_line: true,
            }
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.to_string()))
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Install this configuration as the global subscriber.
    ///
    /// # Panics
    /// Panics if a global subscriber is already set.
    pub fn init(self) {
        let events = self.span_events();
        if self.json {
            tracing_subscriber::registry()
                .with(self.env_filter())
                .with(
                    fmt::layer()
                        .json()
                        .with_file(self.file_line)
                        .with_line_number(self.file_line)
                        .with_span_events(events),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(self.env_filter())
                .with(
                    fmt::layer()
                        .with_file(self.file_line)
                        .with_line_number(self.file_line)
                        .with_span_events(events),
                )
                .init();
        }
    }

    /// Install this configuration, tolerating an already-set subscriber.
    /// Tests that set up tracing more than once go through here.
    pub fn try_init(self) -> Result<(), TracingError> {
        let events = self.span_events();
        tracing_subscriber::registry()
            .with(self.env_filter())
            .with(
                fmt::layer()
                    .with_file(self.file_line)
                    .with_line_number(self.file_line)
                    .with_span_events(events),
            )
            .try_init()
            .map_err(|_| TracingError::AlreadyInitialized)
    }
}

/// Install the preset for `env` as the global subscriber.
///
/// # Panics
/// Panics if a global subscriber is already set.
pub fn init_tracing(env: Environment) {
    TracingConfig::for_environment(env).init();
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}
