//! Logging bootstrap built on `tracing-subscriber`.
//!
//! The capability layer itself only emits `tracing` events; wiring them to an
//! output is the host application's call. This module gives embedders a small
//! configuration surface for the common cases: pick a format, a level, and
//! optionally a module filter string.
//!
//! ```ignore
//! use restkit::logging::{init_logging, LogFormat, LoggingConfig};
//!
//! let config = LoggingConfig::default()
//!     .with_format(LogFormat::Compact)
//!     .with_filter("platform_core=debug");
//! init_logging(config).expect("Failed to initialize logging");
//! ```

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::filter::EnvFilter;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors.
    Pretty,
    /// Structured JSON format for machine parsing.
    Json,
    /// Compact format for production.
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Json;
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Minimum log level.
    pub level: Level,
    /// Custom filter string (e.g., "platform_core=debug").
    pub filter: Option<String>,
    /// Display target module in logs.
    pub display_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: Level::INFO,
            filter: None,
            display_target: true,
        }
    }
}

impl LoggingConfig {
    /// Set log format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set minimum log level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set custom filter string.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Display target module in logs.
    pub fn with_target(mut self, display: bool) -> Self {
        self.display_target = display;
        self
    }
}

/// Failure while installing the global subscriber.
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Logging initialization failed: {0}")]
    Init(String),
}

/// Install the global `tracing` subscriber described by `config`.
///
/// Fails if a global subscriber is already set, which is fine for embedders
/// that configure tracing themselves.
pub fn init_logging(config: LoggingConfig) -> Result<(), LoggingError> {
    let filter = match &config.filter {
        Some(directives) => {
            EnvFilter::try_new(directives).map_err(|e| LoggingError::Init(e.to_string()))?
        }
        None => EnvFilter::default().add_directive(config.level.into()),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.display_target);

    let result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    result.map_err(|e| LoggingError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = LoggingConfig::default()
            .with_format(LogFormat::Compact)
            .with_level(Level::DEBUG)
            .with_filter("platform_core=trace")
            .with_target(false);

        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.level, Level::DEBUG);
        assert_eq!(config.filter.as_deref(), Some("platform_core=trace"));
        assert!(!config.display_target);
    }

    #[test]
    fn test_init_logging_once() {
        // First initialization in this process wins; a second must error
        // instead of panicking.
        let first = init_logging(LoggingConfig::default().with_format(LogFormat::Compact));
        let second = init_logging(LoggingConfig::default());

        assert!(first.is_ok());
        assert!(matches!(second, Err(LoggingError::Init(_))));
    }

    #[test]
    fn test_invalid_filter_is_reported() {
        let config = LoggingConfig::default().with_filter("not==a==filter");
        assert!(matches!(
            init_logging(config),
            Err(LoggingError::Init(_))
        ));
    }
}
