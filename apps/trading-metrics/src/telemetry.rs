//! Logging setup.
//!
//! The library only emits `tracing` events; binaries and tests that want to
//! see them install a subscriber with [`init_logging`].
//!
//! # Configuration
//!
//! - `RUST_LOG`: filter directives, overriding [`LoggingConfig::level`]
//!
//! # Usage
//!
//! ```rust,ignore
//! use trading_metrics::{config::LoggingConfig, telemetry::init_logging};
//!
//! init_logging(&LoggingConfig::default())?;
//! ```

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Error type for logging initialisation.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Filter directive could not be parsed.
    #[error("invalid log filter '{directive}': {message}")]
    InvalidFilter {
        /// The rejected directive.
        directive: String,
        /// Parser message.
        message: String,
    },
    /// A global subscriber is already installed.
    #[error("failed to initialize tracing subscriber: {0}")]
    SubscriberError(String),
}

/// Build the event filter: `RUST_LOG` when set, the configured level otherwise.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level).map_err(|e| TelemetryError::InvalidFilter {
        directive: config.level.clone(),
        message: e.to_string(),
    })
}

/// Install a global `fmt` subscriber for the configured format.
///
/// Fails instead of panicking when a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.include_target);

    let result = if config.format == "pretty" {
        builder.pretty().try_init()
    } else {
        builder.json().try_init()
    };
    result.map_err(|e| TelemetryError::SubscriberError(e.to_string()))?;

    tracing::debug!(format = %config.format, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_from_level() {
        let config = LoggingConfig {
            level: "trading_metrics=trace".to_string(),
            ..LoggingConfig::default()
        };
        assert!(build_filter(&config).is_ok());
    }

    #[test]
    fn test_init_twice_reports_error() {
        let config = LoggingConfig::default();
        let _ = init_logging(&config);
        let Err(err) = init_logging(&config) else {
            panic!("second init should fail");
        };
        assert!(matches!(err, TelemetryError::SubscriberError(_)));
    }
}
