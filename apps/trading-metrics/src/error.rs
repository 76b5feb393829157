//! Error types for the metrics library.
//!
//! Feeding observations never fails: degenerate inputs map to documented
//! sentinel values. Errors only arise when building a tracker from invalid
//! settings or loading configuration.

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for metrics operations.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Errors raised while constructing or configuring metrics.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Invalid construction parameter.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl MetricsError {
    /// Create an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = MetricsError::invalid_parameter("periods_per_year", "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'periods_per_year': must be positive"
        );
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err = MetricsError::from(ConfigError::ValidationError("bad".to_string()));
        assert_eq!(err.to_string(), "Config validation failed: bad");
    }
}
