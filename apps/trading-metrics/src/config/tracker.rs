//! Metrics tracker configuration.

use serde::{Deserialize, Serialize};

/// Settings shared by every metric a tracker owns. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Window size; `0` tracks the whole history.
    #[serde(default)]
    pub period: usize,
    /// Per-period risk-free rate for Sharpe; also the Sortino target return.
    #[serde(default)]
    pub risk_free_rate: f64,
    /// Annualization factor (252 for daily trading-day returns).
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            period: 0,
            risk_free_rate: 0.0,
            periods_per_year: default_periods_per_year(),
        }
    }
}

impl TrackerConfig {
    /// Rolling configuration over the last `period` observations.
    #[must_use]
    pub fn rolling(period: usize) -> Self {
        Self {
            period,
            ..Self::default()
        }
    }

    /// Set the risk-free rate.
    #[must_use]
    pub const fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Set the annualization factor.
    #[must_use]
    pub const fn with_periods_per_year(mut self, periods: u32) -> Self {
        self.periods_per_year = periods;
        self
    }

    /// Whether the tracker runs over the whole history.
    #[must_use]
    pub const fn is_global(&self) -> bool {
        self.period == 0
    }

    /// Check the values, returning a description of the first problem.
    pub fn validate(&self) -> Result<(), String> {
        if self.periods_per_year == 0 {
            return Err("periods_per_year must be positive".to_string());
        }
        if !self.risk_free_rate.is_finite() {
            return Err("risk_free_rate must be finite".to_string());
        }
        Ok(())
    }
}

const fn default_periods_per_year() -> u32 {
    252
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.period, 0);
        assert_eq!(config.risk_free_rate, 0.0);
        assert_eq!(config.periods_per_year, 252);
        assert!(config.is_global());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = TrackerConfig::rolling(20)
            .with_risk_free_rate(0.0001)
            .with_periods_per_year(52);
        assert_eq!(config.period, 20);
        assert!(!config.is_global());
        assert_eq!(config.periods_per_year, 52);
    }

    #[test]
    fn test_validate_rejects_zero_periods() {
        let Err(msg) = TrackerConfig::default().with_periods_per_year(0).validate() else {
            panic!("zero periods_per_year should be rejected");
        };
        assert!(msg.contains("periods_per_year"));
    }

    #[test]
    fn test_validate_rejects_nan_rate() {
        let result = TrackerConfig::default()
            .with_risk_free_rate(f64::NAN)
            .validate();
        assert!(result.is_err());
    }
}
