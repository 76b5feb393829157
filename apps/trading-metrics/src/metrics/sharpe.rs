//! Sharpe ratio calculator.

use std::fmt;

use super::base::{MetricState, RollingMetric, check_finite, write_summary};
use super::math::{OnlineMoments, annualization_factor};
use super::window::RollingWindow;

/// Default annualization factor (daily trading-day returns).
pub const DEFAULT_PERIODS_PER_YEAR: u32 = 252;

/// Annualized Sharpe ratio over periodic returns.
///
/// `sharpe = (mean - risk_free_rate) / sample_std_dev * sqrt(periods_per_year)`
///
/// Mean and variance are maintained with Welford's algorithm. In rolling
/// mode the oldest return leaves through the reverse Welford step, so each
/// update is O(1). The ratio needs at least two returns; with zero variance
/// it is reported as `0.0`.
#[derive(Debug, Clone)]
pub struct RollingSharpe {
    state: MetricState,
    risk_free_rate: f64,
    periods_per_year: u32,
    returns: RollingWindow<f64>,
    moments: OnlineMoments,
}

impl RollingSharpe {
    /// Create a Sharpe calculator (`period == 0` = global).
    ///
    /// `risk_free_rate` is per period, in the same units as the returns.
    #[must_use]
    pub fn new(period: usize, risk_free_rate: f64, periods_per_year: u32) -> Self {
        Self {
            state: MetricState::new(period),
            risk_free_rate,
            periods_per_year,
            returns: RollingWindow::new(period),
            moments: OnlineMoments::new(),
        }
    }

    /// Risk-free rate subtracted from the mean return.
    #[must_use]
    pub const fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Annualization factor.
    #[must_use]
    pub const fn periods_per_year(&self) -> u32 {
        self.periods_per_year
    }

    /// Welford accumulator over the current window.
    #[must_use]
    pub const fn moments(&self) -> &OnlineMoments {
        &self.moments
    }

    fn ratio(&self) -> Option<f64> {
        let std_dev = self.moments.sample_std_dev()?;
        if std_dev > 0.0 {
            let sharpe = (self.moments.mean() - self.risk_free_rate) / std_dev;
            Some(sharpe * annualization_factor(self.periods_per_year))
        } else {
            Some(0.0)
        }
    }
}

impl Default for RollingSharpe {
    fn default() -> Self {
        Self::new(0, 0.0, DEFAULT_PERIODS_PER_YEAR)
    }
}

impl RollingMetric for RollingSharpe {
    fn name(&self) -> &'static str {
        "RollingSharpe"
    }

    fn state(&self) -> &MetricState {
        &self.state
    }

    fn update(&mut self, period_return: f64) {
        check_finite("RollingSharpe", period_return);
        self.state.record();

        if let Some(evicted) = self.returns.push(period_return) {
            self.moments.remove(evicted);
        }
        self.moments.add(period_return);

        let value = self.ratio();
        self.state.publish(value, value.is_some());
    }

    fn reset(&mut self) {
        self.state.reset();
        self.returns.clear();
        self.moments = OnlineMoments::new();
    }
}

impl fmt::Display for RollingSharpe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_summary(self, f)
    }
}
