//! Sortino ratio calculator.

use std::fmt;

use super::base::{MetricState, RollingMetric, check_finite, write_summary};
use super::math::{OnlineMoments, annualization_factor, downside_sums};
use super::sharpe::DEFAULT_PERIODS_PER_YEAR;
use super::window::RollingWindow;

/// Annualized Sortino ratio over periodic returns.
///
/// `sortino = (mean - target) / downside_dev * sqrt(periods_per_year)` where
/// `downside_dev = sqrt(sum((r - target)^2 for r < target) / downside_n)`.
///
/// The mean follows Welford's algorithm like [`RollingSharpe`]. Downside
/// statistics are incremental until the window fills; after that every
/// eviction rescans the window, because whether the evicted return was a
/// downside observation decides what to subtract. The rescan runs after the
/// new return has entered, so downside figures never lag the window by a step.
///
/// [`RollingSharpe`]: super::sharpe::RollingSharpe
#[derive(Debug, Clone)]
pub struct RollingSortino {
    state: MetricState,
    target_return: f64,
    periods_per_year: u32,
    returns: RollingWindow<f64>,
    moments: OnlineMoments,
    downside_m2: f64,
    downside_n: u64,
}

impl RollingSortino {
    /// Create a Sortino calculator (`period == 0` = global).
    #[must_use]
    pub fn new(period: usize, target_return: f64, periods_per_year: u32) -> Self {
        Self {
            state: MetricState::new(period),
            target_return,
            periods_per_year,
            returns: RollingWindow::new(period),
            moments: OnlineMoments::new(),
            downside_m2: 0.0,
            downside_n: 0,
        }
    }

    /// Return threshold separating downside observations.
    #[must_use]
    pub const fn target_return(&self) -> f64 {
        self.target_return
    }

    /// Mean return over the current window.
    #[must_use]
    pub const fn mean(&self) -> f64 {
        self.moments.mean()
    }

    /// Returns in the current window.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.moments.count()
    }

    /// Sum of squared shortfalls below target in the current window.
    #[must_use]
    pub const fn downside_m2(&self) -> f64 {
        self.downside_m2
    }

    /// Downside observations in the current window.
    #[must_use]
    pub const fn downside_count(&self) -> u64 {
        self.downside_n
    }

    fn ratio(&self) -> Option<f64> {
        if self.moments.count() < 2 || self.downside_n == 0 {
            return None;
        }
        let downside_dev = (self.downside_m2 / self.downside_n as f64).sqrt();
        let excess = self.moments.mean() - self.target_return;
        if downside_dev > 0.0 {
            Some(excess / downside_dev * annualization_factor(self.periods_per_year))
        } else if excess > 0.0 {
            Some(f64::INFINITY)
        } else {
            Some(0.0)
        }
    }
}

impl Default for RollingSortino {
    fn default() -> Self {
        Self::new(0, 0.0, DEFAULT_PERIODS_PER_YEAR)
    }
}

impl RollingMetric for RollingSortino {
    fn name(&self) -> &'static str {
        "RollingSortino"
    }

    fn state(&self) -> &MetricState {
        &self.state
    }

    fn update(&mut self, period_return: f64) {
        check_finite("RollingSortino", period_return);
        self.state.record();

        let evicted = self.returns.push(period_return);
        if let Some(old) = evicted {
            self.moments.remove(old);
        }
        self.moments.add(period_return);

        if evicted.is_some() {
            // O(period) rescan of the window, new return included.
            (self.downside_m2, self.downside_n) =
                downside_sums(self.returns.iter(), self.target_return);
        } else if period_return < self.target_return {
            let shortfall = period_return - self.target_return;
            self.downside_m2 += shortfall * shortfall;
            self.downside_n += 1;
        }

        let value = self.ratio();
        self.state.publish(value, value.is_some());
    }

    fn reset(&mut self) {
        self.state.reset();
        self.returns.clear();
        self.moments = OnlineMoments::new();
        self.downside_m2 = 0.0;
        self.downside_n = 0;
    }
}

impl fmt::Display for RollingSortino {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_summary(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch_sortino(returns: &[f64], target: f64, ppy: u32) -> f64 {
        let mean = returns.iter().sum::<f64>() / returns.len() as f64;
        let downside: Vec<f64> = returns.iter().copied().filter(|r| *r < target).collect();
        let m2: f64 = downside.iter().map(|r| (r - target) * (r - target)).sum();
        let dev = (m2 / downside.len() as f64).sqrt();
        (mean - target) / dev * f64::from(ppy).sqrt()
    }

    #[test]
    fn test_all_upside_never_ready() {
        let mut sortino = RollingSortino::default();
        for r in [0.01, 0.02, 0.03, 0.0] {
            sortino.update(r);
            assert!(!sortino.is_ready());
            assert_eq!(sortino.value(), None);
        }
        assert_eq!(sortino.downside_count(), 0);
    }

    #[test]
    fn test_needs_two_returns_and_one_downside() {
        let mut sortino = RollingSortino::default();
        sortino.update(-0.01);
        assert!(!sortino.is_ready());
        sortino.update(0.03);
        assert!(sortino.is_ready());
        let Some(value) = sortino.value() else {
            panic!("sortino should be ready");
        };
        assert!((value - batch_sortino(&[-0.01, 0.03], 0.0, 252)).abs() < 1e-9);
    }

    #[test]
    fn test_matches_batch_formula() {
        let returns = [0.02, -0.01, 0.015, -0.03, 0.01];
        let mut sortino = RollingSortino::new(0, 0.001, 252);
        for r in returns {
            sortino.update(r);
        }
        let Some(value) = sortino.value() else {
            panic!("sortino should be ready");
        };
        assert!((value - batch_sortino(&returns, 0.001, 252)).abs() < 1e-9);
    }

    #[test]
    fn test_rolling_rescan_tracks_window() {
        let returns = [-0.05, 0.02, 0.01, -0.01, 0.03, 0.02];
        let mut sortino = RollingSortino::new(3, 0.0, 252);
        for r in returns {
            sortino.update(r);
        }
        // window [-0.01, 0.03, 0.02]
        assert_eq!(sortino.count(), 3);
        assert_eq!(sortino.downside_count(), 1);
        assert!((sortino.downside_m2() - 0.0001).abs() < 1e-15);
        let Some(value) = sortino.value() else {
            panic!("sortino should be ready");
        };
        assert!((value - batch_sortino(&returns[3..], 0.0, 252)).abs() < 1e-9);
    }

    #[test]
    fn test_rolling_loses_readiness_when_downside_leaves() {
        let mut sortino = RollingSortino::new(2, 0.0, 252);
        sortino.update(-0.02);
        sortino.update(0.01);
        assert!(sortino.is_ready());
        sortino.update(0.02); // window [0.01, 0.02]
        assert!(!sortino.is_ready());
        assert_eq!(sortino.value(), None);
    }

    #[test]
    fn test_zero_downside_deviation() {
        // Target above every return but shortfalls underflow to zero.
        let mut sortino = RollingSortino::new(0, f64::MIN_POSITIVE, 252);
        sortino.update(0.0);
        sortino.update(0.0);
        assert_eq!(sortino.downside_count(), 2);
        assert_eq!(sortino.value(), Some(0.0));
    }

    #[test]
    fn test_reset() {
        let mut sortino = RollingSortino::new(4, 0.0, 252);
        sortino.update(-0.01);
        sortino.update(0.02);
        sortino.reset();
        assert_eq!(sortino.value(), None);
        assert!(!sortino.is_ready());
        assert_eq!(sortino.count(), 0);
        assert_eq!(sortino.downside_count(), 0);
        assert_eq!(sortino.downside_m2(), 0.0);
    }

    #[test]
    fn test_global_mode_buffers_nothing() {
        let mut sortino = RollingSortino::default();
        for i in 0..10_000 {
            sortino.update(if i % 3 == 0 { -0.01 } else { 0.02 });
        }
        assert!(sortino.returns.is_empty());
        assert_eq!(sortino.count(), 10_000);
        assert_eq!(sortino.downside_count(), 3_334);
    }
}
