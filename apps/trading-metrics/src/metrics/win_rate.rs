//! Win rate tracker.

use std::fmt;

use super::base::{MetricState, RollingMetric, check_finite, write_summary};
use super::window::RollingWindow;

/// Percentage of profitable trades.
///
/// A trade is a win only when its PnL is strictly positive; a flat trade
/// counts as a loss.
#[derive(Debug, Clone)]
pub struct WinRate {
    state: MetricState,
    outcomes: RollingWindow<bool>,
    wins: u64,
    total: u64,
}

impl WinRate {
    /// Create a win rate tracker (`period == 0` = global).
    #[must_use]
    pub fn new(period: usize) -> Self {
        Self {
            state: MetricState::new(period),
            outcomes: RollingWindow::new(period),
            wins: 0,
            total: 0,
        }
    }

    /// Wins in the current window.
    #[must_use]
    pub const fn wins(&self) -> u64 {
        self.wins
    }

    /// Trades in the current window.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }
}

impl Default for WinRate {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RollingMetric for WinRate {
    fn name(&self) -> &'static str {
        "WinRate"
    }

    fn state(&self) -> &MetricState {
        &self.state
    }

    fn update(&mut self, pnl: f64) {
        check_finite("WinRate", pnl);
        self.state.record();
        let is_win = pnl > 0.0;

        if let Some(evicted_win) = self.outcomes.push(is_win) {
            if evicted_win {
                self.wins -= 1;
            }
            self.total -= 1;
        }
        if is_win {
            self.wins += 1;
        }
        self.total += 1;

        let value = if self.total > 0 {
            self.wins as f64 / self.total as f64 * 100.0
        } else {
            0.0
        };
        self.state.publish(Some(value), self.total > 0);
    }

    fn reset(&mut self) {
        self.state.reset();
        self.outcomes.clear();
        self.wins = 0;
        self.total = 0;
    }
}

impl fmt::Display for WinRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_summary(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    #[test]
    fn test_all_wins() {
        let mut wr = WinRate::default();
        for _ in 0..5 {
            wr.update(100.0);
        }
        assert_eq!(wr.value(), Some(100.0));
    }

    #[test]
    fn test_all_losses() {
        let mut wr = WinRate::default();
        for _ in 0..5 {
            wr.update(-100.0);
        }
        assert_eq!(wr.value(), Some(0.0));
    }

    #[test]
    fn test_mixed_trades() {
        let mut wr = WinRate::default();
        wr.update(100.0);
        wr.update(-50.0);
        wr.update(200.0);
        wr.update(-10.0);
        assert_eq!(wr.value(), Some(50.0));
        assert_eq!((wr.wins(), wr.total()), (2, 4));
    }

    #[test]
    fn test_rolling_mode_drops_oldest() {
        let mut wr = WinRate::new(3);
        wr.update(100.0); // [W]
        wr.update(-50.0); // [W, L]
        wr.update(200.0); // [W, L, W]
        assert!(approx(wr.value(), 200.0 / 3.0));

        wr.update(-10.0); // [L, W, L]
        assert!(approx(wr.value(), 100.0 / 3.0));
        assert_eq!((wr.wins(), wr.total()), (1, 3));
        assert_eq!(wr.observation_count(), 4);
    }

    #[test]
    fn test_zero_pnl_is_loss() {
        let mut wr = WinRate::default();
        wr.update(0.0);
        assert_eq!(wr.value(), Some(0.0));
        assert_eq!(wr.wins(), 0);
        assert!(wr.is_ready());
    }

    #[test]
    fn test_reset() {
        let mut wr = WinRate::new(2);
        wr.update(100.0);
        wr.update(100.0);
        wr.update(-1.0);
        wr.reset();
        assert_eq!((wr.wins(), wr.total()), (0, 0));
        assert!(!wr.is_ready());
        assert_eq!(wr.value(), None);
    }

    #[test]
    fn test_global_mode_buffers_nothing() {
        let mut wr = WinRate::new(0);
        for pnl in [10.0, -5.0, 0.0, 7.0] {
            wr.update(pnl);
        }
        assert!(wr.outcomes.is_empty());
        assert_eq!(wr.wins(), 2);
        assert_eq!(wr.total(), 4);
    }
}
