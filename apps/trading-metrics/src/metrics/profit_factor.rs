//! Profit factor calculator.

use std::fmt;

use super::base::{MetricState, RollingMetric, check_finite, write_summary};
use super::window::RollingWindow;

/// Ratio of gross profit to gross loss.
///
/// Positive trades add to gross profit; zero and negative trades add their
/// absolute value to gross loss. With no losses the factor is `+inf` when
/// there is any profit and `0.0` otherwise.
#[derive(Debug, Clone)]
pub struct RollingProfitFactor {
    state: MetricState,
    trades: RollingWindow<f64>,
    gross_profit: f64,
    gross_loss: f64,
    profit_trades: u64,
    loss_trades: u64,
}

impl RollingProfitFactor {
    /// Create a profit factor calculator (`period == 0` = global).
    #[must_use]
    pub fn new(period: usize) -> Self {
        Self {
            state: MetricState::new(period),
            trades: RollingWindow::new(period),
            gross_profit: 0.0,
            gross_loss: 0.0,
            profit_trades: 0,
            loss_trades: 0,
        }
    }

    /// Gross profit over the current window.
    #[must_use]
    pub const fn gross_profit(&self) -> f64 {
        self.gross_profit
    }

    /// Gross loss (positive) over the current window.
    #[must_use]
    pub const fn gross_loss(&self) -> f64 {
        self.gross_loss
    }

    fn add(&mut self, pnl: f64) {
        if pnl > 0.0 {
            self.gross_profit += pnl;
            self.profit_trades += 1;
        } else {
            self.gross_loss += pnl.abs();
            self.loss_trades += 1;
        }
    }

    fn remove(&mut self, pnl: f64) {
        if pnl > 0.0 {
            self.gross_profit -= pnl;
            self.profit_trades -= 1;
            if self.profit_trades == 0 {
                self.gross_profit = 0.0;
            }
        } else {
            self.gross_loss -= pnl.abs();
            self.loss_trades -= 1;
            if self.loss_trades == 0 {
                self.gross_loss = 0.0;
            }
        }
    }

    fn factor(&self) -> f64 {
        if self.gross_loss > 0.0 {
            self.gross_profit / self.gross_loss
        } else if self.gross_profit > 0.0 {
            f64::INFINITY
        } else {
            0.0
        }
    }
}

impl Default for RollingProfitFactor {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RollingMetric for RollingProfitFactor {
    fn name(&self) -> &'static str {
        "RollingProfitFactor"
    }

    fn state(&self) -> &MetricState {
        &self.state
    }

    fn update(&mut self, pnl: f64) {
        check_finite("RollingProfitFactor", pnl);
        self.state.record();

        if let Some(evicted) = self.trades.push(pnl) {
            self.remove(evicted);
        }
        self.add(pnl);

        self.state.publish(Some(self.factor()), true);
    }

    fn reset(&mut self) {
        self.state.reset();
        self.trades.clear();
        self.gross_profit = 0.0;
        self.gross_loss = 0.0;
        self.profit_trades = 0;
        self.loss_trades = 0;
    }
}

impl fmt::Display for RollingProfitFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_summary(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_profit_factor() {
        let mut pf = RollingProfitFactor::default();
        pf.update(200.0);
        pf.update(-100.0);
        assert_eq!(pf.value(), Some(2.0));
    }

    #[test]
    fn test_only_profits_is_infinite() {
        let mut pf = RollingProfitFactor::default();
        pf.update(100.0);
        pf.update(50.0);
        assert_eq!(pf.value(), Some(f64::INFINITY));
        assert_eq!(pf.fmt_value(), "inf");
    }

    #[test]
    fn test_only_losses_is_zero() {
        let mut pf = RollingProfitFactor::default();
        pf.update(-100.0);
        pf.update(-50.0);
        assert_eq!(pf.value(), Some(0.0));
        assert_eq!(pf.gross_loss(), 150.0);
    }

    #[test]
    fn test_flat_trade_is_zero_factor() {
        let mut pf = RollingProfitFactor::default();
        pf.update(0.0);
        assert_eq!(pf.value(), Some(0.0));
        assert!(pf.is_ready());
    }

    #[test]
    fn test_rolling_eviction() {
        let mut pf = RollingProfitFactor::new(2);
        pf.update(300.0);
        pf.update(-100.0);
        assert_eq!(pf.value(), Some(3.0));

        pf.update(50.0); // window [-100, 50]
        assert_eq!(pf.gross_profit(), 50.0);
        assert_eq!(pf.gross_loss(), 100.0);
        assert_eq!(pf.value(), Some(0.5));

        pf.update(25.0); // window [50, 25], last loss evicted
        assert_eq!(pf.gross_loss(), 0.0);
        assert_eq!(pf.value(), Some(f64::INFINITY));
    }

    #[test]
    fn test_evicting_last_loss_clears_rounding() {
        let mut pf = RollingProfitFactor::new(3);
        pf.update(-0.1);
        pf.update(-0.2);
        pf.update(1.0);
        pf.update(1.0);
        pf.update(1.0);
        assert_eq!(pf.gross_loss(), 0.0);
        assert_eq!(pf.value(), Some(f64::INFINITY));
    }

    #[test]
    fn test_reset() {
        let mut pf = RollingProfitFactor::new(5);
        pf.update(10.0);
        pf.update(-5.0);
        pf.reset();
        assert_eq!(pf.value(), None);
        assert!(!pf.is_ready());
        assert_eq!(pf.gross_profit(), 0.0);
        assert_eq!(pf.gross_loss(), 0.0);
    }

    #[test]
    fn test_global_mode_buffers_nothing() {
        let mut pf = RollingProfitFactor::new(0);
        for pnl in [300.0, -100.0, 50.0, -50.0] {
            pf.update(pnl);
        }
        assert!(pf.trades.is_empty());
        assert_eq!(pf.value(), Some(350.0 / 150.0));
    }
}
