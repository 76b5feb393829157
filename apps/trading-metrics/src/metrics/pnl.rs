//! Profit and loss tracker.

use std::fmt;

use super::base::{MetricState, RollingMetric, check_finite, write_summary};
use super::window::RollingWindow;

/// Cumulative and windowed profit and loss over closed trades.
///
/// The lifetime total is always tracked. The reported value is the lifetime
/// total in global mode and the sum of the last `period` trades otherwise.
#[derive(Debug, Clone)]
pub struct PnL {
    state: MetricState,
    cumulative_pnl: f64,
    trades: RollingWindow<f64>,
}

impl PnL {
    /// Create a PnL tracker (`period == 0` = global).
    #[must_use]
    pub fn new(period: usize) -> Self {
        Self {
            state: MetricState::new(period),
            cumulative_pnl: 0.0,
            trades: RollingWindow::new(period),
        }
    }

    /// Lifetime total, regardless of mode.
    #[must_use]
    pub const fn cumulative(&self) -> f64 {
        self.cumulative_pnl
    }

    /// Windowed total, `0.0` before the first trade.
    #[must_use]
    pub fn rolling(&self) -> f64 {
        self.state.value().unwrap_or(0.0)
    }

    /// Trades currently in the window, oldest first. Empty in global mode.
    pub fn trades(&self) -> impl Iterator<Item = f64> + '_ {
        self.trades.iter()
    }
}

impl Default for PnL {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RollingMetric for PnL {
    fn name(&self) -> &'static str {
        "PnL"
    }

    fn state(&self) -> &MetricState {
        &self.state
    }

    fn update(&mut self, pnl: f64) {
        check_finite("PnL", pnl);
        self.state.record();
        self.cumulative_pnl += pnl;
        self.trades.push(pnl);

        let value = if self.state.is_global() {
            self.cumulative_pnl
        } else {
            // O(period): summed from the window on every update.
            self.trades.sum()
        };

        self.state.publish(Some(value), true);
    }

    fn reset(&mut self) {
        self.state.reset();
        self.cumulative_pnl = 0.0;
        self.trades.clear();
    }
}

impl fmt::Display for PnL {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_summary(self, f)
    }
}
