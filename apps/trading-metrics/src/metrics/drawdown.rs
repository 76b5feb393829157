//! Maximum drawdown calculator.

use std::fmt;

use super::base::{MetricState, RollingMetric, check_finite, write_summary};
use super::window::RollingWindow;

/// Largest peak-to-trough equity decline, as a negative percentage.
///
/// In global mode the peak is the all-time high. In rolling mode the peak is
/// the highest equity in the current window, recomputed on every update.
/// The reported maximum is the worst drawdown ever observed in either mode:
/// it is never relaxed when the window slides past the trough.
#[derive(Debug, Clone)]
pub struct RollingDrawdown {
    state: MetricState,
    equity: RollingWindow<f64>,
    peak: f64,
    current_drawdown: f64,
    max_drawdown: f64,
}

impl RollingDrawdown {
    /// Create a drawdown calculator (`period == 0` = global).
    #[must_use]
    pub fn new(period: usize) -> Self {
        Self {
            state: MetricState::new(period),
            equity: RollingWindow::new(period),
            peak: 0.0,
            current_drawdown: 0.0,
            max_drawdown: 0.0,
        }
    }

    /// Peak equity the latest drawdown was measured against.
    #[must_use]
    pub const fn peak(&self) -> f64 {
        self.peak
    }

    /// Drawdown of the latest observation.
    #[must_use]
    pub const fn current_drawdown(&self) -> f64 {
        self.current_drawdown
    }

    /// Worst drawdown observed so far.
    #[must_use]
    pub const fn max_drawdown(&self) -> f64 {
        self.max_drawdown
    }
}

impl Default for RollingDrawdown {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RollingMetric for RollingDrawdown {
    fn name(&self) -> &'static str {
        "RollingDrawdown"
    }

    fn state(&self) -> &MetricState {
        &self.state
    }

    fn update(&mut self, equity: f64) {
        check_finite("RollingDrawdown", equity);
        self.state.record();
        self.equity.push(equity);

        self.peak = if self.state.is_global() {
            self.peak.max(equity)
        } else {
            // O(period) rescan: the peak must come from the window only.
            self.equity.max().unwrap_or(equity)
        };

        // Equity never above zero leaves the drawdown undefined.
        if self.peak > 0.0 {
            self.current_drawdown = (equity - self.peak) / self.peak * 100.0;
            self.max_drawdown = self.max_drawdown.min(self.current_drawdown);
        }

        self.state.publish(Some(self.max_drawdown), true);
    }

    fn reset(&mut self) {
        self.state.reset();
        self.equity.clear();
        self.peak = 0.0;
        self.current_drawdown = 0.0;
        self.max_drawdown = 0.0;
    }
}

impl fmt::Display for RollingDrawdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_summary(self, f)
    }
}
