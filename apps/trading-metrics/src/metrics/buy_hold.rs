//! Buy-and-hold return calculator.

use std::fmt;

use super::base::{MetricState, RollingMetric, check_finite, write_summary};

/// Percentage return from the first observed price. Always global.
#[derive(Debug, Clone)]
pub struct BuyHoldReturn {
    state: MetricState,
    start_price: Option<f64>,
}

impl BuyHoldReturn {
    /// Create a buy-and-hold calculator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: MetricState::new(0),
            start_price: None,
        }
    }

    /// First price seen since construction or the last reset.
    #[must_use]
    pub const fn start_price(&self) -> Option<f64> {
        self.start_price
    }
}

impl Default for BuyHoldReturn {
    fn default() -> Self {
        Self::new()
    }
}

impl RollingMetric for BuyHoldReturn {
    fn name(&self) -> &'static str {
        "BuyHoldReturn"
    }

    fn state(&self) -> &MetricState {
        &self.state
    }

    fn update(&mut self, price: f64) {
        check_finite("BuyHoldReturn", price);
        self.state.record();

        let value = match self.start_price {
            None => {
                self.start_price = Some(price);
                0.0
            }
            Some(start) if start != 0.0 => (price / start - 1.0) * 100.0,
            Some(_) => {
                tracing::warn!(price, "buy-and-hold start price is zero, return held at 0");
                0.0
            }
        };

        self.state.publish(Some(value), true);
    }

    fn reset(&mut self) {
        self.state.reset();
        self.start_price = None;
    }
}

impl fmt::Display for BuyHoldReturn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_summary(self, f)
    }
}
