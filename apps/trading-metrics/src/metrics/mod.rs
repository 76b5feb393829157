//! Online performance metrics.
//!
//! Every metric consumes a stream of scalar observations and keeps O(1)
//! or O(window) running state:
//! - PnL (cumulative and windowed)
//! - Win rate
//! - Maximum drawdown
//! - Profit factor (gross profit / gross loss)
//! - Sharpe ratio (Welford mean/variance)
//! - Sortino ratio (downside deviation)
//! - Buy-and-hold return
//!
//! A period of `0` selects global mode (whole history); a positive period
//! restricts the statistic to the most recent `period` observations.

mod base;
mod buy_hold;
mod drawdown;
mod format;
mod kind;
mod math;
mod pnl;
mod profit_factor;
mod sharpe;
mod sortino;
mod window;
mod win_rate;

pub use base::{MetricState, RollingMetric};
pub use buy_hold::BuyHoldReturn;
pub use drawdown::RollingDrawdown;
pub use format::{UNSET, format_metric, format_value};
pub use kind::{Metric, MetricInput, MetricKind};
pub use math::OnlineMoments;
pub use pnl::PnL;
pub use profit_factor::RollingProfitFactor;
pub use sharpe::{DEFAULT_PERIODS_PER_YEAR, RollingSharpe};
pub use sortino::RollingSortino;
pub use win_rate::WinRate;
pub use window::RollingWindow;
