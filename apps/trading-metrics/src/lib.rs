// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_collect
    )
)]

//! Trading Metrics - Online Performance Metrics
//!
//! Single-pass rolling and global statistics for a strategy-execution loop.
//!
//! # Architecture
//!
//! - `metrics`: one type per statistic behind the [`RollingMetric`] interface
//!   - PnL, win rate, drawdown, profit factor (trade and equity streams)
//!   - Sharpe and Sortino (Welford mean/variance over periodic returns)
//!   - Buy-and-hold return
//!   - [`Metric`]: the closed set of variants for dynamic use
//! - `tracker`: [`MetricsTracker`] routes trade and equity events to every
//!   metric and produces [`MetricsSnapshot`]s
//! - `config`: YAML configuration with environment interpolation
//! - `telemetry`: `tracing` subscriber setup
//!
//! # Example
//!
//! ```
//! use trading_metrics::MetricsTracker;
//!
//! let mut tracker = MetricsTracker::default();
//! tracker.update_from_trade(100.0);
//! tracker.update_from_trade(-50.0);
//!
//! let snapshot = tracker.snapshot();
//! assert_eq!(snapshot.pnl, Some(50.0));
//! assert_eq!(snapshot.win_rate, Some(50.0));
//! assert_eq!(snapshot.profit_factor, Some(2.0));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Configuration loading and validation.
pub mod config;

/// Error types.
pub mod error;

/// Metric implementations.
pub mod metrics;

/// Logging setup.
pub mod telemetry;

/// Unified metrics tracker.
pub mod tracker;

pub use config::{Config, ConfigError, LoggingConfig, TrackerConfig, load_config};
pub use error::{MetricsError, Result};
pub use metrics::{
    BuyHoldReturn, Metric, MetricInput, MetricKind, PnL, RollingDrawdown, RollingMetric,
    RollingProfitFactor, RollingSharpe, RollingSortino, WinRate, format_metric,
};
pub use tracker::{MetricsSnapshot, MetricsTracker};
