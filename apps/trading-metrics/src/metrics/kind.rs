//! Closed set of metric variants.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::base::{MetricState, RollingMetric};
use super::{
    BuyHoldReturn, PnL, RollingDrawdown, RollingProfitFactor, RollingSharpe, RollingSortino,
    WinRate,
};
use crate::config::TrackerConfig;

/// Observation stream a metric consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricInput {
    /// PnL of a closed trade.
    TradePnl,
    /// Account equity.
    Equity,
    /// Instrument price.
    Price,
    /// One-step equity return.
    EquityReturn,
}

/// Metric discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Windowed or cumulative PnL.
    Pnl,
    /// Percentage of winning trades.
    WinRate,
    /// Worst peak-to-trough decline.
    MaxDrawdown,
    /// Gross profit over gross loss.
    ProfitFactor,
    /// Annualized Sharpe ratio.
    SharpeRatio,
    /// Annualized Sortino ratio.
    SortinoRatio,
    /// Return from the first observed price.
    BuyHoldReturn,
}

impl MetricKind {
    /// Every kind, in reporting order.
    pub const ALL: [Self; 7] = [
        Self::Pnl,
        Self::WinRate,
        Self::MaxDrawdown,
        Self::ProfitFactor,
        Self::SharpeRatio,
        Self::SortinoRatio,
        Self::BuyHoldReturn,
    ];

    /// Snapshot key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Pnl => "pnl",
            Self::WinRate => "win_rate",
            Self::MaxDrawdown => "max_drawdown",
            Self::ProfitFactor => "profit_factor",
            Self::SharpeRatio => "sharpe_ratio",
            Self::SortinoRatio => "sortino_ratio",
            Self::BuyHoldReturn => "buy_hold_return",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pnl => "PnL",
            Self::WinRate => "Win Rate",
            Self::MaxDrawdown => "Max Drawdown",
            Self::ProfitFactor => "Profit Factor",
            Self::SharpeRatio => "Sharpe Ratio",
            Self::SortinoRatio => "Sortino Ratio",
            Self::BuyHoldReturn => "Buy-Hold Return",
        }
    }

    /// Position in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Observation stream the metric consumes.
    #[must_use]
    pub const fn input(self) -> MetricInput {
        match self {
            Self::Pnl | Self::WinRate | Self::ProfitFactor => MetricInput::TradePnl,
            Self::MaxDrawdown => MetricInput::Equity,
            Self::SharpeRatio | Self::SortinoRatio => MetricInput::EquityReturn,
            Self::BuyHoldReturn => MetricInput::Price,
        }
    }

    /// Whether the metric consumes closed-trade PnL (otherwise equity, price
    /// or return observations).
    #[must_use]
    pub const fn is_trade_based(self) -> bool {
        matches!(self.input(), MetricInput::TradePnl)
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One metric of any kind.
#[derive(Debug, Clone)]
pub enum Metric {
    /// See [`PnL`].
    Pnl(PnL),
    /// See [`WinRate`].
    WinRate(WinRate),
    /// See [`RollingDrawdown`].
    Drawdown(RollingDrawdown),
    /// See [`RollingProfitFactor`].
    ProfitFactor(RollingProfitFactor),
    /// See [`RollingSharpe`].
    Sharpe(RollingSharpe),
    /// See [`RollingSortino`].
    Sortino(RollingSortino),
    /// See [`BuyHoldReturn`].
    BuyHold(BuyHoldReturn),
}

impl Metric {
    /// Build a metric of the given kind from tracker settings.
    ///
    /// Sortino uses `risk_free_rate` as its target return. Buy-and-hold
    /// ignores the period.
    #[must_use]
    pub fn from_config(kind: MetricKind, config: &TrackerConfig) -> Self {
        let period = config.period;
        match kind {
            MetricKind::Pnl => Self::Pnl(PnL::new(period)),
            MetricKind::WinRate => Self::WinRate(WinRate::new(period)),
            MetricKind::MaxDrawdown => Self::Drawdown(RollingDrawdown::new(period)),
            MetricKind::ProfitFactor => Self::ProfitFactor(RollingProfitFactor::new(period)),
            MetricKind::SharpeRatio => Self::Sharpe(RollingSharpe::new(
                period,
                config.risk_free_rate,
                config.periods_per_year,
            )),
            MetricKind::SortinoRatio => Self::Sortino(RollingSortino::new(
                period,
                config.risk_free_rate,
                config.periods_per_year,
            )),
            MetricKind::BuyHoldReturn => Self::BuyHold(BuyHoldReturn::new()),
        }
    }

    /// Discriminant of this metric.
    #[must_use]
    pub const fn kind(&self) -> MetricKind {
        match self {
            Self::Pnl(_) => MetricKind::Pnl,
            Self::WinRate(_) => MetricKind::WinRate,
            Self::Drawdown(_) => MetricKind::MaxDrawdown,
            Self::ProfitFactor(_) => MetricKind::ProfitFactor,
            Self::Sharpe(_) => MetricKind::SharpeRatio,
            Self::Sortino(_) => MetricKind::SortinoRatio,
            Self::BuyHold(_) => MetricKind::BuyHoldReturn,
        }
    }

    fn inner(&self) -> &dyn RollingMetric {
        match self {
            Self::Pnl(m) => m,
            Self::WinRate(m) => m,
            Self::Drawdown(m) => m,
            Self::ProfitFactor(m) => m,
            Self::Sharpe(m) => m,
            Self::Sortino(m) => m,
            Self::BuyHold(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn RollingMetric {
        match self {
            Self::Pnl(m) => m,
            Self::WinRate(m) => m,
            Self::Drawdown(m) => m,
            Self::ProfitFactor(m) => m,
            Self::Sharpe(m) => m,
            Self::Sortino(m) => m,
            Self::BuyHold(m) => m,
        }
    }
}

impl RollingMetric for Metric {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn state(&self) -> &MetricState {
        self.inner().state()
    }

    fn update(&mut self, observation: f64) {
        self.inner_mut().update(observation);
    }

    fn reset(&mut self) {
        self.inner_mut().reset();
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::base::write_summary(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_builds_every_kind() {
        let config = TrackerConfig {
            period: 5,
            risk_free_rate: 0.0,
            periods_per_year: 52,
        };
        for kind in MetricKind::ALL {
            let metric = Metric::from_config(kind, &config);
            assert_eq!(metric.kind(), kind);
            assert!(!metric.is_ready());
            let expected_period = if kind == MetricKind::BuyHoldReturn { 0 } else { 5 };
            assert_eq!(metric.period(), expected_period);
        }
    }

    #[test]
    fn test_dispatch_updates_inner_metric() {
        let mut metric = Metric::from_config(MetricKind::ProfitFactor, &TrackerConfig::default());
        metric.update(200.0);
        metric.update(-100.0);
        assert_eq!(metric.value(), Some(2.0));
        assert_eq!(metric.observation_count(), 2);
        assert_eq!(metric.name(), "RollingProfitFactor");

        metric.reset();
        assert_eq!(metric.value(), None);
        let Metric::ProfitFactor(inner) = &metric else {
            panic!("expected profit factor variant");
        };
        assert_eq!(inner.gross_profit(), 0.0);
    }

    #[test]
    fn test_display_delegates() {
        let mut metric = Metric::from_config(MetricKind::BuyHoldReturn, &TrackerConfig::default());
        metric.update(100.0);
        assert_eq!(
            metric.to_string(),
            "BuyHoldReturn(period=0, value=0.00, ready=true)"
        );
    }

    #[test]
    fn test_index_follows_reporting_order() {
        for (position, kind) in MetricKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), position);
        }
        assert_eq!(MetricKind::MaxDrawdown.input(), MetricInput::Equity);
        assert_eq!(MetricKind::SortinoRatio.input(), MetricInput::EquityReturn);
        assert_eq!(MetricKind::BuyHoldReturn.input(), MetricInput::Price);
    }

    #[test]
    fn test_kind_keys_and_labels() {
        assert_eq!(MetricKind::MaxDrawdown.key(), "max_drawdown");
        assert_eq!(MetricKind::BuyHoldReturn.label(), "Buy-Hold Return");
        assert_eq!(MetricKind::SharpeRatio.to_string(), "sharpe_ratio");
        let trade_based: Vec<_> = MetricKind::ALL
            .into_iter()
            .filter(|k| k.is_trade_based())
            .collect();
        assert_eq!(
            trade_based,
            vec![MetricKind::Pnl, MetricKind::WinRate, MetricKind::ProfitFactor]
        );
    }
}
