//! Unified tracker routing trade and equity events to every metric.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::TrackerConfig;
use crate::error::{MetricsError, Result};
use crate::metrics::{Metric, MetricInput, MetricKind, RollingMetric, format_metric};

/// Owns one instance of each metric and fans events out to them.
///
/// - Closed trades feed PnL, win rate and profit factor.
/// - Equity updates feed drawdown and buy-and-hold, and, when the caller
///   supplies the previous equity, the Sharpe and Sortino ratios.
///
/// Metrics are held as the closed [`Metric`] set in [`MetricKind::ALL`]
/// order and routed by [`MetricKind::input`].
///
/// The tracker keeps no memory of earlier equity values; callers pass the
/// previous equity explicitly. Instances are single-writer: share one across
/// threads only behind external synchronisation.
#[derive(Debug, Clone)]
pub struct MetricsTracker {
    config: TrackerConfig,
    metrics: [Metric; 7],
}

impl MetricsTracker {
    /// Create a tracker.
    ///
    /// `period == 0` tracks the whole history. `risk_free_rate` is the
    /// per-period Sharpe risk-free rate and the Sortino target return.
    #[must_use]
    pub fn new(period: usize, risk_free_rate: f64, periods_per_year: u32) -> Self {
        Self::from_config(TrackerConfig {
            period,
            risk_free_rate,
            periods_per_year,
        })
    }

    /// Create a tracker after validating the configuration.
    pub fn try_new(config: TrackerConfig) -> Result<Self> {
        if config.periods_per_year == 0 {
            return Err(MetricsError::invalid_parameter(
                "periods_per_year",
                "must be positive",
            ));
        }
        if !config.risk_free_rate.is_finite() {
            return Err(MetricsError::invalid_parameter(
                "risk_free_rate",
                format!("must be finite, got {}", config.risk_free_rate),
            ));
        }
        Ok(Self::from_config(config))
    }

    fn from_config(config: TrackerConfig) -> Self {
        tracing::debug!(
            period = config.period,
            risk_free_rate = config.risk_free_rate,
            periods_per_year = config.periods_per_year,
            "metrics tracker created"
        );

        let metrics = MetricKind::ALL.map(|kind| Metric::from_config(kind, &config));
        Self { config, metrics }
    }

    /// Tracker configuration.
    #[must_use]
    pub const fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Record a closed trade.
    pub fn update_from_trade(&mut self, trade_pnl: f64) {
        tracing::trace!(trade_pnl, "trade update");
        self.feed(MetricInput::TradePnl, trade_pnl);
    }

    /// Record an equity snapshot.
    ///
    /// When `previous_equity` is given and positive, the one-step return
    /// `(equity - previous) / previous` feeds Sharpe and Sortino.
    pub fn update_from_equity(&mut self, equity: f64, price: f64, previous_equity: Option<f64>) {
        tracing::trace!(equity, price, ?previous_equity, "equity update");
        self.feed(MetricInput::Equity, equity);
        self.feed(MetricInput::Price, price);

        match previous_equity {
            Some(prev) if prev > 0.0 => {
                self.feed(MetricInput::EquityReturn, (equity - prev) / prev);
            }
            Some(prev) => {
                tracing::warn!(previous_equity = prev, "non-positive previous equity, return skipped");
            }
            None => {}
        }
    }

    fn feed(&mut self, input: MetricInput, observation: f64) {
        for metric in &mut self.metrics {
            if metric.kind().input() == input {
                metric.update(observation);
            }
        }
    }

    /// Current value of every metric.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        let value = |kind: MetricKind| self.metric(kind).value();
        MetricsSnapshot {
            pnl: value(MetricKind::Pnl),
            pnl_cumulative: self.pnl_cumulative(),
            win_rate: value(MetricKind::WinRate),
            max_drawdown: value(MetricKind::MaxDrawdown),
            profit_factor: value(MetricKind::ProfitFactor),
            sharpe_ratio: value(MetricKind::SharpeRatio),
            sortino_ratio: value(MetricKind::SortinoRatio),
            buy_hold_return: value(MetricKind::BuyHoldReturn),
        }
    }

    /// Reset every metric. The configuration is kept.
    pub fn reset(&mut self) {
        for metric in &mut self.metrics {
            metric.reset();
        }
        tracing::debug!(period = self.config.period, "metrics tracker reset");
    }

    /// Every metric, in reporting order.
    #[must_use]
    pub const fn metrics(&self) -> &[Metric; 7] {
        &self.metrics
    }

    /// The metric of the given kind.
    #[must_use]
    pub const fn metric(&self, kind: MetricKind) -> &Metric {
        &self.metrics[kind.index()]
    }

    /// Lifetime PnL, regardless of the period.
    #[must_use]
    pub const fn pnl_cumulative(&self) -> f64 {
        match self.metric(MetricKind::Pnl) {
            Metric::Pnl(pnl) => pnl.cumulative(),
            _ => 0.0,
        }
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::from_config(TrackerConfig::default())
    }
}

impl fmt::Display for MetricsTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MetricsTracker:")?;
        for metric in &self.metrics {
            write!(f, "\n  {}: {}", metric.kind().label(), metric.fmt_value())?;
        }
        Ok(())
    }
}

/// Point-in-time values of every tracked metric.
///
/// Unset metrics are `None`, never zero, and serialize as `null`. Non-finite
/// values (profit factor or Sortino with no losses) serialize as the strings
/// `"inf"`, `"-inf"` and `"nan"` so they stay distinct from unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Windowed (or global) PnL.
    #[serde(with = "non_finite", default)]
    pub pnl: Option<f64>,
    /// Lifetime PnL.
    pub pnl_cumulative: f64,
    /// Win rate in percent.
    #[serde(with = "non_finite", default)]
    pub win_rate: Option<f64>,
    /// Worst drawdown in percent (negative).
    #[serde(with = "non_finite", default)]
    pub max_drawdown: Option<f64>,
    /// Gross profit over gross loss.
    #[serde(with = "non_finite", default)]
    pub profit_factor: Option<f64>,
    /// Annualized Sharpe ratio.
    #[serde(with = "non_finite", default)]
    pub sharpe_ratio: Option<f64>,
    /// Annualized Sortino ratio.
    #[serde(with = "non_finite", default)]
    pub sortino_ratio: Option<f64>,
    /// Buy-and-hold return in percent.
    #[serde(with = "non_finite", default)]
    pub buy_hold_return: Option<f64>,
}

impl MetricsSnapshot {
    /// Snapshot keys, in order.
    pub const KEYS: [&'static str; 8] = [
        "pnl",
        "pnl_cumulative",
        "win_rate",
        "max_drawdown",
        "profit_factor",
        "sharpe_ratio",
        "sortino_ratio",
        "buy_hold_return",
    ];

    /// Value by key. `None` for unset metrics and unknown keys.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        match key {
            "pnl" => self.pnl,
            "pnl_cumulative" => Some(self.pnl_cumulative),
            "win_rate" => self.win_rate,
            "max_drawdown" => self.max_drawdown,
            "profit_factor" => self.profit_factor,
            "sharpe_ratio" => self.sharpe_ratio,
            "sortino_ratio" => self.sortino_ratio,
            "buy_hold_return" => self.buy_hold_return,
            _ => None,
        }
    }

    /// `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<f64>)> + '_ {
        Self::KEYS.into_iter().map(|key| (key, self.get(key)))
    }

    /// Human-readable rendering of every value.
    #[must_use]
    pub fn formatted(&self) -> Vec<(&'static str, String)> {
        self.iter().map(|(k, v)| (k, format_metric(v))).collect()
    }

    /// Export as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a snapshot exported by [`Self::to_json`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Serde adapter for `Option<f64>` that keeps non-finite values apart from
/// `None` (serde_json writes both as `null`).
mod non_finite {
    use serde::de::{self, Unexpected};
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    #[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match *value {
            None => serializer.serialize_none(),
            Some(v) if v.is_nan() => serializer.serialize_some("nan"),
            Some(v) if v == f64::INFINITY => serializer.serialize_some("inf"),
            Some(v) if v == f64::NEG_INFINITY => serializer.serialize_some("-inf"),
            Some(v) => serializer.serialize_some(&v),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Repr::Number(v)) => Ok(Some(v)),
            Some(Repr::Text(text)) => match text.as_str() {
                "inf" => Ok(Some(f64::INFINITY)),
                "-inf" => Ok(Some(f64::NEG_INFINITY)),
                "nan" => Ok(Some(f64::NAN)),
                other => Err(de::Error::invalid_value(
                    Unexpected::Str(other),
                    &"a number, \"inf\", \"-inf\" or \"nan\"",
                )),
            },
        }
    }
}
