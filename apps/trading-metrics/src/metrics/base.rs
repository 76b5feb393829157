//! Shared metric state and the capability interface every metric implements.

use std::fmt;

use super::format::format_metric;

/// State common to every metric: window period, current value, readiness
/// and the lifetime observation count.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricState {
    period: usize,
    value: Option<f64>,
    ready: bool,
    count: u64,
}

impl MetricState {
    /// Fresh state for the given period (`0` = global).
    #[must_use]
    pub const fn new(period: usize) -> Self {
        Self {
            period,
            value: None,
            ready: false,
            count: 0,
        }
    }

    /// Count one observation.
    pub const fn record(&mut self) {
        self.count += 1;
    }

    /// Publish a new value and readiness flag.
    pub const fn publish(&mut self, value: Option<f64>, ready: bool) {
        self.value = value;
        self.ready = ready;
    }

    /// Return to the just-constructed state. The period is kept.
    pub const fn reset(&mut self) {
        self.value = None;
        self.ready = false;
        self.count = 0;
    }

    /// Configured window size.
    #[must_use]
    pub const fn period(&self) -> usize {
        self.period
    }

    /// Whether the metric runs over its whole history.
    #[must_use]
    pub const fn is_global(&self) -> bool {
        self.period == 0
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        self.value
    }

    /// Whether the value is meaningful.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// Lifetime number of updates.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }
}

/// Capability interface shared by all metrics.
///
/// Every metric consumes a stream of scalar observations through
/// [`update`](Self::update) and exposes its current value at any time.
/// `update` has no default body: a metric without an update rule does not
/// compile.
pub trait RollingMetric {
    /// Display name, e.g. `RollingSharpe`.
    fn name(&self) -> &'static str;

    /// Shared state.
    fn state(&self) -> &MetricState;

    /// Feed one observation.
    fn update(&mut self, observation: f64);

    /// Return to the just-constructed state.
    fn reset(&mut self);

    /// Configured window size (`0` = global).
    fn period(&self) -> usize {
        self.state().period()
    }

    /// Current value, `None` while unset.
    fn value(&self) -> Option<f64> {
        self.state().value()
    }

    /// Whether [`value`](Self::value) is meaningful.
    fn is_ready(&self) -> bool {
        self.state().is_ready()
    }

    /// Lifetime number of updates since construction or the last reset.
    fn observation_count(&self) -> u64 {
        self.state().count()
    }

    /// Human-readable value.
    fn fmt_value(&self) -> String {
        format_metric(self.value())
    }
}

/// Write `Name(period=N, value=X, ready=B)`.
pub(crate) fn write_summary<M: RollingMetric + ?Sized>(
    metric: &M,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    write!(
        f,
        "{}(period={}, value={}, ready={})",
        metric.name(),
        metric.period(),
        metric.fmt_value(),
        metric.is_ready()
    )
}

/// Warn about observations that would poison running sums.
pub(crate) fn check_finite(metric: &'static str, observation: f64) {
    if !observation.is_finite() {
        tracing::warn!(metric, observation, "non-finite observation");
    }
}
