//! Fixed-capacity FIFO window backing the rolling metrics.

use std::collections::VecDeque;

/// Ordered buffer of the most recent observations.
///
/// A window built with `period > 0` holds at most `period` values and evicts
/// the oldest one when a new value arrives while full. A window built with
/// `period == 0` (global mode) never evicts, so it retains nothing: global
/// statistics are kept as running totals by the owning metric.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingWindow<T> {
    values: VecDeque<T>,
    capacity: Option<usize>,
}

impl<T: Copy> RollingWindow<T> {
    /// Create a window for the given period (`0` = global, retains nothing).
    #[must_use]
    pub fn new(period: usize) -> Self {
        if period == 0 {
            Self {
                values: VecDeque::new(),
                capacity: None,
            }
        } else {
            Self {
                values: VecDeque::with_capacity(period),
                capacity: Some(period),
            }
        }
    }

    /// Append a value, returning the evicted oldest value if the window was full.
    ///
    /// In global mode the value is dropped and `None` is returned.
    pub fn push(&mut self, value: T) -> Option<T> {
        if self.capacity.is_none() {
            return None;
        }
        let evicted = if self.is_full() {
            self.values.pop_front()
        } else {
            None
        };
        self.values.push_back(value);
        evicted
    }

    /// Whether the next push will evict. Always false in global mode.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.values.len() >= cap)
    }

    /// Oldest value currently held.
    #[must_use]
    pub fn oldest(&self) -> Option<T> {
        self.values.front().copied()
    }

    /// Most recently pushed value.
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        self.values.back().copied()
    }

    /// Maximum capacity, `None` in global mode.
    #[must_use]
    pub const fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Number of values currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the window holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.values.iter().copied()
    }

    /// Drop all values, keeping the configured capacity.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl RollingWindow<f64> {
    /// Largest value in the window. O(len).
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    /// Sum of the values in the window. O(len).
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }
}
