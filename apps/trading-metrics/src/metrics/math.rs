//! Statistical math utilities for the online metrics.

/// Running mean and sum of squared deviations (Welford's algorithm).
///
/// Supports removal of a previously added observation so a fixed window can
/// slide in O(1).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OnlineMoments {
    n: u64,
    mean: f64,
    m2: f64,
}

impl OnlineMoments {
    /// Empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            n: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    /// Forward Welford step.
    pub fn add(&mut self, x: f64) {
        self.n += 1;
        let delta = x - self.mean;
        self.mean += delta / self.n as f64;
        let delta2 = x - self.mean;
        self.m2 += delta * delta2;
    }

    /// Reverse Welford step for an observation that was previously added.
    pub fn remove(&mut self, x: f64) {
        if self.n <= 1 {
            *self = Self::new();
            return;
        }
        self.n -= 1;
        let delta = x - self.mean;
        self.mean -= delta / self.n as f64;
        let delta2 = x - self.mean;
        self.m2 -= delta * delta2;
        // Rounding can push m2 just below zero after a removal.
        if self.m2 < 0.0 {
            self.m2 = 0.0;
        }
    }

    /// Number of observations.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.n
    }

    /// Running mean (0.0 when empty).
    #[must_use]
    pub const fn mean(&self) -> f64 {
        self.mean
    }

    /// Sum of squared deviations from the mean.
    #[must_use]
    pub const fn m2(&self) -> f64 {
        self.m2
    }

    /// Bessel-corrected sample variance, `None` below two observations.
    #[must_use]
    pub fn sample_variance(&self) -> Option<f64> {
        if self.n < 2 {
            return None;
        }
        Some(self.m2 / (self.n - 1) as f64)
    }

    /// Sample standard deviation, `None` below two observations.
    #[must_use]
    pub fn sample_std_dev(&self) -> Option<f64> {
        self.sample_variance().map(f64::sqrt)
    }
}

/// Squared shortfall below `target` summed over `values`, with the count of
/// contributing observations.
pub fn downside_sums(values: impl IntoIterator<Item = f64>, target: f64) -> (f64, u64) {
    values
        .into_iter()
        .filter(|v| *v < target)
        .fold((0.0, 0), |(m2, n), v| {
            let shortfall = v - target;
            (m2 + shortfall * shortfall, n + 1)
        })
}

/// Annualization multiplier for a per-period ratio.
#[must_use]
pub fn annualization_factor(periods_per_year: u32) -> f64 {
    f64::from(periods_per_year).sqrt()
}
