//! Summary statistics over per-trial percolation thresholds.

use tracing::{info, instrument};

use crate::{
    error::{PercolationError, Result},
    sampler::SiteSampler,
    trial::run_trial,
};

/// Standard normal quantile for a two-sided 95% confidence interval.
pub const CONFIDENCE_Z: f64 = 1.96;

/// Percolation threshold samples together with their mean, sample standard
/// deviation and 95% confidence interval.
///
/// # Examples
/// ```
/// use percolation_core::{RngSampler, ThresholdStats};
///
/// let stats = ThresholdStats::estimate(20, 10, &mut RngSampler::seeded(3))
///     .expect("size and trial count are positive");
/// assert_eq!(stats.trials(), 10);
/// assert!(stats.confidence_lo() <= stats.mean());
/// assert!(stats.mean() <= stats.confidence_hi());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdStats {
    thresholds: Vec<f64>,
}

impl ThresholdStats {
    /// Runs `trials` independent trials on `size`-by-`size` grids, drawing
    /// coordinates from `sampler`.
    ///
    /// # Errors
    /// Returns [`PercolationError::InvalidGridSize`] when `size == 0`,
    /// [`PercolationError::InvalidTrialCount`] when `trials == 0`, and
    /// [`PercolationError::SiteOutOfBounds`] when the sampler yields a
    /// coordinate outside the grid.
    #[instrument(name = "core.estimate", err, skip(sampler))]
    pub fn estimate<S: SiteSampler + ?Sized>(
        size: usize,
        trials: usize,
        sampler: &mut S,
    ) -> Result<Self> {
        if size == 0 {
            return Err(PercolationError::InvalidGridSize { got: size });
        }
        if trials == 0 {
            return Err(PercolationError::InvalidTrialCount { got: trials });
        }

        let thresholds = (0..trials)
            .map(|_| run_trial(size, sampler).map(|outcome| outcome.threshold()))
            .collect::<Result<Vec<_>>>()?;
        let stats = Self { thresholds };
        info!(mean = stats.mean(), stddev = stats.stddev(), "estimate completed");
        Ok(stats)
    }

    /// Builds statistics from precomputed threshold samples.
    ///
    /// # Errors
    /// Returns [`PercolationError::EmptySamples`] when `thresholds` is empty.
    pub fn from_thresholds(thresholds: Vec<f64>) -> Result<Self> {
        if thresholds.is_empty() {
            return Err(PercolationError::EmptySamples);
        }
        Ok(Self { thresholds })
    }

    /// Recorded threshold samples in trial order.
    #[must_use]
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Number of trials T.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.thresholds.len()
    }

    /// Sample mean of the thresholds.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.thresholds.iter().sum::<f64>() / self.trials() as f64
    }

    /// Sample standard deviation of the thresholds (divides by `T - 1`).
    ///
    /// With a single trial the divisor is zero and the result is `NaN`; the
    /// confidence bounds are `NaN` as well.
    #[must_use]
    pub fn stddev(&self) -> f64 {
        let mean = self.mean();
        let squares: f64 = self
            .thresholds
            .iter()
            .map(|value| (value - mean).powi(2))
            .sum();
        (squares / (self.trials() - 1) as f64).sqrt()
    }

    /// Low endpoint of the 95% confidence interval.
    #[must_use]
    pub fn confidence_lo(&self) -> f64 {
        self.mean() - self.half_width()
    }

    /// High endpoint of the 95% confidence interval.
    #[must_use]
    pub fn confidence_hi(&self) -> f64 {
        self.mean() + self.half_width()
    }

    fn half_width(&self) -> f64 {
        CONFIDENCE_Z * self.stddev() / (self.trials() as f64).sqrt()
    }
}
