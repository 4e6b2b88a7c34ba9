//! A single Monte Carlo percolation trial.

use tracing::{debug, instrument};

use crate::{error::Result, grid::Percolation, sampler::SiteSampler};

/// Outcome of one trial: how many sites had to be opened before the grid
/// percolated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrialOutcome {
    size: usize,
    open_sites: usize,
}

impl TrialOutcome {
    /// Grid dimension the trial ran on.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of distinct sites opened when the grid first percolated.
    #[must_use]
    pub fn open_sites(&self) -> usize {
        self.open_sites
    }

    /// Fraction of open sites at percolation, `open_sites / size²`.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.open_sites as f64 / (self.size * self.size) as f64
    }
}

/// Opens uniformly random sites on a fresh `size`-by-`size` grid until it
/// percolates.
///
/// Coordinates are drawn with replacement; drawing a site that is already
/// open does not count towards [`TrialOutcome::open_sites`].
///
/// # Errors
/// Returns [`crate::PercolationError::InvalidGridSize`] when `size == 0` and
/// [`crate::PercolationError::SiteOutOfBounds`] when the sampler yields a
/// coordinate outside `1..=size`.
///
/// # Examples
/// ```
/// use percolation_core::{RngSampler, run_trial};
///
/// let outcome = run_trial(10, &mut RngSampler::seeded(1)).expect("size is positive");
/// assert!(outcome.open_sites() >= 10);
/// assert!(outcome.threshold() > 0.0 && outcome.threshold() <= 1.0);
/// ```
#[instrument(
    name = "core.run_trial",
    level = "debug",
    err,
    skip(sampler),
)]
pub fn run_trial<S: SiteSampler + ?Sized>(size: usize, sampler: &mut S) -> Result<TrialOutcome> {
    let mut grid = Percolation::new(size)?;
    let mut open_sites = 0_usize;
    let mut draws = 0_u64;

    while !grid.percolates() {
        let row = sampler.uniform(1, size);
        let col = sampler.uniform(1, size);
        draws += 1;
        if !grid.is_open(row, col)? {
            grid.open(row, col)?;
            open_sites += 1;
        }
    }

    let outcome = TrialOutcome { size, open_sites };
    debug!(
        open_sites,
        draws,
        threshold = outcome.threshold(),
        "trial percolated"
    );
    Ok(outcome)
}
