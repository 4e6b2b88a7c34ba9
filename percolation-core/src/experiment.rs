//! Experiment configuration and execution.
//!
//! An [`Experiment`] runs a fixed number of trials on grids of one size.
//! Every trial draws from its own generator, seeded by mixing the experiment
//! seed with the trial index, so results depend only on the configuration and
//! never on the execution strategy or the number of worker threads.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{Span, field, info, instrument};

use crate::{
    error::{PercolationError, Result},
    sampler::RngSampler,
    stats::ThresholdStats,
    trial::run_trial,
};

const DEFAULT_GRID_SIZE: usize = 200;
const DEFAULT_TRIALS: usize = 30;
const DEFAULT_SEED: u64 = 0x5EED;

/// SplitMix64 increment (the 64-bit golden ratio) used for per-trial seed
/// derivation.
const TRIAL_SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

/// Indicates how an [`Experiment`] schedules its trials.
///
/// `Auto` resolves to `Parallel` when the `parallel` feature is compiled in
/// and to `Sequential` otherwise.
///
/// # Examples
/// ```
/// use percolation_core::ExecutionStrategy;
///
/// assert_eq!(ExecutionStrategy::Sequential.resolve(), Ok(ExecutionStrategy::Sequential));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Let the library pick the best available strategy.
    Auto,
    /// Run trials one after another on the calling thread.
    Sequential,
    /// Fan trials out across the `rayon` thread pool.
    Parallel,
}

impl ExecutionStrategy {
    /// Resolves `Auto` and checks that the strategy is available in this
    /// build.
    ///
    /// # Errors
    /// Returns [`PercolationError::BackendUnavailable`] when `Parallel` is
    /// requested without the `parallel` feature.
    pub fn resolve(self) -> Result<Self> {
        match self {
            Self::Auto if cfg!(feature = "parallel") => Ok(Self::Parallel),
            Self::Auto | Self::Sequential => Ok(Self::Sequential),
            Self::Parallel if cfg!(feature = "parallel") => Ok(Self::Parallel),
            Self::Parallel => Err(PercolationError::BackendUnavailable { requested: self }),
        }
    }
}

/// Configures and constructs [`Experiment`] instances.
///
/// # Examples
/// ```
/// use percolation_core::{ExecutionStrategy, ExperimentBuilder};
///
/// let experiment = ExperimentBuilder::new()
///     .with_grid_size(16)
///     .with_trials(8)
///     .with_seed(7)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// let stats = experiment.run().expect("trials run");
/// assert_eq!(stats.trials(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct ExperimentBuilder {
    grid_size: usize,
    trials: usize,
    seed: u64,
    execution_strategy: ExecutionStrategy,
}

impl Default for ExperimentBuilder {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            trials: DEFAULT_TRIALS,
            seed: DEFAULT_SEED,
            execution_strategy: ExecutionStrategy::Auto,
        }
    }
}

impl ExperimentBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use percolation_core::{ExecutionStrategy, ExperimentBuilder};
    ///
    /// let builder = ExperimentBuilder::new();
    /// assert_eq!(builder.grid_size(), 200);
    /// assert_eq!(builder.trials(), 30);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the grid dimension N.
    #[must_use]
    pub fn with_grid_size(mut self, size: usize) -> Self {
        self.grid_size = size;
        self
    }

    /// Returns the configured grid dimension.
    #[must_use]
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Overrides the number of trials T.
    #[must_use]
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Returns the configured number of trials.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Overrides the base seed from which per-trial generators are derived.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured base seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Sets the execution strategy used when running the experiment.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Validates the configuration and constructs an [`Experiment`].
    ///
    /// # Errors
    /// Returns [`PercolationError::InvalidGridSize`] when the grid size is
    /// zero, [`PercolationError::InvalidTrialCount`] when the trial count is
    /// zero, and [`PercolationError::BackendUnavailable`] when the strategy is
    /// not compiled into this build.
    pub fn build(self) -> Result<Experiment> {
        if self.grid_size == 0 {
            return Err(PercolationError::InvalidGridSize {
                got: self.grid_size,
            });
        }
        if self.trials == 0 {
            return Err(PercolationError::InvalidTrialCount { got: self.trials });
        }
        let execution_strategy = self.execution_strategy.resolve()?;

        Ok(Experiment {
            grid_size: self.grid_size,
            trials: self.trials,
            seed: self.seed,
            execution_strategy,
        })
    }
}

/// A validated Monte Carlo threshold experiment.
#[derive(Debug, Clone)]
pub struct Experiment {
    grid_size: usize,
    trials: usize,
    seed: u64,
    execution_strategy: ExecutionStrategy,
}

impl Experiment {
    /// Grid dimension N.
    #[must_use]
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Number of trials T.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Base seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Resolved execution strategy; never [`ExecutionStrategy::Auto`].
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Runs every trial and summarises the thresholds.
    ///
    /// # Errors
    /// Propagates trial failures, which cannot occur for a validated
    /// configuration.
    #[instrument(
        name = "core.experiment",
        err,
        skip(self),
        fields(
            grid_size = self.grid_size,
            trials = self.trials,
            seed = self.seed,
            strategy = ?self.execution_strategy,
            mean = field::Empty,
        ),
    )]
    pub fn run(&self) -> Result<ThresholdStats> {
        let thresholds = match self.execution_strategy {
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Parallel => self.run_parallel()?,
            _ => self.run_sequential()?,
        };
        let stats = ThresholdStats::from_thresholds(thresholds)?;

        Span::current().record("mean", stats.mean());
        info!(
            mean = stats.mean(),
            stddev = stats.stddev(),
            confidence_lo = stats.confidence_lo(),
            confidence_hi = stats.confidence_hi(),
            "experiment completed"
        );
        Ok(stats)
    }

    fn run_sequential(&self) -> Result<Vec<f64>> {
        (0..self.trials).map(|index| self.trial_threshold(index)).collect()
    }

    #[cfg(feature = "parallel")]
    fn run_parallel(&self) -> Result<Vec<f64>> {
        (0..self.trials)
            .into_par_iter()
            .map(|index| self.trial_threshold(index))
            .collect()
    }

    fn trial_threshold(&self, index: usize) -> Result<f64> {
        let mut sampler = RngSampler::seeded(mix_trial_seed(self.seed, index));
        run_trial(self.grid_size, &mut sampler).map(|outcome| outcome.threshold())
    }
}

#[inline]
fn mix_trial_seed(base_seed: u64, trial_index: usize) -> u64 {
    splitmix64(base_seed ^ ((trial_index as u64 + 1).wrapping_mul(TRIAL_SEED_SPACING)))
}

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(TRIAL_SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}
