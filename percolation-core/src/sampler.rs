//! Random site selection.
//!
//! Trials never reach for a global generator: the caller injects a
//! [`SiteSampler`], which keeps estimator runs reproducible under a seeded
//! generator and scriptable in tests.

use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Capability yielding uniformly distributed integers.
pub trait SiteSampler {
    /// Returns a uniformly distributed integer in the inclusive range
    /// `lo..=hi`. Callers guarantee `lo <= hi`.
    fn uniform(&mut self, lo: usize, hi: usize) -> usize;
}

impl<S: SiteSampler + ?Sized> SiteSampler for &mut S {
    fn uniform(&mut self, lo: usize, hi: usize) -> usize {
        (**self).uniform(lo, hi)
    }
}

/// [`SiteSampler`] backed by any [`rand::Rng`].
///
/// # Examples
/// ```
/// use percolation_core::{RngSampler, SiteSampler};
///
/// let mut sampler = RngSampler::seeded(7);
/// let value = sampler.uniform(1, 6);
/// assert!((1..=6).contains(&value));
/// ```
#[derive(Clone, Debug)]
pub struct RngSampler<R> {
    rng: R,
}

impl<R: Rng> RngSampler<R> {
    /// Wraps an existing generator.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns the wrapped generator.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngSampler<SmallRng> {
    /// Creates a sampler over a [`SmallRng`] seeded with `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SiteSampler for RngSampler<R> {
    fn uniform(&mut self, lo: usize, hi: usize) -> usize {
        self.rng.gen_range(lo..=hi)
    }
}
