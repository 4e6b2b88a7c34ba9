//! Shared fixtures for the percolation benchmarks.

use std::fmt;

use rand::{SeedableRng, rngs::SmallRng, seq::SliceRandom};

/// Parameters identifying one benchmark case in Criterion reports.
#[derive(Clone, Copy, Debug)]
pub struct GridBenchParams {
    /// Grid dimension N.
    pub size: usize,
}

impl fmt::Display for GridBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.size)
    }
}

/// Every site of a `size`-by-`size` grid exactly once, in a seeded random
/// order.
#[must_use]
pub fn shuffled_sites(size: usize, seed: u64) -> Vec<(usize, usize)> {
    let mut sites: Vec<(usize, usize)> = (1..=size)
        .flat_map(|row| (1..=size).map(move |col| (row, col)))
        .collect();
    sites.shuffle(&mut SmallRng::seed_from_u64(seed));
    sites
}
