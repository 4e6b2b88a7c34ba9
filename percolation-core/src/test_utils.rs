//! Shared test utilities for `percolation-core`.

use percolation_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::sampler::SiteSampler;

/// Builds a standard proptest configuration from the shared CI profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// [`SiteSampler`] that replays a fixed list of values and records every
/// requested range.
///
/// Values are handed out in order and the script wraps around once it is
/// exhausted. Values are returned verbatim, so a script can deliberately
/// produce out-of-range coordinates.
#[derive(Clone, Debug)]
pub(crate) struct ScriptedSampler {
    values: Vec<usize>,
    cursor: usize,
    ranges: Vec<(usize, usize)>,
}

impl ScriptedSampler {
    /// Builds a sampler from `(row, col)` pairs.
    #[must_use]
    pub(crate) fn from_sites(sites: &[(usize, usize)]) -> Self {
        Self::new(sites.iter().flat_map(|&(row, col)| [row, col]).collect())
    }

    #[must_use]
    pub(crate) fn new(values: Vec<usize>) -> Self {
        assert!(!values.is_empty(), "script must not be empty");
        Self {
            values,
            cursor: 0,
            ranges: Vec::new(),
        }
    }

    /// Number of values drawn so far.
    #[must_use]
    pub(crate) fn draws(&self) -> usize {
        self.ranges.len()
    }

    #[must_use]
    pub(crate) fn ranges(&self) -> &[(usize, usize)] {
        &self.ranges
    }
}

impl SiteSampler for ScriptedSampler {
    fn uniform(&mut self, lo: usize, hi: usize) -> usize {
        self.ranges.push((lo, hi));
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
