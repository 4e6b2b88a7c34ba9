//! Percolation core library.
//!
//! Models an N-by-N grid of blocked and open sites, answers whether a site is
//! connected to the top edge ("full") and whether the open sites connect the
//! top edge to the bottom edge ("percolates"), and estimates the percolation
//! threshold by Monte Carlo simulation.
//!
//! Fullness and percolation are answered from two separate
//! [`WeightedUnionFind`] instances. Only the percolation structure is joined
//! to the virtual bottom node, so a percolating grid never reports bottom-row
//! sites as full unless they really are reachable from the top.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod experiment;
mod grid;
mod sampler;
mod stats;
mod trial;
mod union_find;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::{
    error::{ErrorKind, PercolationError, PercolationErrorCode, Result},
    experiment::{ExecutionStrategy, Experiment, ExperimentBuilder},
    grid::{Percolation, row_major_index},
    sampler::{RngSampler, SiteSampler},
    stats::{CONFIDENCE_Z, ThresholdStats},
    trial::{TrialOutcome, run_trial},
    union_find::WeightedUnionFind,
};
