//! Shared test utilities used across percolation crates.

pub mod ci;
pub mod tracing;
