//! Support library for the percolation CLI binary.
//!
//! Exposes argument parsing, command execution and rendering so tests can
//! drive the whole pipeline in-process.

pub mod cli;
pub mod logging;
