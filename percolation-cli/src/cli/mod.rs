//! Command-line interface for the percolation threshold estimator.
//!
//! `stats` runs T trials on an N-by-N grid and reports the mean, standard
//! deviation and 95% confidence interval of the threshold. `trial` runs a
//! single trial and reports how many sites it opened.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, StatsCommand, StrategyArg, TrialCommand,
    render_summary, run_cli,
};
