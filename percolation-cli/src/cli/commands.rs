//! Command implementations and argument parsing for the percolation CLI.

use std::io::{self, Write};

use clap::{Args, Parser, Subcommand, ValueEnum};
use percolation_core::{
    ExecutionStrategy, ExperimentBuilder, PercolationError, RngSampler, ThresholdStats,
    TrialOutcome, run_trial,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "percolation",
    about = "Estimate the percolation threshold of an N-by-N grid."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run T independent trials and summarise the thresholds.
    Stats(StatsCommand),
    /// Run a single trial and report how many sites it opened.
    Trial(TrialCommand),
}

/// Options accepted by the `stats` command.
#[derive(Debug, Args, Clone)]
pub struct StatsCommand {
    /// Grid dimension N.
    pub size: usize,

    /// Number of independent trials T.
    pub trials: usize,

    /// Base seed; a random seed is chosen and logged when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// How trials are scheduled.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,
}

/// Options accepted by the `trial` command.
#[derive(Debug, Args, Clone)]
pub struct TrialCommand {
    /// Grid dimension N.
    pub size: usize,

    /// Seed; a random seed is chosen and logged when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Trial scheduling choices exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Parallel when available, otherwise sequential.
    Auto,
    /// One trial after another.
    Sequential,
    /// Trials spread across worker threads.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core estimation failed.
    #[error(transparent)]
    Core(#[from] PercolationError),
}

/// Outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionSummary {
    /// Result of the `stats` command.
    Stats {
        /// Seed the experiment ran with.
        seed: u64,
        /// Threshold statistics over every trial.
        stats: ThresholdStats,
    },
    /// Result of the `trial` command.
    Trial {
        /// Seed the trial ran with.
        seed: u64,
        /// Open-site count at percolation.
        outcome: TrialOutcome,
    },
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the arguments are rejected by the core library.
///
/// # Examples
/// ```
/// use percolation_cli::cli::{Cli, Command, ExecutionSummary, TrialCommand, run_cli};
///
/// let cli = Cli {
///     command: Command::Trial(TrialCommand { size: 1, seed: Some(3) }),
/// };
/// let summary = run_cli(cli).expect("a 1x1 trial always succeeds");
/// assert!(matches!(summary, ExecutionSummary::Trial { seed: 3, .. }));
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Stats(stats) => {
            span.record("command", field::display("stats"));
            run_stats(stats)
        }
        Command::Trial(trial) => {
            span.record("command", field::display("trial"));
            run_single_trial(trial)
        }
    }
}

#[instrument(
    name = "cli.stats",
    err,
    skip(command),
    fields(size = command.size, trials = command.trials, seed = field::Empty),
)]
pub(super) fn run_stats(command: StatsCommand) -> Result<ExecutionSummary, CliError> {
    let seed = resolve_seed(command.seed);
    Span::current().record("seed", seed);

    let experiment = ExperimentBuilder::new()
        .with_grid_size(command.size)
        .with_trials(command.trials)
        .with_seed(seed)
        .with_execution_strategy(command.strategy.into())
        .build()?;
    let stats = experiment.run()?;
    info!(
        strategy = ?experiment.execution_strategy(),
        mean = stats.mean(),
        "stats command completed"
    );
    Ok(ExecutionSummary::Stats { seed, stats })
}

#[instrument(
    name = "cli.trial",
    err,
    skip(command),
    fields(size = command.size, seed = field::Empty),
)]
pub(super) fn run_single_trial(command: TrialCommand) -> Result<ExecutionSummary, CliError> {
    let seed = resolve_seed(command.seed);
    Span::current().record("seed", seed);

    let outcome = run_trial(command.size, &mut RngSampler::seeded(seed))?;
    info!(open_sites = outcome.open_sites(), "trial command completed");
    Ok(ExecutionSummary::Trial { seed, outcome })
}

pub(super) fn resolve_seed(requested: Option<u64>) -> u64 {
    requested.unwrap_or_else(rand::random)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use percolation_cli::cli::{ExecutionSummary, render_summary};
/// # use percolation_core::ThresholdStats;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary::Stats {
///     seed: 1,
///     stats: ThresholdStats::from_thresholds(vec![0.5, 0.5])?,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.starts_with("mean                    = 0.5\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Stats { stats, .. } => {
            writeln!(writer, "mean                    = {}", stats.mean())?;
            writeln!(writer, "stddev                  = {}", stats.stddev())?;
            writeln!(
                writer,
                "95% confidence interval = [{}, {}]",
                stats.confidence_lo(),
                stats.confidence_hi()
            )?;
        }
        ExecutionSummary::Trial { outcome, .. } => {
            writeln!(writer, "open sites = {}", outcome.open_sites())?;
            writeln!(writer, "threshold  = {}", outcome.threshold())?;
        }
    }
    Ok(())
}
