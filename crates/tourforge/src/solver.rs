//! One-call entry points driven by an [`EngineConfig`].

use tourforge_config::EngineConfig;
use tourforge_core::{DistanceMatrix, Result};
use tourforge_solver::{
    BatchReport, BatchRunner, ExhaustiveResult, ExhaustiveSearch, InstanceStore, SolveResult,
    TourSolver,
};

#[cfg(feature = "console")]
fn init_console() {
    tourforge_console::init();
}

#[cfg(not(feature = "console"))]
fn init_console() {}

/// Runs the configured construction and improvements on `matrix`.
///
/// With the `console` feature, the first call also installs the colored
/// console subscriber.
pub fn solve(matrix: &DistanceMatrix, config: &EngineConfig) -> Result<SolveResult> {
    init_console();
    TourSolver::from_config(config).solve(matrix)
}

/// Enumerates every tour of `matrix` within the configured size limit.
pub fn brute_force(matrix: &DistanceMatrix, config: &EngineConfig) -> Result<ExhaustiveResult> {
    init_console();
    ExhaustiveSearch::from_config(&config.exhaustive).enumerate(matrix)
}

/// Fills in the configured batch attempts on every graph of `store`.
pub fn run_batch(store: &mut InstanceStore, config: &EngineConfig) -> Result<BatchReport> {
    init_console();
    BatchRunner::from_config(&config.batch).run(store)
}
