//! Run pipeline: one construction followed by a chain of improvements.

use std::ops::ControlFlow;
use std::time::Instant;

use tracing::{debug, info};

use tourforge_config::EngineConfig;
use tourforge_core::{DistanceMatrix, Result, Tour, TourForgeError};

use crate::algorithm::{AlgorithmLabel, ConstructionAlgorithm, ImprovementAlgorithm};
use crate::event::{NoopListener, SolveListener, YieldPoint};
use crate::statistics::{PhaseStatistics, SolverStatistics};

/// Runs a construction heuristic and its improvements on a matrix.
///
/// # Example
///
/// ```
/// use tourforge_core::DistanceMatrix;
/// use tourforge_solver::TourSolver;
/// use tourforge_solver::algorithm::{ConstructionAlgorithm, ImprovementAlgorithm};
///
/// let inf = f64::INFINITY;
/// let matrix = DistanceMatrix::new(vec![
///     vec![inf, 1.0, 9.0, 9.0],
///     vec![1.0, inf, 1.0, 9.0],
///     vec![9.0, 1.0, inf, 1.0],
///     vec![9.0, 9.0, 1.0, inf],
/// ]).unwrap();
///
/// let solver = TourSolver::new(ConstructionAlgorithm::DoubleEndedNearestNeighbor)
///     .with_improvement(ImprovementAlgorithm::NodeSwap);
/// let result = solver.solve(&matrix).unwrap();
///
/// assert_eq!(result.construction_weight, 20.0);
/// assert_eq!(result.weight, 12.0);
/// assert_eq!(result.label.to_string(), "doubleENN+nodeSwap");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourSolver {
    label: AlgorithmLabel,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    pub tour: Tour,
    /// Cyclic weight of `tour`.
    pub weight: f64,
    /// Weight of the tour right after construction.
    pub construction_weight: f64,
    pub label: AlgorithmLabel,
    pub statistics: SolverStatistics,
}

impl SolveResult {
    /// Percentage by which the improvements shortened the constructed tour.
    pub fn improvement_percent(&self) -> f64 {
        if self.construction_weight > 0.0 {
            (self.construction_weight - self.weight) / self.construction_weight * 100.0
        } else {
            0.0
        }
    }
}

impl TourSolver {
    /// Creates a construction-only solver.
    pub fn new(construction: ConstructionAlgorithm) -> Self {
        Self {
            label: AlgorithmLabel::new(construction),
        }
    }

    /// Creates a solver running exactly the algorithms named by `label`.
    pub fn from_label(label: AlgorithmLabel) -> Self {
        Self { label }
    }

    /// Creates a solver from the `construction` and `improvements` settings.
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut solver = Self::new(config.construction.into());
        for &improvement in &config.improvements {
            solver = solver.with_improvement(improvement.into());
        }
        solver
    }

    /// Appends an improvement to the chain.
    pub fn with_improvement(mut self, improvement: ImprovementAlgorithm) -> Self {
        self.label.improvements.push(improvement);
        self
    }

    pub fn label(&self) -> &AlgorithmLabel {
        &self.label
    }

    /// Runs the pipeline without interruption.
    ///
    /// # Errors
    ///
    /// Propagates construction errors.
    pub fn solve(&self, matrix: &DistanceMatrix) -> Result<SolveResult> {
        self.solve_with_listener(matrix, &NoopListener)
    }

    /// Runs the pipeline, yielding to `listener` between stages.
    ///
    /// # Errors
    ///
    /// [`TourForgeError::Cancelled`] if the listener breaks, otherwise the
    /// construction errors.
    pub fn solve_with_listener(
        &self,
        matrix: &DistanceMatrix,
        listener: &dyn SolveListener,
    ) -> Result<SolveResult> {
        let construction = self.label.construction;
        info!(
            event = "solve_start",
            algorithm = %self.label,
            node_count = matrix.size(),
        );
        let solve_start = Instant::now();
        let mut statistics = SolverStatistics::new();

        info!(
            event = "phase_start",
            phase = construction.name(),
            phase_index = 0,
        );
        let phase_start = Instant::now();
        let mut tour = construction.construct(matrix)?;
        let construction_weight = tour.weight(matrix);

        let mut phase = PhaseStatistics::new(0, construction.name());
        phase.duration = phase_start.elapsed();
        phase.moves_evaluated = matrix.size() as u64;
        phase.moves_accepted = matrix.size() as u64;
        phase.ending_weight = construction_weight;
        log_phase_end(&phase);
        statistics.record_phase(phase);

        yield_to(
            listener,
            &YieldPoint::ConstructionFinished {
                algorithm: construction,
                weight: construction_weight,
            },
            &tour,
        )?;

        let mut weight = construction_weight;
        for (index, &improvement) in self.label.improvements.iter().enumerate() {
            yield_to(
                listener,
                &YieldPoint::ImprovementStarting {
                    algorithm: improvement,
                    index,
                },
                &tour,
            )?;

            let phase_index = index + 1;
            info!(
                event = "phase_start",
                phase = improvement.name(),
                phase_index = phase_index,
            );
            let phase_start = Instant::now();
            let outcome = improvement.improve(matrix, &mut tour);
            weight = outcome.weight;

            let mut phase = PhaseStatistics::new(phase_index, improvement.name());
            phase.duration = phase_start.elapsed();
            phase.moves_evaluated = outcome.moves_evaluated;
            phase.moves_accepted = outcome.moves_accepted;
            phase.starting_weight = Some(outcome.starting_weight);
            phase.ending_weight = outcome.weight;
            log_phase_end(&phase);
            statistics.record_phase(phase);

            yield_to(
                listener,
                &YieldPoint::ImprovementFinished {
                    algorithm: improvement,
                    index,
                    weight,
                },
                &tour,
            )?;
        }

        info!(
            event = "solve_end",
            algorithm = %self.label,
            duration_ms = solve_start.elapsed().as_millis() as u64,
            moves_evaluated = statistics.total_moves_evaluated(),
            weight = weight,
        );

        Ok(SolveResult {
            tour,
            weight,
            construction_weight,
            label: self.label.clone(),
            statistics,
        })
    }

    /// Runs only the improvement chain on an existing tour.
    ///
    /// Returns the final weight.
    ///
    /// # Errors
    ///
    /// [`TourForgeError::InvalidTour`] if `tour` does not cover the matrix.
    pub fn improve(&self, matrix: &DistanceMatrix, tour: &mut Tour) -> Result<f64> {
        if !tour.fits(matrix) {
            return Err(TourForgeError::InvalidTour(format!(
                "tour of {} nodes does not fit a matrix of {} nodes",
                tour.len(),
                matrix.size()
            )));
        }
        let mut weight = tour.weight(matrix);
        for &improvement in &self.label.improvements {
            weight = improvement.improve(matrix, tour).weight;
            debug!(event = "improved", phase = improvement.name(), weight = weight);
        }
        Ok(weight)
    }
}

fn yield_to(listener: &dyn SolveListener, point: &YieldPoint, tour: &Tour) -> Result<()> {
    match listener.on_yield(point, tour) {
        ControlFlow::Continue(()) => Ok(()),
        ControlFlow::Break(()) => {
            info!(event = "solve_cancelled", at = ?point);
            Err(TourForgeError::Cancelled)
        }
    }
}

fn log_phase_end(phase: &PhaseStatistics) {
    info!(
        event = "phase_end",
        phase = phase.phase_type.as_str(),
        phase_index = phase.phase_index,
        duration_ms = phase.duration.as_millis() as u64,
        steps = phase.moves_evaluated,
        speed = phase.speed(),
        weight = phase.ending_weight,
    );
}
