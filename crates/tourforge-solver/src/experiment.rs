//! Progressive experiment and store summaries.
//!
//! Both produce one [`ExperimentRow`] per instance size: the percentage by
//! which the improvement step shortened the constructed tours, totalled over
//! all instances of that size.

use std::io::{self, Write};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use tourforge_config::{EngineConfig, GeneratorConfig};
use tourforge_core::Result;

use crate::algorithm::{AlgorithmLabel, ConstructionAlgorithm};
use crate::generator::InstanceGenerator;
use crate::solver::TourSolver;
use crate::store::InstanceStore;

/// Improvement percentage for one instance size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperimentRow {
    pub nodes: usize,
    pub improvement: f64,
}

impl ExperimentRow {
    /// Row for totals of constructed and improved weights.
    pub fn from_totals(nodes: usize, initial: f64, improved: f64) -> Self {
        let improvement = if initial > 0.0 {
            (initial - improved) / initial * 100.0
        } else {
            0.0
        };
        Self { nodes, improvement }
    }
}

/// Runs a solver over fresh random instances of every size in a range.
#[derive(Debug, Clone)]
pub struct ProgressiveExperiment {
    solver: TourSolver,
    generator: GeneratorConfig,
    low: usize,
    high: usize,
    iterations: usize,
    seed: Option<u64>,
}

impl ProgressiveExperiment {
    /// Creates an experiment over sizes `low..=high` with `iterations`
    /// instances each and the default weight range.
    pub fn new(solver: TourSolver, low: usize, high: usize, iterations: usize) -> Self {
        Self {
            solver,
            generator: GeneratorConfig::default(),
            low,
            high,
            iterations,
            seed: None,
        }
    }

    /// Uses the configured algorithms, range, weight range and seed.
    pub fn from_config(config: &EngineConfig) -> Self {
        let experiment = &config.experiment;
        let mut this = Self::new(
            TourSolver::from_config(config),
            experiment.low,
            experiment.high,
            experiment.iterations,
        );
        this.generator = config.generator.clone();
        this.seed = config.random_seed;
        this
    }

    /// Seeds every size; size `n` draws from `seed + n`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the algorithms run on every instance.
    pub fn with_solver(mut self, solver: TourSolver) -> Self {
        self.solver = solver;
        self
    }

    pub fn solver(&self) -> &TourSolver {
        &self.solver
    }

    /// Computes one row per size, in ascending size order.
    ///
    /// Sizes run in parallel; instances within a size run in sequence.
    ///
    /// # Errors
    ///
    /// Propagates generation and construction errors.
    pub fn run(&self) -> Result<Vec<ExperimentRow>> {
        info!(
            event = "experiment_start",
            algorithm = %self.solver.label(),
            low = self.low,
            high = self.high,
            iterations = self.iterations,
        );
        let start = Instant::now();

        let rows = (self.low..=self.high)
            .into_par_iter()
            .map(|n| self.run_size(n))
            .collect::<Result<Vec<_>>>()?;

        info!(
            event = "experiment_end",
            sizes = rows.len(),
            duration_ms = start.elapsed().as_millis() as u64,
        );
        Ok(rows)
    }

    fn run_size(&self, n: usize) -> Result<ExperimentRow> {
        let mut generator = match self.seed {
            Some(seed) => InstanceGenerator::seeded(seed.wrapping_add(n as u64)),
            None => InstanceGenerator::from_entropy(),
        }
        .with_weight_range(self.generator.min_weight, self.generator.max_weight);

        let construction = self.solver.label().construction;
        let mut total_initial = 0.0;
        let mut total_improved = 0.0;
        for _ in 0..self.iterations {
            let matrix = generator.matrix(n)?;
            let mut tour = construction.construct(&matrix)?;
            total_initial += tour.weight(&matrix);
            total_improved += self.solver.improve(&matrix, &mut tour)?;
        }

        let row = ExperimentRow::from_totals(n, total_initial, total_improved);
        debug!(event = "size_finished", nodes = n, improvement = row.improvement);
        Ok(row)
    }
}

/// Summarizes a batch-filled store for one construction.
///
/// For every size group, compares the total construction-only weight with
/// the total of the best improved attempt of that construction on each
/// graph. Graphs lacking either attempt are left out; groups with no usable
/// graph produce no row.
pub fn summarize_store(
    store: &InstanceStore,
    construction: ConstructionAlgorithm,
) -> Vec<ExperimentRow> {
    let bare = AlgorithmLabel::new(construction).to_string();
    let prefix = format!("{bare}+");

    store
        .groups
        .iter()
        .filter_map(|group| {
            let mut counted = 0;
            let mut initial = 0.0;
            let mut improved = 0.0;
            for graph in &group.graphs {
                let Some(base) = graph.attempts.iter().find(|a| a.algorithm == bare) else {
                    continue;
                };
                let Some(best) = graph
                    .attempts
                    .iter()
                    .filter(|a| a.algorithm.starts_with(&prefix))
                    .map(|a| a.weight)
                    .min_by(f64::total_cmp)
                else {
                    continue;
                };
                counted += 1;
                initial += base.weight;
                improved += best;
            }
            (counted > 0).then(|| ExperimentRow::from_totals(group.nodes, initial, improved))
        })
        .collect()
}

/// Writes rows as `nodes,percentage` lines terminated by `\r\n`.
pub fn write_csv<W: Write>(rows: &[ExperimentRow], mut out: W) -> io::Result<()> {
    for row in rows {
        write!(out, "{},{}\r\n", row.nodes, row.improvement)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::ImprovementAlgorithm;
    use crate::batch::BatchRunner;
    use tourforge_test::square_cycle_matrix;

    fn denn_node_swap() -> TourSolver {
        TourSolver::new(ConstructionAlgorithm::DoubleEndedNearestNeighbor)
            .with_improvement(ImprovementAlgorithm::NodeSwap)
    }

    #[test]
    fn percentage_from_totals() {
        assert_eq!(ExperimentRow::from_totals(4, 20.0, 12.0).improvement, 40.0);
        assert_eq!(ExperimentRow::from_totals(4, 0.0, 0.0).improvement, 0.0);
    }

    #[test]
    fn one_row_per_size() {
        let rows = ProgressiveExperiment::new(denn_node_swap(), 4, 9, 3)
            .with_seed(17)
            .run()
            .unwrap();
        let sizes: Vec<usize> = rows.iter().map(|row| row.nodes).collect();
        assert_eq!(sizes, vec![4, 5, 6, 7, 8, 9]);
        assert!(rows.iter().all(|row| row.improvement >= 0.0));
    }

    #[test]
    fn seeded_runs_repeat() {
        let experiment = ProgressiveExperiment::new(denn_node_swap(), 4, 7, 2).with_seed(3);
        assert_eq!(experiment.run().unwrap(), experiment.run().unwrap());
    }

    #[test]
    fn construction_only_improves_nothing() {
        let solver = TourSolver::new(ConstructionAlgorithm::MultiFragment);
        let rows = ProgressiveExperiment::new(solver, 5, 6, 2)
            .with_seed(1)
            .run()
            .unwrap();
        assert!(rows.iter().all(|row| row.improvement == 0.0));
    }

    #[test]
    fn from_config_reads_range() {
        let config = EngineConfig::new()
            .with_random_seed(2)
            .with_construction(tourforge_config::ConstructionType::NearestNeighbor)
            .with_improvement(tourforge_config::ImprovementType::TwoOpt)
            .with_experiment(4, 6, 1);
        let rows = ProgressiveExperiment::from_config(&config).run().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            ProgressiveExperiment::from_config(&config).solver().label().to_string(),
            "nearestN+2Opt"
        );
    }

    #[test]
    fn summary_of_square_store() {
        let mut store = InstanceStore::new();
        store.insert(square_cycle_matrix());
        BatchRunner::default().run(&mut store).unwrap();

        let rows = summarize_store(&store, ConstructionAlgorithm::DoubleEndedNearestNeighbor);
        assert_eq!(rows, vec![ExperimentRow::from_totals(4, 20.0, 12.0)]);
        assert_eq!(rows[0].improvement, 40.0);

        let rows = summarize_store(&store, ConstructionAlgorithm::MultiFragment);
        assert_eq!(rows[0].improvement, 0.0);
    }

    #[test]
    fn summary_skips_unfilled_groups() {
        let mut store = InstanceStore::new();
        store.insert(square_cycle_matrix());
        assert!(summarize_store(&store, ConstructionAlgorithm::MultiFragment).is_empty());
    }

    #[test]
    fn csv_layout() {
        let rows = vec![
            ExperimentRow::from_totals(4, 20.0, 12.0),
            ExperimentRow {
                nodes: 5,
                improvement: 2.5,
            },
        ];
        let mut out = Vec::new();
        write_csv(&rows, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "4,40\r\n5,2.5\r\n");
    }
}
