//! Batch runs over an instance store.
//!
//! For every graph the runner records each configured construction on its
//! own, then each construction followed by a single improvement. Labels
//! already present on a graph are skipped, so re-running a batch only fills
//! in the gaps.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use tourforge_config::BatchConfig;
use tourforge_core::{Result, Tour};

use crate::algorithm::{AlgorithmLabel, ConstructionAlgorithm, ImprovementAlgorithm};
use crate::store::{GraphInstance, InstanceStore};

/// Counts returned by [`BatchRunner::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub graphs: usize,
    /// Attempts added by this run.
    pub recorded: usize,
    /// Attempts whose label was already present.
    pub skipped: usize,
}

impl std::ops::Add for BatchReport {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            graphs: self.graphs + rhs.graphs,
            recorded: self.recorded + rhs.recorded,
            skipped: self.skipped + rhs.skipped,
        }
    }
}

/// Runs every construction and construction+improvement pair on a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRunner {
    constructions: Vec<ConstructionAlgorithm>,
    improvements: Vec<ImprovementAlgorithm>,
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new(
            ConstructionAlgorithm::ALL.to_vec(),
            ImprovementAlgorithm::ALL.to_vec(),
        )
    }
}

impl BatchRunner {
    pub fn new(
        constructions: Vec<ConstructionAlgorithm>,
        improvements: Vec<ImprovementAlgorithm>,
    ) -> Self {
        Self {
            constructions,
            improvements,
        }
    }

    pub fn from_config(config: &BatchConfig) -> Self {
        Self::new(
            config.constructions.iter().map(|&c| c.into()).collect(),
            config.improvements.iter().map(|&i| i.into()).collect(),
        )
    }

    /// Labels recorded for every graph, in run order.
    pub fn labels(&self) -> Vec<AlgorithmLabel> {
        let mut labels = Vec::new();
        for &construction in &self.constructions {
            let bare = AlgorithmLabel::new(construction);
            let improved: Vec<_> = self
                .improvements
                .iter()
                .map(|&improvement| bare.clone().then(improvement))
                .collect();
            labels.push(bare);
            labels.extend(improved);
        }
        labels
    }

    /// Fills in missing attempts on every graph, in parallel across graphs.
    ///
    /// Attempts of every graph end up sorted by ascending weight.
    ///
    /// # Errors
    ///
    /// Propagates construction errors.
    pub fn run(&self, store: &mut InstanceStore) -> Result<BatchReport> {
        info!(
            event = "batch_start",
            graphs = store.graph_count(),
            labels = self.labels().len(),
        );
        let start = Instant::now();

        let reports = store
            .groups
            .par_iter_mut()
            .flat_map(|group| group.graphs.par_iter_mut())
            .map(|graph| self.run_graph(graph))
            .collect::<Result<Vec<_>>>()?;
        let report = reports.into_iter().fold(BatchReport::default(), |a, b| a + b);

        info!(
            event = "batch_end",
            graphs = report.graphs,
            recorded = report.recorded,
            skipped = report.skipped,
            duration_ms = start.elapsed().as_millis() as u64,
        );
        Ok(report)
    }

    fn run_graph(&self, graph: &mut GraphInstance) -> Result<BatchReport> {
        let mut report = BatchReport {
            graphs: 1,
            ..BatchReport::default()
        };

        for &construction in &self.constructions {
            let bare = AlgorithmLabel::new(construction);
            let mut constructed: Option<Tour> = None;

            if graph.has_attempt(&bare) {
                report.skipped += 1;
            } else {
                let tour = construction.construct(&graph.data)?;
                graph.record(tour.weight(&graph.data), &bare);
                constructed = Some(tour);
                report.recorded += 1;
            }

            for &improvement in &self.improvements {
                let label = bare.clone().then(improvement);
                if graph.has_attempt(&label) {
                    report.skipped += 1;
                    continue;
                }
                let mut tour = match &constructed {
                    Some(tour) => tour.clone(),
                    None => {
                        let tour = construction.construct(&graph.data)?;
                        constructed = Some(tour.clone());
                        tour
                    }
                };
                let outcome = improvement.improve(&graph.data, &mut tour);
                graph.record(outcome.weight, &label);
                debug!(
                    event = "attempt_recorded",
                    algorithm = %label,
                    nodes = graph.data.size(),
                    weight = outcome.weight,
                );
                report.recorded += 1;
            }
        }

        graph.sort_attempts();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourforge_test::square_cycle_matrix;

    fn square_store() -> InstanceStore {
        let mut store = InstanceStore::new();
        store.insert(square_cycle_matrix());
        store
    }

    #[test]
    fn label_order() {
        let runner = BatchRunner::new(
            vec![
                ConstructionAlgorithm::MultiFragment,
                ConstructionAlgorithm::NearestNeighbor,
            ],
            vec![ImprovementAlgorithm::TwoOpt, ImprovementAlgorithm::NodeSwap],
        );
        let labels: Vec<String> = runner.labels().iter().map(ToString::to_string).collect();
        assert_eq!(
            labels,
            vec![
                "multiFrag",
                "multiFrag+2Opt",
                "multiFrag+nodeSwap",
                "nearestN",
                "nearestN+2Opt",
                "nearestN+nodeSwap",
            ]
        );
    }

    #[test]
    fn records_every_label_sorted() {
        let mut store = square_store();
        let report = BatchRunner::default().run(&mut store).unwrap();
        assert_eq!(
            report,
            BatchReport {
                graphs: 1,
                recorded: 12,
                skipped: 0
            }
        );

        let graph = &store.groups[0].graphs[0];
        assert_eq!(graph.attempts.len(), 12);
        assert!(graph
            .attempts
            .windows(2)
            .all(|pair| pair[0].weight <= pair[1].weight));
        assert_eq!(graph.attempts[0].weight, 12.0);

        let denn = AlgorithmLabel::new(ConstructionAlgorithm::DoubleEndedNearestNeighbor);
        assert_eq!(graph.attempt(&denn).unwrap().weight, 20.0);
        let swapped = denn.then(ImprovementAlgorithm::NodeSwap);
        assert_eq!(graph.attempt(&swapped).unwrap().weight, 12.0);
    }

    #[test]
    fn second_run_is_idempotent() {
        let mut store = square_store();
        let runner = BatchRunner::default();
        runner.run(&mut store).unwrap();
        let before = store.clone();

        let report = runner.run(&mut store).unwrap();
        assert_eq!(report.recorded, 0);
        assert_eq!(report.skipped, 12);
        assert_eq!(store, before);
    }

    #[test]
    fn fills_only_missing_labels() {
        let mut store = square_store();
        BatchRunner::new(vec![ConstructionAlgorithm::NearestNeighbor], vec![])
            .run(&mut store)
            .unwrap();

        let report = BatchRunner::new(
            vec![ConstructionAlgorithm::NearestNeighbor],
            vec![ImprovementAlgorithm::TwoOpt],
        )
        .run(&mut store)
        .unwrap();
        assert_eq!(report.recorded, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(store.groups[0].graphs[0].attempts.len(), 2);
    }

    #[test]
    fn parallel_over_groups() {
        let mut store = crate::generator::InstanceGenerator::seeded(4)
            .store(&[5, 8, 12], 3)
            .unwrap();
        let report = BatchRunner::default().run(&mut store).unwrap();
        assert_eq!(report.graphs, 9);
        assert_eq!(report.recorded, 9 * 12);
        for graph in store.graphs() {
            for &construction in &ConstructionAlgorithm::ALL {
                let bare = graph.attempt(&AlgorithmLabel::new(construction)).unwrap();
                for improvement in ImprovementAlgorithm::ALL {
                    let label = AlgorithmLabel::new(construction).then(improvement);
                    assert!(graph.attempt(&label).unwrap().weight <= bare.weight);
                }
            }
        }
    }
}
