//! TourForge Solver Engine
//!
//! This crate provides the heuristic engine for the symmetric travelling
//! salesman problem:
//! - Construction heuristics (Multi-Fragment, nearest neighbor variants)
//! - Local search improvers (2-opt, 3-opt, node swap)
//! - Exhaustive enumeration for small instances
//! - Run pipeline with yield points, cancellation and statistics
//! - Instance generation, JSON store, batch runs and experiments

pub mod algorithm;
pub mod batch;
pub mod construction;
pub mod event;
pub mod exhaustive;
pub mod experiment;
pub mod generator;
pub mod localsearch;
pub mod reconnection;
pub mod solver;
pub mod statistics;
pub mod store;

pub use algorithm::{AlgorithmLabel, ConstructionAlgorithm, ImprovementAlgorithm};
pub use batch::{BatchReport, BatchRunner};
pub use construction::{Constructor, DoubleEndedNearestNeighbor, MultiFragment, NearestNeighbor};
pub use event::{CancelOnFlag, CountingListener, NoopListener, SolveListener, YieldPoint};
pub use exhaustive::{ExhaustiveResult, ExhaustiveSearch};
pub use experiment::{summarize_store, write_csv, ExperimentRow, ProgressiveExperiment};
pub use generator::InstanceGenerator;
pub use localsearch::{Improver, LocalSearchOutcome, NodeSwap, ThreeOpt, TwoOpt};
pub use solver::{SolveResult, TourSolver};
pub use statistics::{PhaseStatistics, SolverStatistics};
pub use store::{Attempt, GraphInstance, InstanceStore, SizeGroup, StoreError};
