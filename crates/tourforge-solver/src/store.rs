//! JSON instance store.
//!
//! The store groups graphs by size. Each graph carries its matrix and the
//! attempts recorded against it:
//!
//! ```json
//! [{ "nodes": 4, "graphs": [{ "data": [[null, 1, 9, 9], ...],
//!                             "attempts": [{ "weight": 12, "algorithm": "multiFrag" }] }] }]
//! ```
//!
//! Diagonal entries are `null` in JSON and `+∞` in memory.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tourforge_core::{DistanceMatrix, TourForgeError};

use crate::algorithm::AlgorithmLabel;

/// Errors raised while reading or writing a store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid store: {0}")]
    Instance(#[from] TourForgeError),
}

/// One recorded run against a graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub weight: f64,
    /// Composite label, e.g. `multiFrag+2Opt`.
    pub algorithm: String,
}

impl Attempt {
    pub fn new(weight: f64, label: &AlgorithmLabel) -> Self {
        Self {
            weight,
            algorithm: label.to_string(),
        }
    }

    /// Parses the stored label.
    ///
    /// # Errors
    ///
    /// [`TourForgeError::UnknownAlgorithm`] for labels this engine cannot run.
    pub fn label(&self) -> tourforge_core::Result<AlgorithmLabel> {
        self.algorithm.parse()
    }
}

/// A graph and its attempts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphInstance {
    pub data: DistanceMatrix,
    #[serde(default)]
    pub attempts: Vec<Attempt>,
}

impl GraphInstance {
    pub fn new(data: DistanceMatrix) -> Self {
        Self {
            data,
            attempts: Vec::new(),
        }
    }

    pub fn has_attempt(&self, label: &AlgorithmLabel) -> bool {
        let label = label.to_string();
        self.attempts.iter().any(|attempt| attempt.algorithm == label)
    }

    /// Appends an attempt unless its label is already recorded.
    ///
    /// Returns whether the attempt was added.
    pub fn record(&mut self, weight: f64, label: &AlgorithmLabel) -> bool {
        if self.has_attempt(label) {
            return false;
        }
        self.attempts.push(Attempt::new(weight, label));
        true
    }

    /// Sorts attempts by ascending weight, keeping insertion order on ties.
    pub fn sort_attempts(&mut self) {
        self.attempts.sort_by(|a, b| a.weight.total_cmp(&b.weight));
    }

    pub fn attempt(&self, label: &AlgorithmLabel) -> Option<&Attempt> {
        let label = label.to_string();
        self.attempts.iter().find(|attempt| attempt.algorithm == label)
    }

    /// Lightest recorded attempt.
    pub fn best_attempt(&self) -> Option<&Attempt> {
        self.attempts
            .iter()
            .min_by(|a, b| a.weight.total_cmp(&b.weight))
    }
}

/// All graphs of one size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeGroup {
    pub nodes: usize,
    #[serde(default)]
    pub graphs: Vec<GraphInstance>,
}

impl SizeGroup {
    pub fn new(nodes: usize) -> Self {
        Self {
            nodes,
            graphs: Vec::new(),
        }
    }
}

/// A whole store document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceStore {
    pub groups: Vec<SizeGroup>,
}

impl InstanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and validates a store file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Writes the store as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Parses and validates a store document.
    ///
    /// # Errors
    ///
    /// [`StoreError::Json`] for malformed JSON or matrices, and
    /// [`StoreError::Instance`] when a graph does not match its group size.
    pub fn from_json_str(s: &str) -> Result<Self, StoreError> {
        let store: Self = serde_json::from_str(s)?;
        store.validate()?;
        Ok(store)
    }

    pub fn to_json_string(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every graph matches the size of its group.
    pub fn validate(&self) -> Result<(), TourForgeError> {
        for group in &self.groups {
            if let Some(graph) = group
                .graphs
                .iter()
                .find(|graph| graph.data.size() != group.nodes)
            {
                return Err(TourForgeError::InvalidInstance(format!(
                    "group of {} nodes holds a graph of {} nodes",
                    group.nodes,
                    graph.data.size()
                )));
            }
        }
        Ok(())
    }

    pub fn group(&self, nodes: usize) -> Option<&SizeGroup> {
        self.groups.iter().find(|group| group.nodes == nodes)
    }

    /// Returns the group for `nodes`, appending an empty one if missing.
    pub fn group_mut(&mut self, nodes: usize) -> &mut SizeGroup {
        let index = match self.groups.iter().position(|group| group.nodes == nodes) {
            Some(index) => index,
            None => {
                self.groups.push(SizeGroup::new(nodes));
                self.groups.len() - 1
            }
        };
        &mut self.groups[index]
    }

    /// Adds a graph to the group of its size.
    pub fn insert(&mut self, data: DistanceMatrix) {
        self.group_mut(data.size()).graphs.push(GraphInstance::new(data));
    }

    pub fn graph_count(&self) -> usize {
        self.groups.iter().map(|group| group.graphs.len()).sum()
    }

    pub fn graphs(&self) -> impl Iterator<Item = &GraphInstance> {
        self.groups.iter().flat_map(|group| group.graphs.iter())
    }
}
