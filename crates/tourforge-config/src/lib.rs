//! Configuration system for TourForge.
//!
//! Load engine configuration from TOML or YAML files to choose the
//! construction and improvement algorithms, the instance generator and the
//! batch and experiment parameters without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use tourforge_config::{ConstructionType, EngineConfig, ImprovementType};
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     random_seed = 7
//!     construction = "nearest_neighbor"
//!     improvements = ["two_opt", "node_swap"]
//!
//!     [generator]
//!     sizes = [5, 10]
//!     graphs_per_size = 3
//! "#).unwrap();
//!
//! assert_eq!(config.construction, ConstructionType::NearestNeighbor);
//! assert_eq!(config.improvements, vec![ImprovementType::TwoOpt, ImprovementType::NodeSwap]);
//! assert_eq!(config.generator.max_weight, 1000.0);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use tourforge_config::EngineConfig;
//!
//! let config = EngineConfig::load("tourforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Random seed for reproducible instance generation.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Construction heuristic producing the initial tour.
    #[serde(default)]
    pub construction: ConstructionType,

    /// Improvement heuristics applied in order after construction.
    #[serde(default)]
    pub improvements: Vec<ImprovementType>,

    /// Exhaustive enumeration limits.
    #[serde(default)]
    pub exhaustive: ExhaustiveConfig,

    /// Random instance generation.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Algorithms run by the batch runner over an instance store.
    #[serde(default)]
    pub batch: BatchConfig,

    /// Progressive experiment range.
    #[serde(default)]
    pub experiment: ExperimentConfig,
}

impl EngineConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, choosing the format by extension.
    ///
    /// `.yaml` and `.yml` files are read as YAML, anything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the construction heuristic.
    pub fn with_construction(mut self, construction: ConstructionType) -> Self {
        self.construction = construction;
        self
    }

    /// Appends an improvement heuristic.
    pub fn with_improvement(mut self, improvement: ImprovementType) -> Self {
        self.improvements.push(improvement);
        self
    }

    /// Sets the exhaustive enumeration size limit.
    pub fn with_exhaustive_limit(mut self, size_limit: usize) -> Self {
        self.exhaustive.size_limit = size_limit;
        self
    }

    /// Sets the generator weight range `[min, max)`.
    pub fn with_weight_range(mut self, min_weight: f64, max_weight: f64) -> Self {
        self.generator.min_weight = min_weight;
        self.generator.max_weight = max_weight;
        self
    }

    /// Sets the progressive experiment range.
    pub fn with_experiment(mut self, low: usize, high: usize, iterations: usize) -> Self {
        self.experiment = ExperimentConfig {
            low,
            high,
            iterations,
        };
        self
    }

    /// Checks value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator.validate()?;
        self.experiment.validate()?;
        if self.exhaustive.size_limit < 2 {
            return Err(ConfigError::Invalid(format!(
                "exhaustive.size_limit must be at least 2, got {}",
                self.exhaustive.size_limit
            )));
        }
        Ok(())
    }
}

/// Construction heuristic types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionType {
    /// Greedy edge merging into path fragments.
    #[default]
    MultiFragment,

    /// Grow the tour from node 0 by repeatedly taking the nearest node.
    NearestNeighbor,

    /// Nearest neighbor growing both ends alternately.
    DoubleEndedNearestNeighbor,
}

impl ConstructionType {
    /// All construction types, in label order.
    pub const ALL: [ConstructionType; 3] = [
        ConstructionType::MultiFragment,
        ConstructionType::NearestNeighbor,
        ConstructionType::DoubleEndedNearestNeighbor,
    ];
}

/// Improvement heuristic types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImprovementType {
    /// Segment reversal over two cut points.
    TwoOpt,

    /// Segment reconnection over three cut points.
    ThreeOpt,

    /// Swapping of adjacent nodes.
    NodeSwap,
}

impl ImprovementType {
    /// All improvement types, in label order.
    pub const ALL: [ImprovementType; 3] = [
        ImprovementType::TwoOpt,
        ImprovementType::ThreeOpt,
        ImprovementType::NodeSwap,
    ];
}

/// Exhaustive enumeration configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ExhaustiveConfig {
    /// Largest instance enumerated; `(n-1)!` tours are visited.
    pub size_limit: usize,
}

impl Default for ExhaustiveConfig {
    fn default() -> Self {
        Self { size_limit: 10 }
    }
}

/// Random instance generator configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GeneratorConfig {
    /// Inclusive lower bound of edge weights.
    pub min_weight: f64,

    /// Exclusive upper bound of edge weights.
    pub max_weight: f64,

    /// Instance sizes generated into a store.
    pub sizes: Vec<usize>,

    /// Number of graphs generated per size.
    pub graphs_per_size: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_weight: 1.0,
            max_weight: 1000.0,
            sizes: vec![5, 10, 25, 50, 100],
            graphs_per_size: 10,
        }
    }
}

impl GeneratorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_weight.is_finite() && self.max_weight.is_finite()) {
            return Err(ConfigError::Invalid(
                "generator weights must be finite".to_string(),
            ));
        }
        if self.min_weight < 0.0 || self.min_weight >= self.max_weight {
            return Err(ConfigError::Invalid(format!(
                "generator weight range [{}, {}) is empty or negative",
                self.min_weight, self.max_weight
            )));
        }
        if let Some(&size) = self.sizes.iter().find(|&&size| size < 2) {
            return Err(ConfigError::Invalid(format!(
                "generator sizes must be at least 2, got {size}"
            )));
        }
        Ok(())
    }
}

/// Batch runner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BatchConfig {
    /// Constructions recorded for every graph.
    pub constructions: Vec<ConstructionType>,

    /// Improvements chained after each construction.
    pub improvements: Vec<ImprovementType>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            constructions: ConstructionType::ALL.to_vec(),
            improvements: ImprovementType::ALL.to_vec(),
        }
    }
}

/// Progressive experiment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ExperimentConfig {
    /// Smallest instance size.
    pub low: usize,

    /// Largest instance size, inclusive.
    pub high: usize,

    /// Random instances per size.
    pub iterations: usize,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            low: 4,
            high: 100,
            iterations: 10,
        }
    }
}

impl ExperimentConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.low < 2 || self.low > self.high {
            return Err(ConfigError::Invalid(format!(
                "experiment range {}..={} must start at 2 or more and be non-empty",
                self.low, self.high
            )));
        }
        if self.iterations == 0 {
            return Err(ConfigError::Invalid(
                "experiment.iterations must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
