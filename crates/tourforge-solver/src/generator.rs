//! Random instance generation.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use tourforge_config::GeneratorConfig;
use tourforge_core::{DistanceMatrix, Result, TourForgeError};

use crate::store::{GraphInstance, InstanceStore, SizeGroup};

/// Draws symmetric matrices with weights uniform in `[min_weight, max_weight)`.
///
/// # Example
///
/// ```
/// use tourforge_solver::generator::InstanceGenerator;
///
/// let mut a = InstanceGenerator::seeded(42);
/// let mut b = InstanceGenerator::seeded(42);
/// assert_eq!(a.matrix(6).unwrap(), b.matrix(6).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct InstanceGenerator {
    rng: ChaCha8Rng,
    min_weight: f64,
    max_weight: f64,
}

impl InstanceGenerator {
    /// Creates a reproducible generator with the default weight range.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates a generator seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(ChaCha8Rng::from_os_rng())
    }

    fn with_rng(rng: ChaCha8Rng) -> Self {
        let defaults = GeneratorConfig::default();
        Self {
            rng,
            min_weight: defaults.min_weight,
            max_weight: defaults.max_weight,
        }
    }

    /// Creates a generator from the weight range and an optional seed.
    pub fn from_config(config: &GeneratorConfig, seed: Option<u64>) -> Self {
        let generator = match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        };
        generator.with_weight_range(config.min_weight, config.max_weight)
    }

    pub fn with_weight_range(mut self, min_weight: f64, max_weight: f64) -> Self {
        self.min_weight = min_weight;
        self.max_weight = max_weight;
        self
    }

    /// Draws one matrix of `n` nodes.
    ///
    /// # Errors
    ///
    /// [`TourForgeError::InvalidInstance`] if `n < 2` or the weight range is
    /// empty, negative or not finite.
    pub fn matrix(&mut self, n: usize) -> Result<DistanceMatrix> {
        let (min, max) = (self.min_weight, self.max_weight);
        if !(min.is_finite() && max.is_finite()) || min < 0.0 || min >= max {
            return Err(TourForgeError::InvalidInstance(format!(
                "weight range [{min}, {max}) cannot be sampled"
            )));
        }
        let rng = &mut self.rng;
        DistanceMatrix::from_fn(n, |_, _| rng.random_range(min..max))
    }

    /// Builds a store with `graphs_per_size` fresh graphs for each size.
    pub fn store(&mut self, sizes: &[usize], graphs_per_size: usize) -> Result<InstanceStore> {
        let mut groups = Vec::with_capacity(sizes.len());
        for &nodes in sizes {
            let mut group = SizeGroup::new(nodes);
            for _ in 0..graphs_per_size {
                group.graphs.push(GraphInstance::new(self.matrix(nodes)?));
            }
            debug!(event = "group_generated", nodes = nodes, graphs = graphs_per_size);
            groups.push(group);
        }
        info!(
            event = "store_generated",
            groups = groups.len(),
            graphs = sizes.len() * graphs_per_size,
        );
        Ok(InstanceStore { groups })
    }
}
