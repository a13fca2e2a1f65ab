//! Adjacent node swap improver.

use tracing::trace;

use tourforge_core::{DistanceMatrix, Tour};

use super::{Improver, LocalSearchOutcome};

/// Swaps each node with its successor (the last with the first), keeping a
/// swap only if the tour gets strictly lighter.
///
/// Passes repeat until one completes without a kept swap.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeSwap;

impl Improver for NodeSwap {
    fn improve(&self, matrix: &DistanceMatrix, tour: &mut Tour) -> LocalSearchOutcome {
        let len = tour.len();
        let mut outcome = LocalSearchOutcome::new(tour.weight(matrix));

        let mut swapped = true;
        while swapped {
            swapped = false;
            for curr in 0..len {
                let next = (curr + 1) % len;
                tour.nodes_mut().swap(curr, next);
                outcome.moves_evaluated += 1;

                let weight = tour.weight(matrix);
                if weight < outcome.weight {
                    outcome.weight = weight;
                    outcome.moves_accepted += 1;
                    swapped = true;
                    trace!(event = "step", phase = "Node Swap", position = curr, weight = weight);
                } else {
                    tour.nodes_mut().swap(curr, next);
                }
            }
        }

        outcome
    }

    fn name(&self) -> &'static str {
        "Node Swap"
    }
}
