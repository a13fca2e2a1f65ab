//! Tests for local search improvers.

use tourforge_core::Tour;
use tourforge_test::{is_permutation, random_matrix, ring_matrix, square_cycle_matrix};

use super::*;
use crate::construction::{Constructor, DoubleEndedNearestNeighbor, NearestNeighbor};

fn improvers() -> Vec<Box<dyn Improver>> {
    vec![Box::new(TwoOpt), Box::new(ThreeOpt), Box::new(NodeSwap)]
}

fn tour(nodes: &[usize]) -> Tour {
    Tour::new(nodes.to_vec()).unwrap()
}

#[test]
fn test_improvers_never_increase_weight() {
    for seed in 0..5 {
        let matrix = random_matrix(15, seed);
        for improver in improvers() {
            let mut t = NearestNeighbor.construct(&matrix).unwrap();
            let before = t.weight(&matrix);
            let outcome = improver.improve(&matrix, &mut t);

            assert!(outcome.weight <= before, "{} got worse", improver.name());
            assert_eq!(outcome.starting_weight, before);
            assert_eq!(outcome.weight, t.weight(&matrix));
            assert!(is_permutation(t.nodes(), 15));
        }
    }
}

#[test]
fn test_weight_unchanged_without_accepted_moves() {
    let matrix = ring_matrix(7);
    for improver in improvers() {
        let mut t = tour(&[0, 1, 2, 3, 4, 5, 6]);
        let outcome = improver.improve(&matrix, &mut t);
        assert!(!outcome.improved());
        assert_eq!(t.nodes(), &[0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(outcome.weight, 7.0);
    }
}

mod two_opt {
    use super::*;

    #[test]
    fn test_repairs_double_ended_tour() {
        let matrix = square_cycle_matrix();
        let mut t = DoubleEndedNearestNeighbor.construct(&matrix).unwrap();
        assert_eq!(t.weight(&matrix), 20.0);

        let outcome = TwoOpt.improve(&matrix, &mut t);
        assert_eq!(t.nodes(), &[1, 0, 3, 2]);
        assert_eq!(outcome.weight, 12.0);
        assert_eq!(outcome.moves_accepted, 1);
        // i = 1: j = 3 accepted. i = 2: j = 4 rejected.
        assert_eq!(outcome.moves_evaluated, 2);
    }

    #[test]
    fn test_untangles_ring() {
        let matrix = ring_matrix(6);
        let mut t = tour(&[0, 2, 1, 3, 4, 5]);
        assert_eq!(t.weight(&matrix), 24.0);

        let outcome = TwoOpt.improve(&matrix, &mut t);
        assert_eq!(t.nodes(), &[2, 1, 0, 5, 4, 3]);
        assert_eq!(outcome.weight, 6.0);
    }

    #[test]
    fn test_small_tours_have_no_moves() {
        let matrix = random_matrix(3, 4);
        let mut t = tour(&[0, 1, 2]);
        let outcome = TwoOpt.improve(&matrix, &mut t);
        assert_eq!(outcome.moves_evaluated, 0);

        let matrix = random_matrix(2, 4);
        let mut t = tour(&[0, 1]);
        assert_eq!(TwoOpt.improve(&matrix, &mut t).moves_evaluated, 0);
    }
}

mod three_opt {
    use super::*;

    #[test]
    fn test_reverses_first_segment() {
        // Cuts at 1, 3, 5: A = [2, 1], B = [3, 4], C = [5, 0]; A'BC wins.
        let matrix = ring_matrix(6);
        let mut t = tour(&[0, 2, 1, 3, 4, 5]);

        let outcome = ThreeOpt.improve(&matrix, &mut t);
        assert_eq!(t.nodes(), &[1, 2, 3, 4, 5, 0]);
        assert_eq!(outcome.weight, 6.0);
        assert_eq!(outcome.moves_accepted, 1);
        // After the adoption only (2, 4, 6) is scanned.
        assert_eq!(outcome.moves_evaluated, 14);
    }

    #[test]
    fn test_five_nodes_have_no_moves() {
        let matrix = ring_matrix(5);
        let mut t = tour(&[0, 2, 1, 3, 4]);
        let outcome = ThreeOpt.improve(&matrix, &mut t);
        assert_eq!(outcome.moves_evaluated, 0);
        assert_eq!(t.nodes(), &[0, 2, 1, 3, 4]);
    }

    #[test]
    fn test_four_nodes_are_a_no_op() {
        let matrix = square_cycle_matrix();
        let mut t = tour(&[3, 1, 0, 2]);
        let outcome = ThreeOpt.improve(&matrix, &mut t);
        assert_eq!(outcome.moves_evaluated, 0);
        assert_eq!(outcome.weight, 20.0);
    }

    #[test]
    fn test_each_cut_triple_evaluates_seven_patterns() {
        // len 7: (1,3,5), (1,3,6), (1,4,6), (2,4,6), (2,4,7), (2,5,7), (3,5,7).
        let matrix = ring_matrix(7);
        let mut t = tour(&[0, 1, 2, 3, 4, 5, 6]);
        let outcome = ThreeOpt.improve(&matrix, &mut t);
        assert_eq!(outcome.moves_evaluated, 7 * 7);
    }
}

mod node_swap {
    use super::*;

    #[test]
    fn test_repairs_double_ended_tour() {
        let matrix = square_cycle_matrix();
        let mut t = DoubleEndedNearestNeighbor.construct(&matrix).unwrap();

        let outcome = NodeSwap.improve(&matrix, &mut t);
        assert_eq!(t.nodes(), &[3, 0, 1, 2]);
        assert_eq!(outcome.weight, 12.0);
        // Two passes of four swaps, the first one keeping a single swap.
        assert_eq!(outcome.moves_evaluated, 8);
        assert_eq!(outcome.moves_accepted, 1);
    }

    #[test]
    fn test_idempotent_at_convergence() {
        let matrix = random_matrix(12, 8);
        let mut t = NearestNeighbor.construct(&matrix).unwrap();
        let first = NodeSwap.improve(&matrix, &mut t);
        let converged = t.clone();

        let second = NodeSwap.improve(&matrix, &mut t);
        assert_eq!(t, converged);
        assert_eq!(second.weight, first.weight);
        assert_eq!(second.moves_accepted, 0);
        assert_eq!(second.moves_evaluated, 12);
    }

    #[test]
    fn test_wraps_last_with_first() {
        // Only the swap of positions 4 and 0 helps.
        let matrix = ring_matrix(5);
        let mut t = tour(&[4, 1, 2, 3, 0]);
        assert_eq!(t.weight(&matrix), 23.0);

        let outcome = NodeSwap.improve(&matrix, &mut t);
        assert_eq!(t.nodes(), &[0, 1, 2, 3, 4]);
        assert_eq!(outcome.weight, 5.0);
        assert_eq!(outcome.moves_accepted, 1);
        assert_eq!(outcome.moves_evaluated, 10);
    }
}
