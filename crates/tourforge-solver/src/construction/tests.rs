//! Tests for construction heuristics.

use tourforge_test::{
    distinct_four_matrix, is_permutation, join_five_matrix, random_matrix, ring_matrix,
    square_cycle_matrix,
};

use super::*;

fn constructors() -> Vec<Box<dyn Constructor>> {
    vec![
        Box::new(MultiFragment),
        Box::new(NearestNeighbor),
        Box::new(DoubleEndedNearestNeighbor),
    ]
}

#[test]
fn test_every_constructor_returns_permutation() {
    for n in [2, 3, 4, 7, 12, 30] {
        let matrix = random_matrix(n, n as u64);
        for constructor in constructors() {
            let tour = constructor.construct(&matrix).unwrap();
            assert!(
                is_permutation(tour.nodes(), n),
                "{} produced {:?} for n = {n}",
                constructor.name(),
                tour.nodes()
            );
        }
    }
}

#[test]
fn test_constructors_are_deterministic() {
    let matrix = random_matrix(25, 99);
    for constructor in constructors() {
        let first = constructor.construct(&matrix).unwrap();
        let second = constructor.construct(&matrix).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_two_nodes() {
    let matrix = random_matrix(2, 1);
    assert_eq!(MultiFragment.construct(&matrix).unwrap().nodes(), &[0, 1]);
    assert_eq!(NearestNeighbor.construct(&matrix).unwrap().nodes(), &[1, 0]);
    assert_eq!(
        DoubleEndedNearestNeighbor.construct(&matrix).unwrap().nodes(),
        &[1, 0]
    );
}

mod multi_fragment {
    use super::*;

    #[test]
    fn test_square_cycle() {
        let matrix = square_cycle_matrix();
        let tour = MultiFragment.construct(&matrix).unwrap();
        assert_eq!(tour.nodes(), &[0, 1, 2, 3]);
        assert_eq!(tour.weight(&matrix), 12.0);
    }

    #[test]
    fn test_rejects_cycle_then_extends() {
        // 0-1, then 0-2 prepends, 0-3 hits an interior node, 1-2 would close
        // [2, 0, 1] early, and 1-3 completes the tour.
        let matrix = distinct_four_matrix();
        let tour = MultiFragment.construct(&matrix).unwrap();
        assert_eq!(tour.nodes(), &[2, 0, 1, 3]);
        assert_eq!(tour.weight(&matrix), 29.0);
    }

    #[test]
    fn test_joins_fragments_sharing_an_endpoint() {
        let matrix = join_five_matrix();
        let tour = MultiFragment.construct(&matrix).unwrap();
        assert_eq!(tour.nodes(), &[0, 1, 2, 3, 4]);
        assert_eq!(tour.weight(&matrix), 15.0);
    }

    #[test]
    fn test_ring_finds_optimum() {
        for n in [3, 5, 8, 13] {
            let matrix = ring_matrix(n);
            let tour = MultiFragment.construct(&matrix).unwrap();
            assert_eq!(tour.weight(&matrix), n as f64);
        }
    }
}

mod nearest_neighbor {
    use super::*;

    #[test]
    fn test_prepends_to_front() {
        let matrix = square_cycle_matrix();
        let tour = NearestNeighbor.construct(&matrix).unwrap();
        assert_eq!(tour.nodes(), &[3, 2, 1, 0]);
        assert_eq!(tour.weight(&matrix), 12.0);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        // Every edge weighs the same: each step picks the lowest unvisited node.
        let matrix = tourforge_core::DistanceMatrix::from_fn(5, |_, _| 1.0).unwrap();
        let tour = NearestNeighbor.construct(&matrix).unwrap();
        assert_eq!(tour.nodes(), &[4, 3, 2, 1, 0]);
    }
}

mod double_ended {
    use super::*;

    #[test]
    fn test_alternates_front_and_back() {
        // Front: 1 next to 0. Back: 0 is 9 from both 2 and 3, 2 wins.
        // Front: 3 is the last node left.
        let matrix = square_cycle_matrix();
        let tour = DoubleEndedNearestNeighbor.construct(&matrix).unwrap();
        assert_eq!(tour.nodes(), &[3, 1, 0, 2]);
        assert_eq!(tour.weight(&matrix), 20.0);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let matrix = tourforge_core::DistanceMatrix::from_fn(5, |_, _| 1.0).unwrap();
        let tour = DoubleEndedNearestNeighbor.construct(&matrix).unwrap();
        assert_eq!(tour.nodes(), &[3, 1, 0, 2, 4]);
    }
}
