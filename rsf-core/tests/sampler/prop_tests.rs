//! Property-based tests for sampled forests.
//!
//! For arbitrary grid shapes, killing probabilities and seeds, the sampled
//! forest must cover every vertex exactly once, be acyclic, use only grid
//! edges, and have exactly one component per root.

use proptest::prelude::*;
use rsf_core::{sample_forest, seeded_rng, Boundary, GridGraph, Sampler, SamplerConfig};

use crate::common;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_forest_invariants(
        rows in 1usize..10,
        cols in 1usize..10,
        q in 0.0f64..0.95,
        seed in any::<u64>(),
    ) {
        let g = GridGraph::new(rows, cols).unwrap();
        let forest = sample_forest(&g, q, seed).unwrap();
        common::assert_spanning_forest(&forest, rows, cols);
        prop_assert_eq!(forest.validate(&g), Ok(()));

        let total: usize = forest.tree_sizes().iter().map(|&(_, size)| size).sum();
        prop_assert_eq!(total, rows * cols);
    }

    #[test]
    fn prop_no_killing_gives_spanning_tree(
        rows in 1usize..8,
        cols in 1usize..8,
        seed in any::<u64>(),
    ) {
        let g = GridGraph::new(rows, cols).unwrap();
        let forest = sample_forest(&g, 0.0, seed).unwrap();
        prop_assert_eq!(forest.num_roots(), 1);
        prop_assert_eq!(forest.edges().count(), rows * cols - 1);
        prop_assert_eq!(common::component_count(&forest), 1);
    }

    #[test]
    fn prop_deterministic(
        rows in 1usize..8,
        cols in 1usize..8,
        q in 0.0f64..0.9,
        seed in any::<u64>(),
    ) {
        let g = GridGraph::new(rows, cols).unwrap();
        let a = sample_forest(&g, q, seed).unwrap();
        let b = sample_forest(&g, q, seed).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_periodic_forest_invariants(
        rows in 1usize..8,
        cols in 1usize..8,
        q in 0.0f64..0.9,
        seed in any::<u64>(),
    ) {
        let g = GridGraph::with_boundary(rows, cols, Boundary::Periodic).unwrap();
        let forest = sample_forest(&g, q, seed).unwrap();
        prop_assert_eq!(forest.validate(&g), Ok(()));
        prop_assert_eq!(common::component_count(&forest), forest.num_roots());
    }

    #[test]
    fn prop_reused_sampler_matches_fresh(
        rows in 1usize..8,
        cols in 1usize..8,
        q in 0.0f64..0.9,
        seeds in proptest::collection::vec(any::<u64>(), 1..4),
    ) {
        let g = GridGraph::new(rows, cols).unwrap();
        let mut sampler = Sampler::new(&g, SamplerConfig::new(q)).unwrap();
        for seed in seeds {
            let reused = sampler.sample(&mut seeded_rng(seed)).unwrap();
            prop_assert_eq!(reused, sample_forest(&g, q, seed).unwrap());
        }
    }
}
