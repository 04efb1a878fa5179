//! End-to-end sampling scenarios on small grids.

use crate::common;

use rsf_core::{
    sample_forest, seeded_rng, Boundary, Forest, GridGraph, RsfError, Sampler, SamplerConfig,
    ScriptedSource, Topology, VertexStatus, WalkOutcome,
};

#[test]
fn test_two_by_two_uniform_spanning_tree() {
    // 0 - 1
    // |   |
    // 2 - 3
    let g = GridGraph::new(2, 2).unwrap();
    let forest = sample_forest(&g, 0.0, 2024).unwrap();

    assert_eq!(forest.num_roots(), 1);
    let root = forest.roots()[0];
    let in_tree = (0..4)
        .filter(|&v| matches!(forest.status(v), VertexStatus::InTree { .. }))
        .count();
    assert_eq!(in_tree, 3);
    for v in 0..4 {
        assert_eq!(common::chase_to_root(&forest, v), root);
    }

    let all_edges = common::open_grid_edges(2, 2);
    let used: Vec<_> = forest.edges().map(common::undirected).collect();
    assert_eq!(used.len(), 3);
    assert!(used.iter().all(|e| all_edges.contains(e)));
    common::assert_spanning_forest(&forest, 2, 2);
}

#[test]
fn test_two_by_two_reaches_every_spanning_tree() {
    let g = GridGraph::new(2, 2).unwrap();
    let mut trees = std::collections::HashSet::new();
    for seed in 0..200 {
        let forest = sample_forest(&g, 0.0, seed).unwrap();
        let mut edges: Vec<_> = forest.edges().map(common::undirected).collect();
        edges.sort_unstable();
        trees.insert(edges);
    }
    // The 4-cycle has exactly four spanning trees.
    assert_eq!(trees.len(), 4);
}

#[test]
fn test_single_vertex_is_a_root() {
    let g = GridGraph::new(1, 1).unwrap();
    let mut sampler = Sampler::new(&g, SamplerConfig::new(0.4)).unwrap();
    let forest = sampler.sample(&mut ScriptedSource::default()).unwrap();
    assert_eq!(forest.roots(), &[0]);
    assert_eq!(forest.edges().count(), 0);
    assert_eq!(sampler.stats().steps, 0);
    assert_eq!(sampler.stats().roots_seeded, 1);
}

#[test]
fn test_path_graph_without_killing_is_one_tree() {
    for n in [2, 5, 17] {
        let g = GridGraph::new(1, n).unwrap();
        for seed in 0..10 {
            let forest = sample_forest(&g, 0.0, seed).unwrap();
            assert_eq!(forest.roots(), &[0], "n={n} seed={seed}");
            // A path has a single spanning tree: every vertex points left.
            for v in 1..n as u32 {
                assert_eq!(forest.parent(v), Some(v - 1));
            }
        }
    }
}

#[test]
fn test_without_killing_root_is_first_vertex() {
    let g = GridGraph::new(6, 6).unwrap();
    for seed in 0..5 {
        let forest = sample_forest(&g, 0.0, seed).unwrap();
        assert_eq!(forest.roots(), &[0]);
        common::assert_spanning_forest(&forest, 6, 6);
    }
}

#[test]
fn test_same_seed_same_forest() {
    let g = GridGraph::new(12, 9).unwrap();
    for q in [0.0, 0.05, 0.5] {
        let a = sample_forest(&g, q, 77).unwrap();
        let b = sample_forest(&g, q, 77).unwrap();
        assert_eq!(a, b, "q={q}");
    }
}

#[test]
fn test_different_seeds_differ() {
    let g = GridGraph::new(10, 10).unwrap();
    let forests: Vec<Forest> = (0..5).map(|s| sample_forest(&g, 0.05, s).unwrap()).collect();
    assert!(forests.windows(2).any(|w| w[0] != w[1]));
}

#[test]
fn test_sampler_matches_convenience_entry_point() {
    let g = GridGraph::new(7, 4).unwrap();
    let mut sampler = Sampler::new(&g, SamplerConfig::new(0.1)).unwrap();
    let forest = sampler.sample(&mut seeded_rng(5)).unwrap();
    assert_eq!(forest, sample_forest(&g, 0.1, 5).unwrap());
}

#[test]
fn test_stats_are_consistent() {
    let g = GridGraph::new(9, 9).unwrap();
    let mut sampler = Sampler::new(&g, SamplerConfig::new(0.02)).unwrap();
    let forest = sampler.sample(&mut seeded_rng(11)).unwrap();
    let stats = sampler.stats();
    assert_eq!(
        (stats.roots_killed + stats.roots_seeded) as usize,
        forest.num_roots()
    );
    assert!(stats.walks as usize <= g.num_vertices());
    assert!(stats.walks as usize >= forest.num_roots());
    assert!(stats.vertices_erased >= stats.loops_erased);

    sampler.reset();
    assert_eq!(*sampler.stats(), Default::default());
}

#[test]
fn test_trajectory_lines_up_with_roots() {
    let g = GridGraph::new(8, 8).unwrap();
    let config = SamplerConfig::new(0.05).with_trajectory(true);
    let mut sampler = Sampler::new(&g, config).unwrap();
    let forest = sampler.sample(&mut seeded_rng(3)).unwrap();
    let stats = *sampler.stats();
    let t = sampler.trajectory().unwrap();

    assert_eq!(t.len() as u64, stats.walks + stats.steps);
    assert_eq!(t.root_indices().len(), forest.num_roots());
    for (&idx, &root) in t.root_indices().iter().zip(forest.roots()) {
        assert_eq!(t.positions()[idx], root);
    }
    assert!(t.root_indices().windows(2).all(|w| w[0] < w[1]));
    // Every step moves to a grid neighbor; walk boundaries may or may not.
    let adjacent = t
        .positions()
        .windows(2)
        .filter(|w| g.is_adjacent(w[0], w[1]))
        .count();
    assert!(adjacent as u64 >= stats.steps);
}

#[test]
fn test_grow_completes_partial_forest() {
    let g = GridGraph::new(5, 5).unwrap();
    let mut sampler = Sampler::new(&g, SamplerConfig::new(0.1)).unwrap();
    let mut rng = seeded_rng(8);
    let mut forest = Forest::new(g.num_vertices());

    // Resolve the center first, then let grow handle the rest.
    let center = g.index(2, 2).unwrap();
    let first = sampler.walk_from(&mut forest, center, &mut rng).unwrap();
    assert!(matches!(
        first,
        WalkOutcome::Died { .. } | WalkOutcome::Absorbed { .. }
    ));
    assert!(forest.is_resolved(center));

    sampler.grow(&mut forest, &mut rng).unwrap();
    common::assert_spanning_forest(&forest, 5, 5);

    // A complete forest is left alone.
    let before = forest.clone();
    sampler.grow(&mut forest, &mut rng).unwrap();
    assert_eq!(forest, before);
}

#[test]
fn test_periodic_grid_forest_is_valid() {
    let g = GridGraph::with_boundary(6, 6, Boundary::Periodic).unwrap();
    for q in [0.0, 0.1] {
        let forest = sample_forest(&g, q, 21).unwrap();
        assert_eq!(forest.validate(&g), Ok(()));
        assert_eq!(common::component_count(&forest), forest.num_roots());
    }
}

#[test]
fn test_tiny_step_budget_is_unreachable_state() {
    let g = GridGraph::new(10, 10).unwrap();
    let config = SamplerConfig::new(0.0).with_max_walk_steps(1);
    let mut sampler = Sampler::new(&g, config).unwrap();
    let mut forest = Forest::new(g.num_vertices());
    let err = sampler.grow(&mut forest, &mut seeded_rng(1)).unwrap_err();

    let RsfError::UnreachableState { start, steps } = err else {
        panic!("expected UnreachableState, got {err:?}");
    };
    assert_eq!(steps, 1);
    assert!(!forest.is_resolved(start));
    // Everything committed before the failure is still a valid partial forest.
    for v in g.vertices().filter(|&v| forest.is_resolved(v)) {
        assert_eq!(forest.root_of(v), Some(0));
    }
}

#[test]
fn test_invalid_parameters_are_rejected_up_front() {
    let g = GridGraph::new(3, 3).unwrap();
    for q in [1.0, 2.0, -1e-9, f64::NAN] {
        let err = Sampler::new(&g, SamplerConfig::new(q)).unwrap_err();
        assert!(matches!(err, RsfError::InvalidParameter { name: "q", .. }));
        assert!(sample_forest(&g, q, 0).is_err());
    }
    assert!(matches!(
        GridGraph::new(0, 4),
        Err(RsfError::InvalidParameter { .. })
    ));
}
