//! The sampler over hand-built topologies.

use rsf_core::{
    seeded_rng, Forest, RsfError, Sampler, SamplerConfig, ScriptedSource, Topology, WalkOutcome,
};

/// Two disjoint edges: 0 - 1 and 2 - 3.
#[derive(Debug)]
struct TwoIslands;

impl Topology for TwoIslands {
    fn num_vertices(&self) -> usize {
        4
    }

    fn degree(&self, _v: u32) -> usize {
        1
    }

    fn neighbor(&self, v: u32, _k: usize) -> u32 {
        v ^ 1
    }
}

/// A cycle on `n` vertices; neighbor 0 is the predecessor, 1 the successor.
#[derive(Debug)]
struct Ring(u32);

impl Topology for Ring {
    fn num_vertices(&self) -> usize {
        self.0 as usize
    }

    fn degree(&self, _v: u32) -> usize {
        2
    }

    fn neighbor(&self, v: u32, k: usize) -> u32 {
        if k == 0 {
            (v + self.0 - 1) % self.0
        } else {
            (v + 1) % self.0
        }
    }
}

/// No vertices at all.
#[derive(Debug)]
struct Empty;

impl Topology for Empty {
    fn num_vertices(&self) -> usize {
        0
    }

    fn degree(&self, _v: u32) -> usize {
        0
    }

    fn neighbor(&self, v: u32, k: usize) -> u32 {
        unreachable!("vertex {v} has no neighbor {k}")
    }
}

#[test]
fn test_disconnected_without_killing_is_rejected() {
    assert!(!TwoIslands.is_connected());
    let err = Sampler::new(&TwoIslands, SamplerConfig::new(0.0)).unwrap_err();
    assert!(matches!(err, RsfError::InvalidParameter { name: "q", .. }));
}

#[test]
fn test_disconnected_with_killing_samples_each_island() {
    let mut sampler = Sampler::new(&TwoIslands, SamplerConfig::new(0.3)).unwrap();
    for seed in 0..20 {
        let forest = sampler.sample(&mut seeded_rng(seed)).unwrap();
        assert_eq!(forest.validate(&TwoIslands), Ok(()));
        // Each island needs its own root.
        assert!(forest.num_roots() >= 2);
        assert_ne!(forest.root_of(0), forest.root_of(2));
    }
}

#[test]
fn test_empty_topology_is_rejected() {
    let err = Sampler::new(&Empty, SamplerConfig::new(0.5)).unwrap_err();
    assert!(matches!(err, RsfError::InvalidParameter { name: "graph", .. }));
}

#[test]
fn test_ring_loop_erasure_around_the_cycle() {
    // Ring of 6; root 0 is seeded. From 3 the walker goes 4, 5, then back
    // 4, 3 (erasing 5, then 4), then 2, 1, 0.
    let ring = Ring(6);
    let mut sampler = Sampler::new(&ring, SamplerConfig::new(0.0)).unwrap();
    let mut forest = Forest::new(6);
    sampler
        .walk_from(&mut forest, 0, &mut ScriptedSource::default())
        .unwrap();

    let mut rng = ScriptedSource::indices_only([1, 1, 0, 0, 0, 0, 0]);
    let outcome = sampler.walk_from(&mut forest, 3, &mut rng).unwrap();
    assert_eq!(outcome, WalkOutcome::Absorbed { at: 0, path_len: 4 });
    assert_eq!(sampler.last_path(), &[3, 2, 1, 0]);
    assert_eq!(forest.parent(3), Some(2));
    assert_eq!(forest.parent(2), Some(1));
    assert_eq!(forest.parent(1), Some(0));
    assert!(!forest.is_resolved(4));
    assert!(!forest.is_resolved(5));
    assert_eq!(sampler.stats().loops_erased, 2);
    assert_eq!(sampler.stats().vertices_erased, 2);
}

#[test]
fn test_ring_walk_can_wrap_to_the_root() {
    // From 3 the walker goes forward 4, 5, 0 and is absorbed across the seam.
    let ring = Ring(6);
    let mut sampler = Sampler::new(&ring, SamplerConfig::new(0.0)).unwrap();
    let mut forest = Forest::new(6);
    sampler
        .walk_from(&mut forest, 0, &mut ScriptedSource::default())
        .unwrap();

    let mut rng = ScriptedSource::indices_only([1, 1, 1]);
    let outcome = sampler.walk_from(&mut forest, 3, &mut rng).unwrap();
    assert_eq!(outcome, WalkOutcome::Absorbed { at: 0, path_len: 4 });
    assert_eq!(sampler.last_path(), &[3, 4, 5, 0]);
    assert_eq!(sampler.stats().loops_erased, 0);
}
