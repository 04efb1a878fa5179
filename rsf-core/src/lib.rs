//! # rsf-core: Random Spanning Forests of 2D Lattices
//!
//! `rsf-core` samples random spanning forests of a rectangular lattice with
//! Wilson's loop-erased random-walk algorithm, modified so that every walk
//! can be *killed*: at each step the walker dies with probability `q` and
//! the vertex it stands on becomes the root of a new tree.
//!
//! ## Overview
//!
//! 1. **Build the lattice** - [`GridGraph`] enumerates vertices row-major
//!    and answers neighbor queries.
//! 2. **Run the sampler** - [`Sampler`] starts a loop-erased walk from each
//!    unvisited vertex, in order, and grows a [`Forest`].
//! 3. **Read the forest** - every vertex is either a root or points to a
//!    parent on the way to one.
//!
//! With `q = 0` the result is a uniform spanning tree; as `q` approaches 1
//! nearly every vertex becomes its own root.
//!
//! ## Quick Start
//!
//! ```ignore
//! use rsf_core::{sample_forest, GridGraph};
//!
//! let grid = GridGraph::new(32, 32)?;
//! let forest = sample_forest(&grid, 0.01, 42)?;
//!
//! println!("{} trees", forest.num_roots());
//! for (child, parent) in forest.edges() {
//!     // draw the edge
//! }
//! ```
//!
//! For scripted randomness, trajectories or step budgets, construct a
//! [`Sampler`] with a [`SamplerConfig`] and pass any [`RandomSource`].
//!
//! ## Module Organization
//!
//! - [`topology`] - Lattice connectivity and the [`Topology`] seam
//! - [`sampler`] - Wilson's algorithm with killing, walk state, statistics
//! - [`forest`] - The parent-pointer forest and its invariant checks
//! - [`rng`] - The injected random source and a scripted test double
//! - [`error`] - Error taxonomy
//! - [`testing_grids`] - Standard grid sizes and killing probabilities

#![deny(missing_docs)]

/// Error taxonomy.
pub mod error;

/// Parent-pointer spanning forests.
pub mod forest;

/// Random sources.
pub mod rng;

/// Wilson's algorithm with killing.
pub mod sampler;

/// Pre-configured grid sizes and killing probabilities.
pub mod testing_grids;

/// Lattice topology.
pub mod topology;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use error::RsfError;
pub use forest::{Forest, ForestViolation, VertexStatus};
pub use rng::{seeded_rng, DefaultRng, RandomSource, ScriptedSource};
pub use sampler::{
    sample_forest, SampleStats, Sampler, SamplerConfig, Trajectory, WalkOutcome, LATTICE_DEGREE,
};
pub use testing_grids::{GridConfig, TestGrids, KILLING_PROBS};
pub use topology::{Boundary, GridGraph, Topology};
