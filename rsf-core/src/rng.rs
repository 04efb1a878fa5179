//! Random source seam for the sampler.
//!
//! The sampler never touches a global generator. It consumes exactly two
//! kinds of draws from an injected [`RandomSource`]: a uniform in `[0, 1)`
//! for the death check and a bounded index for the neighbor choice. Any
//! [`rand::RngCore`] is a `RandomSource`; tests substitute a
//! [`ScriptedSource`] to force specific loop-erasure and death branches.

use std::collections::VecDeque;

use rand::{Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Generator used whenever a sample is requested by seed alone.
pub type DefaultRng = Xoshiro256PlusPlus;

/// Creates the default generator for `seed`.
///
/// Identical seeds yield identical streams, which is what makes
/// `(graph, q, seed) -> forest` reproducible.
#[must_use]
pub fn seeded_rng(seed: u64) -> DefaultRng {
    Xoshiro256PlusPlus::seed_from_u64(seed)
}

/// A sequential stream of random draws.
pub trait RandomSource {
    /// Returns a uniform sample from `[0, 1)`.
    fn next_uniform(&mut self) -> f64;

    /// Returns a uniform index in `0..n`.
    ///
    /// Callers guarantee `n > 0`.
    fn next_index(&mut self, n: usize) -> usize;
}

impl<R: RngCore> RandomSource for R {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.random::<f64>()
    }

    #[inline]
    fn next_index(&mut self, n: usize) -> usize {
        self.random_range(0..n)
    }
}

/// Deterministic [`RandomSource`] replaying pre-recorded draws.
///
/// Uniforms and indices live in separate queues, so a script only has to
/// list the draws of each kind in the order the sampler will request them.
/// Indices are reduced modulo the requested bound.
///
/// # Panics
///
/// Panics when the sampler requests a draw from an exhausted queue. A
/// scripted test that runs dry has mis-modelled the walk.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    uniforms: VecDeque<f64>,
    indices: VecDeque<usize>,
}

impl ScriptedSource {
    /// Creates a source replaying `uniforms` and `indices` in order.
    pub fn new(
        uniforms: impl IntoIterator<Item = f64>,
        indices: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            uniforms: uniforms.into_iter().collect(),
            indices: indices.into_iter().collect(),
        }
    }

    /// Creates a source that only serves neighbor indices.
    ///
    /// Suitable for `q = 0`, where the sampler never draws a uniform.
    pub fn indices_only(indices: impl IntoIterator<Item = usize>) -> Self {
        Self::new(core::iter::empty(), indices)
    }

    /// Number of uniforms not yet consumed.
    #[must_use]
    pub fn remaining_uniforms(&self) -> usize {
        self.uniforms.len()
    }

    /// Number of indices not yet consumed.
    #[must_use]
    pub fn remaining_indices(&self) -> usize {
        self.indices.len()
    }
}

impl RandomSource for ScriptedSource {
    fn next_uniform(&mut self) -> f64 {
        match self.uniforms.pop_front() {
            Some(u) => u,
            None => panic!("scripted source ran out of uniforms"),
        }
    }

    fn next_index(&mut self, n: usize) -> usize {
        match self.indices.pop_front() {
            Some(k) => k % n,
            None => panic!("scripted source ran out of indices (bound {n})"),
        }
    }
}
