//! Wilson's algorithm with killing: sampling a random spanning forest.
//!
//! # Algorithm
//!
//! Vertices are processed in the graph's enumeration order. From every
//! vertex that is still unvisited, a loop-erased random walk is run until it
//! either **dies** or is **absorbed**:
//!
//! 1. Before every step the walker dies with probability `q`. The head of
//!    the current path becomes a new root.
//! 2. Otherwise it moves to a uniformly random neighbor.
//!    - Stepping onto a vertex already on the path erases the loop just
//!      closed; the path is cut back so that vertex is its head again.
//!    - Stepping onto a resolved vertex (root or in-tree) ends the walk.
//!    - Stepping onto a fresh vertex extends the path.
//! 3. The loop-free path is committed: every vertex but the last points to
//!    its successor. If the walk died, the last vertex becomes a root.
//!
//! ```text
//! walk:     s → a → b → a → c → T        T already in the forest
//! erased:   s → a → c → T                (loop a → b → a removed)
//! commit:   parent(s) = a, parent(a) = c, parent(c) = T
//! ```
//!
//! With `q = 0` nothing ever dies, so the first unvisited vertex is made a
//! root up front and the result is a single uniform spanning tree (on a
//! connected graph). With `q > 0` each death seeds a further tree.
//!
//! # Atomicity
//!
//! A walk touches the [`Forest`] only after it has ended, so a walk that
//! fails its step budget leaves the forest exactly as it found it.
//!
//! # Reproducibility
//!
//! The random source is consumed in a fixed order: per iteration, one
//! uniform (only when `q > 0`) and then one neighbor index. Identical graph,
//! configuration and seed therefore reproduce an identical forest.

mod config;
mod trace;
mod walk;

pub use config::{
    default_step_budget, SamplerConfig, LATTICE_DEGREE, MIN_DEFAULT_STEP_BUDGET,
    STEP_BUDGET_FACTOR,
};
pub use trace::{SampleStats, Trajectory};
pub use walk::Walk;

use tracing::{debug, trace, warn};

use crate::error::RsfError;
use crate::forest::Forest;
use crate::rng::{seeded_rng, RandomSource};
use crate::topology::{GridGraph, Topology};

/// How a call to [`Sampler::walk_from`] resolved its start vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    /// The start vertex was already resolved; nothing happened.
    Skipped,
    /// The start vertex became a root without moving, because it is
    /// isolated or because `q = 0` and the forest had no root yet.
    Seeded {
        /// The new root.
        root: u32,
    },
    /// The walker died; the head of its path became a new root.
    Died {
        /// The new root.
        root: u32,
        /// Vertices committed, root included.
        path_len: usize,
    },
    /// The walker stepped onto a vertex already in the forest.
    Absorbed {
        /// The resolved vertex that ended the walk.
        at: u32,
        /// Vertices on the committed path, including `at`.
        path_len: usize,
    },
}

enum WalkEnd {
    Died,
    Absorbed,
}

/// Samples spanning forests of a fixed topology.
///
/// The sampler owns only scratch state (the current walk) and counters. The
/// forest being grown is passed in explicitly, and the random source is
/// injected per call, so independent samples never share mutable state.
#[derive(Debug)]
pub struct Sampler<'g, T: Topology = GridGraph> {
    graph: &'g T,
    config: SamplerConfig,
    step_budget: u64,
    walk: Walk,
    stats: SampleStats,
    trajectory: Option<Trajectory>,
}

impl<'g, T: Topology> Sampler<'g, T> {
    /// Creates a sampler for `graph`.
    ///
    /// # Errors
    ///
    /// [`RsfError::InvalidParameter`] if the configuration is invalid, the
    /// graph has no vertices, or `q = 0` and the graph is disconnected
    /// (some walk could then never end).
    pub fn new(graph: &'g T, config: SamplerConfig) -> Result<Self, RsfError> {
        config.validate()?;
        let n = graph.num_vertices();
        if n == 0 {
            return Err(RsfError::invalid("graph", "must have at least one vertex"));
        }
        if config.killing_probability == 0.0 && !graph.is_connected() {
            return Err(RsfError::invalid(
                "q",
                "q = 0 requires a connected graph; use q > 0 for disconnected graphs",
            ));
        }

        Ok(Self {
            graph,
            config,
            step_budget: config.step_budget(n),
            walk: Walk::new(n),
            stats: SampleStats::default(),
            trajectory: config.record_trajectory.then(Trajectory::new),
        })
    }

    /// The topology being sampled.
    #[must_use]
    pub fn graph(&self) -> &'g T {
        self.graph
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Step budget applied to each walk.
    #[must_use]
    pub fn step_budget(&self) -> u64 {
        self.step_budget
    }

    /// Counters accumulated since creation or the last [`reset`](Self::reset).
    #[must_use]
    pub fn stats(&self) -> &SampleStats {
        &self.stats
    }

    /// The recorded trajectory, if recording is enabled.
    #[must_use]
    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.trajectory.as_ref()
    }

    /// Takes the recorded trajectory, leaving an empty one in its place.
    pub fn take_trajectory(&mut self) -> Option<Trajectory> {
        self.trajectory.as_mut().map(std::mem::take)
    }

    /// The loop-erased path of the most recent walk.
    ///
    /// Empty before the first walk, after a skipped or seeded start, and
    /// after a walk that exhausted its step budget.
    #[must_use]
    pub fn last_path(&self) -> &[u32] {
        self.walk.path()
    }

    /// Clears counters, trajectory and walk scratch.
    pub fn reset(&mut self) {
        self.stats = SampleStats::default();
        if let Some(t) = self.trajectory.as_mut() {
            *t = Trajectory::new();
        }
        self.walk.clear();
    }

    /// Samples a complete forest starting from all vertices unvisited.
    ///
    /// # Errors
    ///
    /// [`RsfError::UnreachableState`] if some walk exhausts its step budget.
    pub fn sample<R>(&mut self, rng: &mut R) -> Result<Forest, RsfError>
    where
        R: RandomSource + ?Sized,
    {
        let mut forest = Forest::new(self.graph.num_vertices());
        self.grow(&mut forest, rng)?;
        Ok(forest)
    }

    /// Resolves every remaining unvisited vertex of `forest`.
    ///
    /// Vertices are visited in enumeration order; resolved ones are
    /// skipped. On error, every walk that completed before the failing one
    /// stays committed.
    ///
    /// # Errors
    ///
    /// [`RsfError::InvalidParameter`] if `forest` was built for a different
    /// vertex count; [`RsfError::UnreachableState`] if a walk exhausts its
    /// step budget.
    pub fn grow<R>(&mut self, forest: &mut Forest, rng: &mut R) -> Result<(), RsfError>
    where
        R: RandomSource + ?Sized,
    {
        self.check_forest(forest)?;
        let n = self.graph.num_vertices();

        debug!(
            vertices = n,
            q = self.config.killing_probability,
            resolved = forest.num_resolved(),
            "growing spanning forest"
        );
        let steps_before = self.stats.steps;

        for start in self.graph.vertices() {
            if !forest.is_resolved(start) {
                self.walk_from(forest, start, rng)?;
            }
        }

        debug!(
            roots = forest.num_roots(),
            steps = self.stats.steps - steps_before,
            "spanning forest complete"
        );
        Ok(())
    }

    /// Runs one loop-erased walk from `start` and commits its path.
    ///
    /// A walk that exhausts its step budget is rolled back: the forest and
    /// the trajectory are left as they were. Its `walks` and `steps` still
    /// count in [`stats`](Self::stats).
    ///
    /// # Errors
    ///
    /// [`RsfError::InvalidParameter`] if `forest` was built for a different
    /// vertex count; [`RsfError::UnreachableState`] if the walk exhausts its
    /// step budget.
    pub fn walk_from<R>(
        &mut self,
        forest: &mut Forest,
        start: u32,
        rng: &mut R,
    ) -> Result<WalkOutcome, RsfError>
    where
        R: RandomSource + ?Sized,
    {
        self.check_forest(forest)?;
        if forest.is_resolved(start) {
            return Ok(WalkOutcome::Skipped);
        }

        self.stats.walks += 1;
        self.walk.clear();
        let mark = self.trajectory.as_ref().map_or(0, Trajectory::len);
        if let Some(t) = self.trajectory.as_mut() {
            t.visit(start);
        }

        let q = self.config.killing_probability;
        if self.graph.degree(start) == 0 || (q == 0.0 && forest.num_roots() == 0) {
            forest.make_root(start);
            self.stats.roots_seeded += 1;
            if let Some(t) = self.trajectory.as_mut() {
                t.mark_root();
            }
            trace!(start, "seeded root");
            return Ok(WalkOutcome::Seeded { root: start });
        }

        self.walk.restart(start);
        let mut here = start;
        let mut steps = 0u64;
        let end = loop {
            if q > 0.0 && rng.next_uniform() < q {
                break WalkEnd::Died;
            }
            if steps == self.step_budget {
                warn!(start, steps, "walk exhausted its step budget");
                self.stats.steps += steps;
                self.walk.clear();
                if let Some(t) = self.trajectory.as_mut() {
                    t.truncate(mark);
                }
                return Err(RsfError::UnreachableState { start, steps });
            }
            let Some(next) = self.graph.random_neighbor(here, rng) else {
                break WalkEnd::Died;
            };
            steps += 1;
            if let Some(t) = self.trajectory.as_mut() {
                t.visit(next);
            }
            here = next;

            if let Some(pos) = self.walk.position_of(next) {
                self.stats.loops_erased += 1;
                self.stats.vertices_erased += self.walk.erase_after(pos) as u64;
                continue;
            }
            self.walk.push(next);
            if forest.is_resolved(next) {
                break WalkEnd::Absorbed;
            }
        };
        self.stats.steps += steps;

        let path_len = self.walk.len();
        let last = self.walk.head().unwrap_or(start);
        let path = self.walk.path();
        let outcome = match end {
            WalkEnd::Died => {
                forest.make_root(last);
                self.stats.roots_killed += 1;
                if let Some(t) = self.trajectory.as_mut() {
                    t.mark_root();
                }
                WalkOutcome::Died { root: last, path_len }
            }
            WalkEnd::Absorbed => WalkOutcome::Absorbed { at: last, path_len },
        };
        for pair in path.windows(2) {
            forest.attach(pair[0], pair[1]);
        }

        trace!(start, steps, path_len, ?outcome, "walk committed");
        Ok(outcome)
    }

    fn check_forest(&self, forest: &Forest) -> Result<(), RsfError> {
        let n = self.graph.num_vertices();
        if forest.len() != n {
            return Err(RsfError::invalid(
                "forest",
                format!("has {} vertices but the graph has {n}", forest.len()),
            ));
        }
        Ok(())
    }
}

/// Samples a forest of `graph` with killing probability `q` from the
/// default generator seeded with `seed`.
///
/// This is the pure `(graph, q, seed) -> forest` entry point: equal inputs
/// give equal forests.
///
/// # Errors
///
/// See [`Sampler::new`] and [`Sampler::sample`].
pub fn sample_forest(graph: &GridGraph, q: f64, seed: u64) -> Result<Forest, RsfError> {
    let mut sampler = Sampler::new(graph, SamplerConfig::new(q))?;
    sampler.sample(&mut seeded_rng(seed))
}
