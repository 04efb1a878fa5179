//! Sampler parameters.

use crate::error::RsfError;

/// Lower bound on the default per-walk step budget.
pub const MIN_DEFAULT_STEP_BUDGET: u64 = 1 << 20;

/// Multiplier applied to `|V|²` for the default per-walk step budget.
pub const STEP_BUDGET_FACTOR: u64 = 64;

/// Neighbor count used by [`SamplerConfig::from_root_weight`] on the lattice.
pub const LATTICE_DEGREE: usize = 4;

/// Parameters for one forest sampler.
///
/// ```ignore
/// let config = SamplerConfig::new(0.05)
///     .with_max_walk_steps(10_000)
///     .with_trajectory(true);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerConfig {
    /// Per-step probability that a walk dies and roots a new tree.
    pub killing_probability: f64,
    /// Upper bound on neighbor draws per walk. `None` selects
    /// [`default_step_budget`].
    pub max_walk_steps: Option<u64>,
    /// Whether to record every walker position.
    pub record_trajectory: bool,
}

impl SamplerConfig {
    /// Configuration with killing probability `q` and defaults otherwise.
    #[must_use]
    pub const fn new(q: f64) -> Self {
        Self {
            killing_probability: q,
            max_walk_steps: None,
            record_trajectory: false,
        }
    }

    /// Configuration from a root weight `w`: a walker at a vertex with
    /// `degree` neighbors dies with probability `w / (w + degree)`.
    ///
    /// # Errors
    ///
    /// [`RsfError::InvalidParameter`] unless `w` is finite and positive.
    pub fn from_root_weight(weight: f64, degree: usize) -> Result<Self, RsfError> {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(RsfError::invalid(
                "root_weight",
                format!("must be finite and positive, got {weight}"),
            ));
        }
        Ok(Self::new(weight / (weight + degree as f64)))
    }

    /// Sets an explicit per-walk step budget.
    #[must_use]
    pub const fn with_max_walk_steps(mut self, steps: u64) -> Self {
        self.max_walk_steps = Some(steps);
        self
    }

    /// Enables or disables trajectory recording.
    #[must_use]
    pub const fn with_trajectory(mut self, record: bool) -> Self {
        self.record_trajectory = record;
        self
    }

    /// Checks the parameters without looking at a graph.
    ///
    /// # Errors
    ///
    /// [`RsfError::InvalidParameter`] if `q` is not in `[0, 1)` (NaN
    /// included) or the step budget is zero.
    pub fn validate(&self) -> Result<(), RsfError> {
        let q = self.killing_probability;
        if !(0.0..1.0).contains(&q) {
            return Err(RsfError::invalid("q", format!("must lie in [0, 1), got {q}")));
        }
        if self.max_walk_steps == Some(0) {
            return Err(RsfError::invalid("max_walk_steps", "must be at least 1"));
        }
        Ok(())
    }

    /// Step budget for a graph with `num_vertices` vertices.
    #[must_use]
    pub fn step_budget(&self, num_vertices: usize) -> u64 {
        self.max_walk_steps
            .unwrap_or_else(|| default_step_budget(num_vertices))
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// `max(64·n², 2²⁰)`, saturating.
///
/// Hitting times of a random walk on an `n`-vertex lattice are far below
/// `n²`, so only a disconnected or otherwise broken graph reaches this.
#[must_use]
pub fn default_step_budget(num_vertices: usize) -> u64 {
    let n = num_vertices as u64;
    n.saturating_mul(n)
        .saturating_mul(STEP_BUDGET_FACTOR)
        .max(MIN_DEFAULT_STEP_BUDGET)
}
