//! Counters and the optional walker trajectory.

/// Counters accumulated over one or more [`grow`](super::Sampler::grow) calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleStats {
    /// Walks started, including trivial ones that root their start vertex
    /// without moving.
    pub walks: u64,
    /// Neighbor draws across all walks.
    pub steps: u64,
    /// Revisits that triggered loop erasure.
    pub loops_erased: u64,
    /// Vertices discarded by loop erasure.
    pub vertices_erased: u64,
    /// Roots created by a death event.
    pub roots_killed: u64,
    /// Roots created without a walk: isolated vertices and the seed root
    /// required when `q = 0`.
    pub roots_seeded: u64,
}

/// Every walker position in the order visited.
///
/// Each walk contributes its start vertex followed by one entry per
/// neighbor draw, including draws whose loops were later erased. The
/// trajectory length is the total number of algorithm iterations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trajectory {
    positions: Vec<u32>,
    root_indices: Vec<usize>,
}

impl Trajectory {
    /// Creates an empty trajectory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Walker positions.
    #[must_use]
    pub fn positions(&self) -> &[u32] {
        &self.positions
    }

    /// Index into [`positions`](Self::positions) at which each root was
    /// created, in root creation order.
    #[must_use]
    pub fn root_indices(&self) -> &[usize] {
        &self.root_indices
    }

    /// Number of recorded positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub(crate) fn visit(&mut self, v: u32) {
        self.positions.push(v);
    }

    /// Drops positions from `len` on, along with any root created there.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.positions.truncate(len);
        self.root_indices.retain(|&i| i < len);
    }

    pub(crate) fn mark_root(&mut self) {
        self.root_indices.push(self.positions.len().saturating_sub(1));
    }
}
