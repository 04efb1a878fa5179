//! Loop-erased path bookkeeping for a single walk.
//!
//! The path is an append-only sequence paired with a vertex → position
//! table, so revisit detection is a single lookup instead of a scan. Loop
//! erasure truncates both in lockstep.
//!
//! ```text
//! path:     [s, a, b, c]          walker steps onto a again
//! position: s→0 a→1 b→2 c→3
//!
//! erase_after(1)
//! path:     [s, a]
//! position: s→0 a→1 (b, c cleared)
//! ```
//!
//! The position table spans the whole graph and is allocated once; clearing
//! only touches the vertices currently on the path.

/// Marker for "not on the current path".
pub(crate) const NOT_ON_PATH: u32 = u32::MAX;

/// The ephemeral state of one loop-erased random walk.
#[derive(Debug, Clone)]
pub struct Walk {
    path: Vec<u32>,
    position: Vec<u32>,
}

impl Walk {
    /// Creates an empty walk over a graph of `num_vertices` vertices.
    #[must_use]
    pub fn new(num_vertices: usize) -> Self {
        Self {
            path: Vec::new(),
            position: vec![NOT_ON_PATH; num_vertices],
        }
    }

    /// Clears the previous walk and starts a new one at `start`.
    pub fn restart(&mut self, start: u32) {
        self.clear();
        self.push(start);
    }

    /// Forgets the current path.
    pub fn clear(&mut self) {
        for &v in &self.path {
            self.position[v as usize] = NOT_ON_PATH;
        }
        self.path.clear();
    }

    /// Appends `v`, which must not already be on the path.
    #[inline]
    pub fn push(&mut self, v: u32) {
        debug_assert_eq!(
            self.position[v as usize], NOT_ON_PATH,
            "vertex {v} is already on the path"
        );
        self.position[v as usize] = self.path.len() as u32;
        self.path.push(v);
    }

    /// Position of `v` on the path, if present.
    #[inline]
    #[must_use]
    pub fn position_of(&self, v: u32) -> Option<usize> {
        match self.position[v as usize] {
            NOT_ON_PATH => None,
            p => Some(p as usize),
        }
    }

    /// Drops every vertex after position `pos`, leaving `path[pos]` as the
    /// new head. Returns how many vertices were discarded.
    pub fn erase_after(&mut self, pos: usize) -> usize {
        let keep = pos + 1;
        for &v in &self.path[keep..] {
            self.position[v as usize] = NOT_ON_PATH;
        }
        let erased = self.path.len() - keep;
        self.path.truncate(keep);
        erased
    }

    /// Most recently added vertex.
    #[inline]
    #[must_use]
    pub fn head(&self) -> Option<u32> {
        self.path.last().copied()
    }

    /// The current loop-free path, start first.
    #[must_use]
    pub fn path(&self) -> &[u32] {
        &self.path
    }

    /// Number of vertices on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the path is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}
