//! The sampled spanning forest.
//!
//! A [`Forest`] stores one [`VertexStatus`] per vertex. Every vertex starts
//! [`Unvisited`](VertexStatus::Unvisited) and is resolved exactly once,
//! either as a [`Root`](VertexStatus::Root) or as
//! [`InTree`](VertexStatus::InTree) with a parent pointer. Resolution is
//! write-once: only the sampler resolves vertices, and it never touches a
//! resolved vertex again.
//!
//! # Structure
//!
//! Parent pointers always lead toward a root:
//!
//! ```text
//!  R ◄─ a ◄─ b         R: root
//!  ▲                   a: InTree { parent: R }
//!  └── c ◄─ d          b: InTree { parent: a }
//! ```
//!
//! Each tree is identified by its root, and roots are listed in the order
//! the sampler created them.

use thiserror::Error;

use crate::topology::Topology;

/// Resolution state of a single vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VertexStatus {
    /// Not yet reached by any walk.
    #[default]
    Unvisited,
    /// The root of its tree.
    Root,
    /// Attached to its tree through `parent`.
    InTree {
        /// Next vertex on the way to the root.
        parent: u32,
    },
}

impl VertexStatus {
    /// Whether this vertex is a root or has a parent.
    #[inline]
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        !matches!(self, VertexStatus::Unvisited)
    }
}

/// A broken forest invariant, reported by [`Forest::validate`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ForestViolation {
    /// The forest and the topology disagree on the vertex count.
    #[error("forest has {forest} vertices but the graph has {graph}")]
    SizeMismatch {
        /// Vertices in the forest.
        forest: usize,
        /// Vertices in the graph.
        graph: usize,
    },

    /// A vertex was never resolved.
    #[error("vertex {0} is unvisited")]
    Unresolved(u32),

    /// A parent pointer does not follow a graph edge.
    #[error("parent edge {child} -> {parent} is not an edge of the graph")]
    NotAnEdge {
        /// Vertex holding the pointer.
        child: u32,
        /// Vertex it points to.
        parent: u32,
    },

    /// Following parent pointers from a vertex never reaches a root.
    #[error("parent chain from vertex {0} does not reach a root")]
    Cycle(u32),

    /// The recorded root list disagrees with the vertex statuses.
    #[error("root list holds {listed} roots but {marked} vertices are marked root")]
    RootListMismatch {
        /// Length of the root list.
        listed: usize,
        /// Vertices whose status is `Root`.
        marked: usize,
    },
}

/// Parent-pointer representation of a (possibly partial) spanning forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forest {
    status: Vec<VertexStatus>,
    roots: Vec<u32>,
    resolved: usize,
}

impl Forest {
    /// Creates a forest in which all `num_vertices` vertices are unvisited.
    #[must_use]
    pub fn new(num_vertices: usize) -> Self {
        Self {
            status: vec![VertexStatus::Unvisited; num_vertices],
            roots: Vec::new(),
            resolved: 0,
        }
    }

    /// Number of vertices, resolved or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.status.len()
    }

    /// Whether the forest has no vertices at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_empty()
    }

    /// Status of vertex `v`.
    #[inline]
    #[must_use]
    pub fn status(&self, v: u32) -> VertexStatus {
        self.status[v as usize]
    }

    /// Per-vertex statuses in index order.
    #[must_use]
    pub fn statuses(&self) -> &[VertexStatus] {
        &self.status
    }

    /// Parent of `v`, if `v` is in a tree.
    #[inline]
    #[must_use]
    pub fn parent(&self, v: u32) -> Option<u32> {
        match self.status(v) {
            VertexStatus::InTree { parent } => Some(parent),
            _ => None,
        }
    }

    /// Whether `v` is a root.
    #[inline]
    #[must_use]
    pub fn is_root(&self, v: u32) -> bool {
        self.status(v) == VertexStatus::Root
    }

    /// Whether `v` is a root or in a tree.
    #[inline]
    #[must_use]
    pub fn is_resolved(&self, v: u32) -> bool {
        self.status(v).is_resolved()
    }

    /// Whether every vertex has been resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.resolved == self.status.len()
    }

    /// Number of resolved vertices.
    #[must_use]
    pub fn num_resolved(&self) -> usize {
        self.resolved
    }

    /// Roots in creation order.
    #[must_use]
    pub fn roots(&self) -> &[u32] {
        &self.roots
    }

    /// Number of roots, equal to the number of trees.
    #[must_use]
    pub fn num_roots(&self) -> usize {
        self.roots.len()
    }

    /// Root of the tree containing `v`.
    ///
    /// Returns `None` if the chain hits an unvisited vertex or does not end
    /// within `len()` hops.
    #[must_use]
    pub fn root_of(&self, v: u32) -> Option<u32> {
        let mut cur = v;
        for _ in 0..=self.status.len() {
            match self.status(cur) {
                VertexStatus::Root => return Some(cur),
                VertexStatus::InTree { parent } => cur = parent,
                VertexStatus::Unvisited => return None,
            }
        }
        None
    }

    /// Number of parent hops from `v` to its root.
    #[must_use]
    pub fn depth(&self, v: u32) -> Option<usize> {
        let mut cur = v;
        for hops in 0..=self.status.len() {
            match self.status(cur) {
                VertexStatus::Root => return Some(hops),
                VertexStatus::InTree { parent } => cur = parent,
                VertexStatus::Unvisited => return None,
            }
        }
        None
    }

    /// Tree edges as `(child, parent)` pairs, in child index order.
    pub fn edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.status
            .iter()
            .enumerate()
            .filter_map(|(v, s)| match *s {
                VertexStatus::InTree { parent } => Some((v as u32, parent)),
                _ => None,
            })
    }

    /// Size of every tree as `(root, vertex count)`, roots in creation order.
    ///
    /// Unresolved vertices are not counted.
    #[must_use]
    pub fn tree_sizes(&self) -> Vec<(u32, usize)> {
        let mut size = vec![0usize; self.status.len()];
        for v in 0..self.status.len() as u32 {
            if let Some(root) = self.root_of(v) {
                size[root as usize] += 1;
            }
        }
        self.roots.iter().map(|&r| (r, size[r as usize])).collect()
    }

    /// Checks every structural invariant against `graph`.
    ///
    /// Verifies coverage, that every parent pointer follows a graph edge,
    /// that all parent chains end at a root, and that the root list matches
    /// the vertex statuses. Runs in `O(|V|)`.
    ///
    /// # Errors
    ///
    /// The first [`ForestViolation`] found, scanning vertices in index order.
    pub fn validate<T: Topology + ?Sized>(&self, graph: &T) -> Result<(), ForestViolation> {
        let n = self.status.len();
        if n != graph.num_vertices() {
            return Err(ForestViolation::SizeMismatch {
                forest: n,
                graph: graph.num_vertices(),
            });
        }

        let mut marked = 0usize;
        for (v, s) in self.status.iter().enumerate() {
            let v = v as u32;
            match *s {
                VertexStatus::Unvisited => return Err(ForestViolation::Unresolved(v)),
                VertexStatus::Root => marked += 1,
                VertexStatus::InTree { parent } => {
                    if parent as usize >= n || !graph.is_adjacent(v, parent) {
                        return Err(ForestViolation::NotAnEdge { child: v, parent });
                    }
                }
            }
        }
        if marked != self.roots.len() || self.roots.iter().any(|&r| !self.is_root(r)) {
            return Err(ForestViolation::RootListMismatch {
                listed: self.roots.len(),
                marked,
            });
        }

        // 0 = unknown, 1 = on the chain being followed, 2 = reaches a root.
        let mut state = vec![0u8; n];
        let mut chain = Vec::new();
        for start in 0..n {
            let mut cur = start;
            while state[cur] == 0 {
                state[cur] = 1;
                chain.push(cur);
                match self.status[cur] {
                    VertexStatus::InTree { parent } => cur = parent as usize,
                    _ => break,
                }
            }
            if state[cur] == 1 && !self.is_root(cur as u32) {
                return Err(ForestViolation::Cycle(start as u32));
            }
            for v in chain.drain(..) {
                state[v] = 2;
            }
        }
        Ok(())
    }

    /// Marks `v` as a root.
    pub(crate) fn make_root(&mut self, v: u32) {
        debug_assert!(!self.is_resolved(v), "vertex {v} resolved twice");
        self.status[v as usize] = VertexStatus::Root;
        self.roots.push(v);
        self.resolved += 1;
    }

    /// Attaches `v` below `parent`.
    pub(crate) fn attach(&mut self, v: u32, parent: u32) {
        debug_assert!(!self.is_resolved(v), "vertex {v} resolved twice");
        self.status[v as usize] = VertexStatus::InTree { parent };
        self.resolved += 1;
    }
}

/// Builds forests directly from statuses, for exercising [`Forest::validate`].
#[cfg(test)]
pub(crate) fn forest_from_statuses(status: Vec<VertexStatus>) -> Forest {
    let roots: Vec<u32> = status
        .iter()
        .enumerate()
        .filter(|(_, s)| **s == VertexStatus::Root)
        .map(|(v, _)| v as u32)
        .collect();
    let resolved = status.iter().filter(|s| s.is_resolved()).count();
    Forest {
        status,
        roots,
        resolved,
    }
}
