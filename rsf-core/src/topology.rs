//! Lattice topology: the read-only graph oracle consulted by the sampler.
//!
//! The sampler only ever asks three questions of a graph: how many vertices
//! there are, which vertices neighbor a given one, and which neighbor a
//! random draw selects. [`Topology`] captures exactly that, and
//! [`GridGraph`] answers it for a `rows × cols` rectangular lattice.
//!
//! # Indexing
//!
//! Vertices are identified by a row-major linear index:
//!
//! ```text
//! idx = row * cols + col
//!
//!  0 ── 1 ── 2
//!  │    │    │
//!  3 ── 4 ── 5        (rows = 2, cols = 3)
//! ```
//!
//! Row-major order is also the enumeration order returned by
//! [`Topology::vertices`], which fixes the order in which the sampler
//! starts its walks.
//!
//! # Neighbor Order
//!
//! Neighbors are listed up, down, left, right, skipping any that fall off
//! an open boundary. [`Topology::random_neighbor`] picks
//! `neighbors[k]` with `k = next_index(degree)`, so scripted tests can
//! steer a walk by naming positions in this list.

use std::collections::VecDeque;
use std::ops::Range;

use crate::error::RsfError;
use crate::rng::RandomSource;

/// Maximum number of neighbors of a lattice vertex.
pub const MAX_DEGREE: usize = 4;

/// Read-only neighbor oracle over vertices `0..num_vertices()`.
///
/// Implementations must keep the neighbor relation symmetric, free of
/// self-loops and duplicates, and fixed for their whole lifetime.
///
/// # Implementing Custom Topologies
///
/// Only [`GridGraph`] is used in production. The trait exists so the
/// sampler can be exercised on small hand-built graphs:
///
/// ```ignore
/// struct Path3;
///
/// impl Topology for Path3 {
///     fn num_vertices(&self) -> usize { 3 }
///     fn degree(&self, v: u32) -> usize { if v == 1 { 2 } else { 1 } }
///     fn neighbor(&self, v: u32, k: usize) -> u32 {
///         match (v, k) { (1, 0) => 0, (1, _) => 2, _ => 1 }
///     }
/// }
/// ```
pub trait Topology {
    /// Total number of vertices.
    fn num_vertices(&self) -> usize;

    /// Number of neighbors of `v`.
    fn degree(&self, v: u32) -> usize;

    /// The `k`-th neighbor of `v`, for `k < degree(v)`.
    fn neighbor(&self, v: u32, k: usize) -> u32;

    /// All vertices in enumeration order.
    fn vertices(&self) -> Range<u32> {
        0..self.num_vertices() as u32
    }

    /// Calls `f` for each neighbor of `v`, in neighbor order.
    #[inline]
    fn for_each_neighbor<F>(&self, v: u32, mut f: F)
    where
        F: FnMut(u32),
    {
        for k in 0..self.degree(v) {
            f(self.neighbor(v, k));
        }
    }

    /// Neighbors of `v`, in neighbor order.
    fn neighbors(&self, v: u32) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.degree(v));
        self.for_each_neighbor(v, |w| out.push(w));
        out
    }

    /// Draws a neighbor of `v` uniformly at random.
    ///
    /// Returns `None` for an isolated vertex; otherwise consumes exactly one
    /// index draw from `rng`.
    #[inline]
    fn random_neighbor<R>(&self, v: u32, rng: &mut R) -> Option<u32>
    where
        R: RandomSource + ?Sized,
    {
        match self.degree(v) {
            0 => None,
            d => Some(self.neighbor(v, rng.next_index(d))),
        }
    }

    /// Whether `{u, v}` is an edge.
    fn is_adjacent(&self, u: u32, v: u32) -> bool {
        (0..self.degree(u)).any(|k| self.neighbor(u, k) == v)
    }

    /// Whether every vertex can reach every other one.
    ///
    /// Breadth-first search from vertex 0. The empty graph counts as
    /// connected.
    fn is_connected(&self) -> bool {
        let n = self.num_vertices();
        if n == 0 {
            return true;
        }
        let mut seen = vec![false; n];
        let mut queue = VecDeque::from([0u32]);
        seen[0] = true;
        let mut reached = 1usize;
        while let Some(v) = queue.pop_front() {
            self.for_each_neighbor(v, |w| {
                if !seen[w as usize] {
                    seen[w as usize] = true;
                    reached += 1;
                    queue.push_back(w);
                }
            });
        }
        reached == n
    }
}

/// Behavior at the edges of the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    /// Edge vertices simply have fewer neighbors.
    #[default]
    Open,
    /// Rows and columns wrap around (a discrete torus).
    ///
    /// An axis of length 1 contributes no neighbors (it would be a
    /// self-loop) and an axis of length 2 contributes one, since both
    /// directions reach the same vertex.
    Periodic,
}

/// A `rows × cols` lattice with 4-neighbor connectivity.
///
/// Neighbor lists are computed once at construction, so every query is a
/// table lookup. The graph is immutable afterwards and can be shared
/// read-only between independent samplers.
///
/// ```text
///     up
///      |
/// left-o-right
///      |
///    down
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridGraph {
    rows: usize,
    cols: usize,
    boundary: Boundary,
    adjacency: Vec<[u32; MAX_DEGREE]>,
    degrees: Vec<u8>,
}

impl GridGraph {
    /// Creates an open-boundary grid.
    ///
    /// # Errors
    ///
    /// [`RsfError::InvalidParameter`] if either dimension is zero or the
    /// vertex count does not fit in a `u32` index.
    pub fn new(rows: usize, cols: usize) -> Result<Self, RsfError> {
        Self::with_boundary(rows, cols, Boundary::Open)
    }

    /// Creates a grid with the given boundary behavior.
    ///
    /// # Errors
    ///
    /// Same as [`GridGraph::new`].
    pub fn with_boundary(rows: usize, cols: usize, boundary: Boundary) -> Result<Self, RsfError> {
        if rows == 0 {
            return Err(RsfError::invalid("rows", "grid must have at least one row"));
        }
        if cols == 0 {
            return Err(RsfError::invalid("cols", "grid must have at least one column"));
        }
        let n = rows
            .checked_mul(cols)
            .filter(|&n| n < u32::MAX as usize)
            .ok_or_else(|| {
                RsfError::invalid("rows", format!("{rows}x{cols} grid exceeds the u32 vertex space"))
            })?;

        let mut adjacency = Vec::with_capacity(n);
        let mut degrees = Vec::with_capacity(n);
        for row in 0..rows {
            for col in 0..cols {
                let (slots, degree) = lattice_neighbors(row, col, rows, cols, boundary);
                adjacency.push(slots);
                degrees.push(degree);
            }
        }

        Ok(Self {
            rows,
            cols,
            boundary,
            adjacency,
            degrees,
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Boundary behavior this grid was built with.
    #[must_use]
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Linear index of `(row, col)`, or `None` when out of bounds.
    #[must_use]
    pub fn index(&self, row: usize, col: usize) -> Option<u32> {
        (row < self.rows && col < self.cols).then(|| (row * self.cols + col) as u32)
    }

    /// `(row, col)` of vertex `v`.
    #[must_use]
    pub fn coord(&self, v: u32) -> (usize, usize) {
        let v = v as usize;
        debug_assert!(v < self.adjacency.len(), "vertex {v} out of range");
        (v / self.cols, v % self.cols)
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.degrees.iter().map(|&d| d as usize).sum::<usize>() / 2
    }
}

impl Topology for GridGraph {
    #[inline]
    fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    #[inline]
    fn degree(&self, v: u32) -> usize {
        self.degrees[v as usize] as usize
    }

    #[inline]
    fn neighbor(&self, v: u32, k: usize) -> u32 {
        debug_assert!(k < self.degree(v), "neighbor slot {k} out of range for vertex {v}");
        self.adjacency[v as usize][k]
    }

    fn is_connected(&self) -> bool {
        // Every lattice is connected.
        true
    }
}

/// Neighbor slots of `(row, col)` in up, down, left, right order.
fn lattice_neighbors(
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
    boundary: Boundary,
) -> ([u32; MAX_DEGREE], u8) {
    let wrap = boundary == Boundary::Periodic;
    let back = |i: usize, len: usize| match i {
        0 if wrap => Some(len - 1),
        0 => None,
        _ => Some(i - 1),
    };
    let forward = |i: usize, len: usize| match i + 1 {
        j if j < len => Some(j),
        _ if wrap => Some(0),
        _ => None,
    };

    let candidates = [
        back(row, rows).map(|r| (r, col)),
        forward(row, rows).map(|r| (r, col)),
        back(col, cols).map(|c| (row, c)),
        forward(col, cols).map(|c| (row, c)),
    ];

    let this = (row * cols + col) as u32;
    let mut slots = [u32::MAX; MAX_DEGREE];
    let mut degree = 0usize;
    for (r, c) in candidates.into_iter().flatten() {
        let w = (r * cols + c) as u32;
        if w != this && !slots[..degree].contains(&w) {
            slots[degree] = w;
            degree += 1;
        }
    }
    (slots, degree as u8)
}
