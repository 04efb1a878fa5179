//! Text rendering of forests and trajectories.

use std::fmt::Write;

use rsf_core::{Boundary, Forest, GridGraph, Topology, Trajectory, VertexStatus};

/// Character drawn for a root.
pub const ROOT_GLYPH: char = 'R';

/// Character drawn for a vertex that was never resolved.
pub const UNVISITED_GLYPH: char = '.';

/// Draws `forest` as one line per grid row.
///
/// Every vertex shows an arrow toward its parent (`^ v < >`), `R` for a
/// root and `.` for an unvisited vertex.
pub fn render_forest(graph: &GridGraph, forest: &Forest) -> String {
    let mut out = String::with_capacity(graph.num_vertices() + graph.rows());
    for row in 0..graph.rows() {
        for col in 0..graph.cols() {
            let v = (row * graph.cols() + col) as u32;
            let glyph = match forest.status(v) {
                VertexStatus::Unvisited => UNVISITED_GLYPH,
                VertexStatus::Root => ROOT_GLYPH,
                VertexStatus::InTree { parent } => arrow(graph, v, parent),
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

fn arrow(graph: &GridGraph, child: u32, parent: u32) -> char {
    let (r, c) = graph.coord(child);
    let (pr, pc) = graph.coord(parent);
    let (rows, cols) = (graph.rows(), graph.cols());
    let wrap = graph.boundary() == Boundary::Periodic;

    let up = pr + 1 == r || (wrap && r == 0 && pr == rows - 1);
    let down = r + 1 == pr || (wrap && pr == 0 && r == rows - 1);
    let left = pc + 1 == c || (wrap && c == 0 && pc == cols - 1);
    let right = c + 1 == pc || (wrap && pc == 0 && c == cols - 1);

    if pc == c && up {
        '^'
    } else if pc == c && down {
        'v'
    } else if pr == r && left {
        '<'
    } else if pr == r && right {
        '>'
    } else {
        '?'
    }
}

/// Lists roots as `(row, col)` pairs, the trajectory index at which each
/// was created and the total iteration count.
pub fn render_trajectory(graph: &GridGraph, forest: &Forest, trajectory: &Trajectory) -> String {
    let mut out = String::new();
    let roots: Vec<String> = forest
        .roots()
        .iter()
        .map(|&v| {
            let (r, c) = graph.coord(v);
            format!("({r}, {c})")
        })
        .collect();
    let _ = writeln!(out, "roots: [{}]", roots.join(", "));
    let _ = writeln!(out, "root indices: {:?}", trajectory.root_indices());
    let _ = writeln!(out, "total iterations: {}", trajectory.len());
    out
}
