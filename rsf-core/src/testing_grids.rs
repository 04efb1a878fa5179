//! Standard grid shapes and killing probabilities for tests and the CLI.

/// Configuration of a lattice to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl GridConfig {
    /// A `rows × cols` grid.
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// The largest square grid with at most `target_vertices` vertices,
    /// but never smaller than 1x1.
    #[must_use]
    pub fn from_target_vertices(target_vertices: usize) -> Self {
        let side = isqrt(target_vertices).max(1);
        Self::new(side, side)
    }

    /// Number of vertices.
    #[must_use]
    pub const fn num_vertices(&self) -> usize {
        self.rows * self.cols
    }
}

/// Killing probabilities spanning "almost one tree" to "mostly roots".
pub const KILLING_PROBS: [f64; 6] = [0.0, 0.001, 0.01, 0.05, 0.2, 0.5];

/// Integer square root using Newton's method.
/// Returns the largest integer s such that s*s <= n.
#[must_use]
pub fn isqrt(n: usize) -> usize {
    if n < 2 {
        return n;
    }
    let mut x = n;
    let mut y = x.div_ceil(2);
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// Predefined grid sizes.
pub struct TestGrids;

impl TestGrids {
    /// 2x2, the smallest grid with a cycle.
    pub const TINY: GridConfig = GridConfig::new(2, 2);

    /// 8x8.
    pub const SMALL: GridConfig = GridConfig::new(8, 8);

    /// 32x32.
    pub const MEDIUM: GridConfig = GridConfig::new(32, 32);

    /// 128x128.
    pub const LARGE: GridConfig = GridConfig::new(128, 128);

    /// Every preset, smallest first.
    pub const fn all() -> [GridConfig; 4] {
        [Self::TINY, Self::SMALL, Self::MEDIUM, Self::LARGE]
    }

    /// Looks a preset up by its lower-case name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<GridConfig> {
        match name {
            "tiny" => Some(Self::TINY),
            "small" => Some(Self::SMALL),
            "medium" => Some(Self::MEDIUM),
            "large" => Some(Self::LARGE),
            _ => None,
        }
    }
}
