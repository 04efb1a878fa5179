//! Per-sample summaries and aggregate statistics.

use std::time::Duration;

use rsf_core::{Forest, SampleStats};

/// Summary of one sampled forest.
#[derive(Debug, Clone)]
pub struct SampleSummary {
    /// Sample number within the run.
    pub index: usize,
    /// Number of vertices in the grid.
    pub vertices: usize,
    /// Number of trees.
    pub roots: usize,
    /// Vertex count of the largest tree.
    pub largest_tree: usize,
    /// Walks started.
    pub walks: u64,
    /// Random-walk steps.
    pub steps: u64,
    /// Loops erased.
    pub loops_erased: u64,
    /// Wall-clock sampling time.
    pub elapsed: Duration,
}

impl SampleSummary {
    /// Summarizes `forest` and the sampler counters that produced it.
    pub fn new(index: usize, forest: &Forest, stats: &SampleStats, elapsed: Duration) -> Self {
        let largest_tree = forest
            .tree_sizes()
            .iter()
            .map(|&(_, size)| size)
            .max()
            .unwrap_or(0);
        Self {
            index,
            vertices: forest.len(),
            roots: forest.num_roots(),
            largest_tree,
            walks: stats.walks,
            steps: stats.steps,
            loops_erased: stats.loops_erased,
            elapsed,
        }
    }

    /// Fraction of vertices that are roots.
    pub fn root_fraction(&self) -> f64 {
        if self.vertices == 0 {
            0.0
        } else {
            self.roots as f64 / self.vertices as f64
        }
    }

    /// Format as CSV row.
    pub fn to_csv(&self) -> String {
        format!(
            "{},{},{},{:.6},{},{},{},{},{:.3}",
            self.index,
            self.vertices,
            self.roots,
            self.root_fraction(),
            self.largest_tree,
            self.walks,
            self.steps,
            self.loops_erased,
            self.elapsed.as_secs_f64() * 1e6,
        )
    }
}

/// CSV header matching [`SampleSummary::to_csv`].
pub const CSV_HEADER: &str =
    "sample,vertices,roots,root_fraction,largest_tree,walks,steps,loops_erased,sample_us";

/// Location and spread of a list of observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub p50: f64,
    pub p95: f64,
}

/// Calculate summary statistics of `values`.
pub fn describe(values: &[f64]) -> Distribution {
    if values.is_empty() {
        return Distribution {
            mean: 0.0,
            std_dev: 0.0,
            min: 0.0,
            max: 0.0,
            p50: 0.0,
            p95: 0.0,
        };
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let var = if n > 1 {
        sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };

    Distribution {
        mean,
        std_dev: var.sqrt(),
        min: sorted[0],
        max: sorted[n - 1],
        p50: percentile(&sorted, 50.0),
        p95: percentile(&sorted, 95.0),
    }
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = (p / 100.0 * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Wilson score interval for binomial proportion.
///
/// Returns (lower, upper) bounds for the true probability given
/// observed successes out of trials, at confidence level z.
/// z = 1.96 for 95% CI, z = 2.576 for 99% CI.
pub fn wilson_ci(successes: usize, trials: usize, z: f64) -> (f64, f64) {
    if trials == 0 {
        return (0.0, 1.0);
    }

    let n = trials as f64;
    let p = successes as f64 / n;
    let z2 = z * z;

    let denom = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denom;
    let spread = z * ((p * (1.0 - p) + z2 / (4.0 * n)) / n).sqrt() / denom;

    ((center - spread).max(0.0), (center + spread).min(1.0))
}

/// Format a large number with K/M/G suffixes.
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.1}G", n as f64 / 1e9)
    } else if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1e6)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1e3)
    } else {
        format!("{}", n)
    }
}
