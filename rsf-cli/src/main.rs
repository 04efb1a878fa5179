//! Random spanning forest sampler for 2D lattices.
//!
//! Runs Wilson's algorithm with killing probability `q` and reports the
//! resulting forests.
//!
//! # Usage
//!
//! ```bash
//! # One 20x20 forest with q = 0.01
//! cargo run --release -p rsf-cli -- --rows 20 --cols 20 --q 0.01 --print-forest
//!
//! # 1000 samples on a preset grid, CSV rows to stdout
//! cargo run --release -p rsf-cli -- --preset medium --q 0.05 --samples 1000 --csv
//!
//! # Root weight instead of a probability: q = w / (w + 4)
//! cargo run --release -p rsf-cli -- --root-weight 0.5 --trajectory
//! ```

mod render;
mod stats;

use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rsf_core::{
    seeded_rng, Boundary, GridConfig, GridGraph, Sampler, SamplerConfig, TestGrids, Topology,
    LATTICE_DEGREE,
};

use crate::render::{render_forest, render_trajectory};
use crate::stats::{describe, format_number, wilson_ci, SampleSummary, CSV_HEADER};

/// Killing probability used when neither `--q` nor `--root-weight` is given.
const DEFAULT_Q: f64 = 0.01;

#[derive(Parser, Debug)]
#[command(name = "rsf")]
#[command(about = "Sample random spanning forests of a 2D lattice with Wilson's algorithm")]
struct Args {
    /// Grid rows
    #[arg(long, default_value_t = 20)]
    rows: usize,

    /// Grid columns
    #[arg(long, default_value_t = 20)]
    cols: usize,

    /// Named grid size (tiny, small, medium, large); overrides --rows/--cols
    #[arg(long)]
    preset: Option<String>,

    /// Per-step killing probability in [0, 1)
    #[arg(long, conflicts_with = "root_weight")]
    q: Option<f64>,

    /// Root weight w; killing probability becomes w / (w + 4)
    #[arg(long)]
    root_weight: Option<f64>,

    /// Wrap rows and columns into a torus
    #[arg(long)]
    periodic: bool,

    /// Random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of independent forests to sample
    #[arg(long, default_value_t = 1)]
    samples: usize,

    /// Per-walk step budget (default: max(64·n², 2^20))
    #[arg(long)]
    max_walk_steps: Option<u64>,

    /// Output per-sample results as CSV to stdout
    #[arg(long)]
    csv: bool,

    /// Check every forest against the grid
    #[arg(long)]
    verify: bool,

    /// Draw each forest as an arrow grid
    #[arg(long)]
    print_forest: bool,

    /// Record the walker trajectory and print roots, root indices and iterations
    #[arg(long)]
    trajectory: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid --log-level {level:?}"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn grid_config(args: &Args) -> Result<GridConfig> {
    match args.preset.as_deref() {
        Some(name) => TestGrids::by_name(name)
            .with_context(|| format!("unknown preset {name:?} (tiny, small, medium, large)")),
        None => Ok(GridConfig::new(args.rows, args.cols)),
    }
}

fn sampler_config(args: &Args) -> Result<SamplerConfig> {
    let mut config = match (args.q, args.root_weight) {
        (_, Some(w)) => SamplerConfig::from_root_weight(w, LATTICE_DEGREE)
            .context("invalid --root-weight")?,
        (q, None) => SamplerConfig::new(q.unwrap_or(DEFAULT_Q)),
    };
    if let Some(steps) = args.max_walk_steps {
        config = config.with_max_walk_steps(steps);
    }
    config = config.with_trajectory(args.trajectory);
    config.validate().context("invalid sampler configuration")?;
    Ok(config)
}

/// Generators for successive samples: the seeded stream, then one
/// `jump()` further for each following sample.
fn sample_streams(seed: u64) -> impl Iterator<Item = Xoshiro256PlusPlus> {
    let mut base = seeded_rng(seed);
    std::iter::repeat_with(move || {
        let rng = base.clone();
        base.jump();
        rng
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    if args.samples == 0 {
        bail!("--samples must be at least 1");
    }

    let grid = grid_config(&args)?;
    let boundary = if args.periodic {
        Boundary::Periodic
    } else {
        Boundary::Open
    };
    let graph = GridGraph::with_boundary(grid.rows, grid.cols, boundary)
        .context("cannot build grid")?;
    let config = sampler_config(&args)?;
    let mut sampler = Sampler::new(&graph, config).context("cannot create sampler")?;

    info!(
        rows = grid.rows,
        cols = grid.cols,
        ?boundary,
        q = config.killing_probability,
        samples = args.samples,
        seed = args.seed,
        "sampling"
    );

    // Header goes to stderr in CSV mode
    let print_info = |s: &str| {
        if args.csv {
            eprintln!("{}", s);
        } else {
            println!("{}", s);
        }
    };

    print_info(&format!(
        "Random spanning forest: {}x{} {:?} grid, q={:.6}, seed={}",
        grid.rows, grid.cols, boundary, config.killing_probability, args.seed
    ));
    print_info(&"=".repeat(70));

    if args.csv {
        println!("{}", CSV_HEADER);
    }

    let mut summaries = Vec::with_capacity(args.samples);

    for (index, mut rng) in sample_streams(args.seed).take(args.samples).enumerate() {
        sampler.reset();
        let start = Instant::now();
        let forest = sampler
            .sample(&mut rng)
            .with_context(|| format!("sample {index} failed"))?;
        let elapsed = start.elapsed();

        if args.verify {
            forest
                .validate(&graph)
                .with_context(|| format!("sample {index} is not a valid spanning forest"))?;
            debug!(sample = index, "verified");
        }

        let summary = SampleSummary::new(index, &forest, sampler.stats(), elapsed);

        if args.csv {
            println!("{}", summary.to_csv());
        } else {
            print_info(&format!(
                "  #{}: roots={}, largest tree={}, steps={}, loops erased={}, t={:.1}µs",
                summary.index,
                summary.roots,
                summary.largest_tree,
                format_number(summary.steps),
                format_number(summary.loops_erased),
                summary.elapsed.as_secs_f64() * 1e6,
            ));
        }

        if args.print_forest {
            print_info(&render_forest(&graph, &forest));
        }
        if let Some(trajectory) = sampler.trajectory() {
            print_info(&render_trajectory(&graph, &forest, trajectory));
        }

        summaries.push(summary);
    }

    print_summary(&graph, &summaries, &print_info);
    Ok(())
}

/// Aggregate statistics over all samples.
fn print_summary(graph: &GridGraph, summaries: &[SampleSummary], print_info: &dyn Fn(&str)) {
    let roots: Vec<f64> = summaries.iter().map(|s| s.roots as f64).collect();
    let d = describe(&roots);

    let total_roots: usize = summaries.iter().map(|s| s.roots).sum();
    let total_vertices = graph.num_vertices() * summaries.len();
    let (ci_low, ci_high) = wilson_ci(total_roots, total_vertices, 1.96);
    let total_steps: u64 = summaries.iter().map(|s| s.steps).sum();

    print_info("");
    print_info(&format!("Samples:        {}", summaries.len()));
    print_info(&format!(
        "Roots:          mean={:.2} std={:.2} min={} max={} p50={} p95={}",
        d.mean, d.std_dev, d.min, d.max, d.p50, d.p95
    ));
    print_info(&format!(
        "Root fraction:  {:.6} [{:.6}, {:.6}] (95% CI)",
        total_roots as f64 / total_vertices.max(1) as f64,
        ci_low,
        ci_high
    ));
    print_info(&format!("Walk steps:     {}", format_number(total_steps)));
}
