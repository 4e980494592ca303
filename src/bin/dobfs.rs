//! Direction-optimizing BFS benchmark driver
//!
//! Loads or generates a graph, runs the instrumented traversal for a number
//! of trials and prints the traversal report of the last trial. The
//! `[mem]` counter line goes to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use trueno_dobfs::algorithms::{
    bfs_verifier, dobfs_instrumented, print_bfs_stats, DobfsConfig, MemMetrics, SourcePicker,
    TraversalReport, DEFAULT_ALPHA, DEFAULT_BETA,
};
use trueno_dobfs::harness::{run_benchmark, BenchmarkOptions, DEFAULT_TRIALS};
use trueno_dobfs::storage::uniform_random;
use trueno_dobfs::{CsrGraph, NodeId};

/// Source of a trial and its parent array
type TrialResult = (NodeId, Vec<i32>);

#[derive(Parser, Debug)]
#[command(about = "Direction-optimizing breadth-first search benchmark", long_about = None)]
struct Args {
    /// Basename of a Parquet edge list (`{base}_edges.parquet`, `{base}_meta.parquet`).
    #[arg(long, conflicts_with = "uniform", required_unless_present = "uniform")]
    parquet: Option<PathBuf>,

    /// Generate a uniform random graph with 2^SCALE vertices.
    #[arg(short = 'u', long, value_name = "SCALE")]
    uniform: Option<u32>,

    /// Average out-degree of the generated graph.
    #[arg(short = 'k', long, default_value_t = 16)]
    degree: usize,

    /// Fixed traversal source (default: random vertex with out-edges per trial).
    #[arg(short = 'r', long)]
    source: Option<u32>,

    /// Number of trials.
    #[arg(short = 'n', long, default_value_t = DEFAULT_TRIALS)]
    trials: usize,

    /// Push→pull switching divisor.
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    alpha: u32,

    /// Pull→push switching divisor.
    #[arg(long, default_value_t = DEFAULT_BETA)]
    beta: u32,

    /// Never switch to bottom-up.
    #[arg(long)]
    top_down_only: bool,

    /// Disable the visited-byte cache in top-down steps.
    #[arg(long)]
    no_visited_bytes: bool,

    /// Verify every traversal result.
    #[arg(short = 'v', long)]
    verify: bool,

    /// Print BFS tree statistics for the last trial.
    #[arg(short = 'a', long)]
    analyze: bool,

    /// Log per-step timings.
    #[arg(short = 'l', long)]
    log_steps: bool,

    /// Seed for graph generation and source selection.
    #[arg(long, default_value_t = trueno_dobfs::algorithms::source::DEFAULT_SOURCE_SEED)]
    seed: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let graph = load_graph(&args)?;

    let config = DobfsConfig::default()
        .with_alpha(args.alpha)
        .with_beta(args.beta)
        .with_bottom_up(!args.top_down_only)
        .with_visited_bytes(!args.no_visited_bytes)
        .with_logging(args.log_steps);
    config.validate()?;

    let options = BenchmarkOptions {
        trials: args.trials,
        verify: args.verify,
        analysis: args.analyze,
    };

    let mut picker = SourcePicker::with_seed(&graph, args.source.map(NodeId), args.seed)?;
    let mut last_report = None;

    run_benchmark(
        &graph,
        &options,
        |g| {
            let source = picker.pick_next();
            let mut metrics = MemMetrics::new();
            let run = dobfs_instrumented(g, source, &config, &mut metrics)?;
            last_report = Some(TraversalReport::from_run(&run, metrics));
            Ok::<TrialResult, anyhow::Error>((source, run.parent))
        },
        |g, (_, parent): &TrialResult| print_bfs_stats(g, parent),
        |g, (source, parent): &TrialResult| bfs_verifier(g, *source, parent),
    )?;

    if let Some(report) = last_report {
        println!("{report}");
        eprintln!("{}", report.traffic);
    }

    Ok(())
}

fn load_graph(args: &Args) -> Result<CsrGraph> {
    if let Some(scale) = args.uniform {
        log::info!("Generating uniform random graph: scale={scale} degree={}", args.degree);
        return uniform_random(scale, args.degree, args.seed);
    }

    let base = args
        .parquet
        .as_ref()
        .context("Either --parquet or --uniform is required")?;
    read_parquet(base)
}

#[cfg(feature = "storage")]
fn read_parquet(base: &std::path::Path) -> Result<CsrGraph> {
    log::info!("Loading graph from {}", base.display());
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start I/O runtime")?
        .block_on(CsrGraph::read_parquet(base))
}

#[cfg(not(feature = "storage"))]
fn read_parquet(base: &std::path::Path) -> Result<CsrGraph> {
    anyhow::bail!(
        "Cannot load {}: built without the `storage` feature",
        base.display()
    )
}
