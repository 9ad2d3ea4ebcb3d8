//! # u-twoopt CLI
//!
//! Solves TSP instances with 2-opt and generates random Euclidean
//! instances in the text format.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, warn};

use u_twoopt::harness::{benchmark, BenchmarkReport, DEFAULT_RUNS};
use u_twoopt::instance::{generate_instance, read_instance, write_instance};
use u_twoopt::two_opt::{Termination, TwoOptConfig, DEFAULT_EPSILON, MAX_ITERATIONS};

/// Command-line interface for u-twoopt
#[derive(Parser)]
#[command(name = "u-twoopt")]
#[command(about = "First-improvement 2-opt local search for the symmetric TSP")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Optimize the identity tour of an instance file
    Solve {
        /// Instance file: node count, then one matrix row per line
        file: PathBuf,

        /// Number of timed runs to average
        #[arg(long, default_value_t = DEFAULT_RUNS)]
        runs: usize,

        /// Tolerance below which a move is not considered improving
        #[arg(long, default_value_t = DEFAULT_EPSILON)]
        epsilon: f64,

        /// Maximum number of applied moves
        #[arg(long, default_value_t = MAX_ITERATIONS)]
        max_iterations: usize,
    },

    /// Write a random Euclidean instance
    Generate {
        /// Number of nodes
        nodes: usize,

        /// Output file
        output: PathBuf,

        /// Random seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(cli.command) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Solve {
            file,
            runs,
            epsilon,
            max_iterations,
        } => solve(file, runs, epsilon, max_iterations),
        Command::Generate {
            nodes,
            output,
            seed,
        } => {
            let matrix = generate_instance(nodes, seed)
                .with_context(|| format!("failed to generate {nodes} nodes"))?;
            write_instance(&output, &matrix)
                .with_context(|| format!("failed to write {}", output.display()))?;
            eprintln!("Wrote {nodes} nodes to {}", output.display());
            Ok(())
        }
    }
}

fn solve(file: PathBuf, runs: usize, epsilon: f64, max_iterations: usize) -> Result<()> {
    let matrix =
        read_instance(&file).with_context(|| format!("failed to load {}", file.display()))?;

    if !matrix.is_symmetric(epsilon.max(DEFAULT_EPSILON)) {
        warn!("distance matrix is not symmetric; 2-opt deltas assume symmetry");
    }
    if !matrix.has_zero_diagonal(epsilon.max(DEFAULT_EPSILON)) {
        warn!("distance matrix has non-zero diagonal entries");
    }

    let config = TwoOptConfig::default()
        .with_epsilon(epsilon)
        .with_max_iterations(max_iterations);
    let report = benchmark(&matrix, &config, runs)?;
    let result = &report.result;

    if result.termination == Termination::Capped {
        warn!("stopped after {max_iterations} moves without reaching a local optimum");
    }

    print!("{}", render(&report));
    Ok(())
}

/// Formats a benchmark report the way `solve` prints it. The improvement is
/// shown as a positive length saved.
fn render(report: &BenchmarkReport) -> String {
    let result = &report.result;
    format!(
        "Optimized tour: {}\nTotal improvement: {:.6}\nIterations: {}\nAverage time spent: {:.6} seconds\n",
        result.tour,
        // `0.0 - x` keeps a zero total from printing as "-0.000000".
        0.0 - result.total_improvement,
        result.iterations,
        report.average_time().as_secs_f64()
    )
}
