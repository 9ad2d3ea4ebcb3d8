//! Repeated-run benchmarking and batch solving.
//!
//! Both helpers call the pure [`TwoOptRunner`] repeatedly; no state is
//! shared between runs.

use std::time::{Duration, Instant};

use log::{debug, info};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{Result, TspError};
use crate::matrix::DistanceMatrix;
use crate::two_opt::{TwoOptConfig, TwoOptResult, TwoOptRunner};

/// Default number of timed runs.
pub const DEFAULT_RUNS: usize = 10;

/// Outcome of [`benchmark`].
#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    /// Result of the first run. Later runs produce identical results.
    pub result: TwoOptResult,

    /// Wall-clock time of each run.
    pub durations: Vec<Duration>,
}

impl BenchmarkReport {
    pub fn runs(&self) -> usize {
        self.durations.len()
    }

    pub fn total_time(&self) -> Duration {
        self.durations.iter().sum()
    }

    /// Mean wall-clock time per run.
    pub fn average_time(&self) -> Duration {
        if self.durations.is_empty() {
            return Duration::ZERO;
        }
        let nanos = self.total_time().as_nanos() / self.durations.len() as u128;
        u64::try_from(nanos).map_or(Duration::MAX, Duration::from_nanos)
    }
}

/// Runs the optimizer `runs` times on the identity tour and times each run.
///
/// # Examples
///
/// ```
/// use u_twoopt::harness::benchmark;
/// use u_twoopt::instance::generate_instance;
/// use u_twoopt::two_opt::TwoOptConfig;
///
/// let dm = generate_instance(30, 1).unwrap();
/// let report = benchmark(&dm, &TwoOptConfig::default(), 3).unwrap();
/// assert_eq!(report.runs(), 3);
/// assert!(report.result.tour.is_permutation());
/// ```
pub fn benchmark(
    matrix: &DistanceMatrix,
    config: &TwoOptConfig,
    runs: usize,
) -> Result<BenchmarkReport> {
    if runs == 0 {
        return Err(TspError::InvalidConfig(
            "benchmark needs at least one run".into(),
        ));
    }

    let (result, elapsed) = timed_run(matrix, config)?;
    debug!("run 0: {elapsed:?}, {} moves", result.iterations);
    let mut durations = Vec::with_capacity(runs);
    durations.push(elapsed);

    for run in 1..runs {
        let (repeat, elapsed) = timed_run(matrix, config)?;
        debug!("run {run}: {elapsed:?}, {} moves", repeat.iterations);
        durations.push(elapsed);
    }

    let report = BenchmarkReport { result, durations };
    info!(
        "benchmark: {} nodes, {} runs, average {:?}",
        matrix.size(),
        report.runs(),
        report.average_time()
    );
    Ok(report)
}

fn timed_run(matrix: &DistanceMatrix, config: &TwoOptConfig) -> Result<(TwoOptResult, Duration)> {
    let start = Instant::now();
    let result = TwoOptRunner::run(matrix, config)?;
    Ok((result, start.elapsed()))
}

/// Optimizes independent instances, in parallel when the `parallel`
/// feature is enabled. Results keep the input order.
pub fn solve_batch(
    matrices: &[DistanceMatrix],
    config: &TwoOptConfig,
) -> Result<Vec<TwoOptResult>> {
    #[cfg(feature = "parallel")]
    let results = matrices
        .par_iter()
        .map(|m| TwoOptRunner::run(m, config))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let results = matrices
        .iter()
        .map(|m| TwoOptRunner::run(m, config))
        .collect();

    results
}
