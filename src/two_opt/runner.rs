//! 2-opt improvement loop.
//!
//! # Algorithm
//!
//! 1. Start from the identity tour (or a supplied one)
//! 2. While fewer than `max_iterations` moves have been applied:
//!    a. Scan for the first improving 2-opt move
//!    b. If none exists, stop (converged)
//!    c. Reverse the segment, add the delta to the running total
//! 3. Return the tour, the signed total and the number of applied moves

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, trace};

use super::config::TwoOptConfig;
use super::search::find_first_improvement;
use super::types::Termination;
use crate::error::{Result, TspError};
use crate::matrix::DistanceMatrix;
use crate::tour::Tour;

/// Result of a 2-opt run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoOptResult {
    /// Final tour.
    pub tour: Tour,

    /// Sum of all applied deltas. Never positive; negate it to display the
    /// length saved.
    pub total_improvement: f64,

    /// Number of applied moves.
    pub iterations: usize,

    /// Why the run stopped.
    pub termination: Termination,

    /// Applied deltas, in order.
    pub deltas: Vec<f64>,

    /// Length of the start tour.
    pub initial_length: f64,

    /// Length of the final tour.
    pub final_length: f64,
}

impl TwoOptResult {
    /// Whether the final tour is a 2-opt local optimum.
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

/// Executes 2-opt local search.
pub struct TwoOptRunner;

impl TwoOptRunner {
    /// Optimizes the identity tour over `matrix`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_twoopt::matrix::DistanceMatrix;
    /// use u_twoopt::two_opt::{Termination, TwoOptConfig, TwoOptRunner};
    ///
    /// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)]).unwrap();
    /// let result = TwoOptRunner::run(&dm, &TwoOptConfig::default()).unwrap();
    ///
    /// assert_eq!(result.tour.as_slice(), &[0, 2, 1, 3]);
    /// assert_eq!(result.iterations, 1);
    /// assert_eq!(result.termination, Termination::Converged);
    /// assert!(result.total_improvement < 0.0);
    /// ```
    pub fn run(matrix: &DistanceMatrix, config: &TwoOptConfig) -> Result<TwoOptResult> {
        Self::run_with_cancel(matrix, Tour::identity(matrix.size()), config, None)
    }

    /// Optimizes a supplied start tour.
    pub fn run_from(
        matrix: &DistanceMatrix,
        tour: Tour,
        config: &TwoOptConfig,
    ) -> Result<TwoOptResult> {
        Self::run_with_cancel(matrix, tour, config, None)
    }

    /// Optimizes `tour`, checking `cancel` before every iteration.
    pub fn run_with_cancel(
        matrix: &DistanceMatrix,
        mut tour: Tour,
        config: &TwoOptConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TwoOptResult> {
        config.validate()?;
        if tour.len() != matrix.size() {
            return Err(TspError::InvalidDimension(format!(
                "tour has {} nodes, matrix has {}",
                tour.len(),
                matrix.size()
            )));
        }

        let initial_length = matrix.tour_length(tour.as_slice());
        let mut total_improvement = 0.0;
        let mut iterations = 0usize;
        let mut deltas = Vec::new();

        let termination = loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    break Termination::Cancelled;
                }
            }

            if iterations >= config.max_iterations {
                break Termination::Capped;
            }

            let Some(mv) = find_first_improvement(&tour, matrix, config.epsilon) else {
                break Termination::Converged;
            };

            mv.apply(&mut tour);
            total_improvement += mv.delta;
            deltas.push(mv.delta);
            iterations += 1;

            trace!(
                "2-opt move #{iterations}: reversed [{}, {}], delta {:.6}",
                mv.i + 1,
                mv.j,
                mv.delta
            );
        };

        let final_length = matrix.tour_length(tour.as_slice());
        debug!(
            "2-opt finished: {termination:?} after {iterations} moves, length {initial_length:.6} -> {final_length:.6}"
        );

        Ok(TwoOptResult {
            tour,
            total_improvement,
            iterations,
            termination,
            deltas,
            initial_length,
            final_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::two_opt::find_first_improvement;

    fn crossed_square() -> DistanceMatrix {
        DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)])
            .expect("valid")
    }

    fn scattered(n: usize) -> DistanceMatrix {
        // Deterministic pseudo-random points.
        let points: Vec<(f64, f64)> = (0..n)
            .map(|k| {
                let k = k as f64;
                ((k * 37.0) % 101.0, (k * 61.0 + 17.0) % 89.0)
            })
            .collect();
        DistanceMatrix::from_points(&points).expect("valid")
    }

    #[test]
    fn test_crossed_square_uncrosses() {
        let dm = crossed_square();
        let result = TwoOptRunner::run(&dm, &TwoOptConfig::default()).expect("run");

        assert_eq!(result.tour.as_slice(), &[0, 2, 1, 3]);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.termination, Termination::Converged);

        let expected = 4.0 - (2.0 + 2.0 * 2f64.sqrt());
        assert!(
            (result.total_improvement - expected).abs() < 1e-12,
            "expected {expected}, got {}",
            result.total_improvement
        );
        assert!((result.final_length - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_and_two_nodes() {
        let one = DistanceMatrix::from_rows(vec![vec![0.0]]).expect("valid");
        let two = DistanceMatrix::from_rows(vec![vec![0.0, 7.0], vec![7.0, 0.0]]).expect("valid");

        for dm in [one, two] {
            let result = TwoOptRunner::run(&dm, &TwoOptConfig::default()).expect("run");
            assert_eq!(result.iterations, 0);
            assert_eq!(result.total_improvement, 0.0);
            assert_eq!(result.termination, Termination::Converged);
            assert_eq!(result.tour, Tour::identity(dm.size()));
        }
    }

    #[test]
    fn test_three_nodes_converge_immediately() {
        let dm = DistanceMatrix::from_rows(vec![
            vec![0.0, 2.0, 9.0],
            vec![2.0, 0.0, 4.0],
            vec![9.0, 4.0, 0.0],
        ])
        .expect("valid");
        let result = TwoOptRunner::run(&dm, &TwoOptConfig::default()).expect("run");
        assert_eq!(result.iterations, 0);
        assert_eq!(result.total_improvement, 0.0);
        assert_eq!(result.tour.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_local_optimum_start_is_unchanged() {
        let dm = scattered(20);
        let first = TwoOptRunner::run(&dm, &TwoOptConfig::default()).expect("run");
        assert!(first.converged());

        let again = TwoOptRunner::run_from(&dm, first.tour.clone(), &TwoOptConfig::default())
            .expect("run");
        assert_eq!(again.iterations, 0);
        assert_eq!(again.total_improvement, 0.0);
        assert_eq!(again.tour, first.tour);
    }

    #[test]
    fn test_converged_tour_has_no_improving_move() {
        let dm = scattered(30);
        let config = TwoOptConfig::default();
        let result = TwoOptRunner::run(&dm, &config).expect("run");

        assert!(result.converged());
        assert!(result.tour.is_permutation());
        assert!(find_first_improvement(&result.tour, &dm, config.epsilon).is_none());
    }

    #[test]
    fn test_total_is_sum_of_deltas() {
        let dm = scattered(25);
        let result = TwoOptRunner::run(&dm, &TwoOptConfig::default()).expect("run");

        assert_eq!(result.deltas.len(), result.iterations);
        let sum: f64 = result.deltas.iter().sum();
        assert_eq!(sum, result.total_improvement);
        assert!(result.deltas.iter().all(|&d| d < -1e-10));
        assert!(
            (result.initial_length + result.total_improvement - result.final_length).abs() < 1e-6,
            "length bookkeeping drifted"
        );
    }

    #[test]
    fn test_iteration_cap() {
        let dm = scattered(30);
        let config = TwoOptConfig::default().with_max_iterations(2);
        let result = TwoOptRunner::run(&dm, &config).expect("run");

        assert_eq!(result.iterations, 2);
        assert_eq!(result.termination, Termination::Capped);
        assert!(result.tour.is_permutation());
    }

    #[test]
    fn test_zero_cap() {
        let dm = crossed_square();
        let config = TwoOptConfig::default().with_max_iterations(0);
        let result = TwoOptRunner::run(&dm, &config).expect("run");
        assert_eq!(result.iterations, 0);
        assert_eq!(result.termination, Termination::Capped);
        assert_eq!(result.tour, Tour::identity(4));
    }

    #[test]
    fn test_deterministic() {
        let dm = scattered(40);
        let config = TwoOptConfig::default();
        let a = TwoOptRunner::run(&dm, &config).expect("run");
        let b = TwoOptRunner::run(&dm, &config).expect("run");
        assert_eq!(a.tour, b.tour);
        assert_eq!(a.iterations, b.iterations);
        assert_eq!(
            a.total_improvement.to_bits(),
            b.total_improvement.to_bits()
        );
    }

    #[test]
    fn test_cancellation() {
        let dm = scattered(30);
        let cancel = Arc::new(AtomicBool::new(true));
        let result = TwoOptRunner::run_with_cancel(
            &dm,
            Tour::identity(30),
            &TwoOptConfig::default(),
            Some(cancel),
        )
        .expect("run");
        assert_eq!(result.termination, Termination::Cancelled);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_tour_size_mismatch() {
        let dm = crossed_square();
        let err = TwoOptRunner::run_from(&dm, Tour::identity(3), &TwoOptConfig::default())
            .unwrap_err();
        assert!(matches!(err, TspError::InvalidDimension(_)), "got {err:?}");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dm = crossed_square();
        let config = TwoOptConfig::default().with_epsilon(-1.0);
        assert!(matches!(
            TwoOptRunner::run(&dm, &config),
            Err(TspError::InvalidConfig(_))
        ));
    }
}
