//! 2-opt neighborhood scan.
//!
//! # Scan order
//!
//! `i` ascends over `0..=n-2`; for each `i`, `j` ascends over `i+2..=n-1`.
//! The first pair whose delta is below `-epsilon` is returned. Different
//! scan orders reach different local optima, so this order is fixed.
//!
//! The delta formula assumes a symmetric matrix. Asymmetric input is not
//! rejected, and the result on such input carries no guarantee.

use super::types::TwoOptMove;
use crate::matrix::DistanceMatrix;
use crate::tour::Tour;

/// Signed change in tour length if positions `i+1..=j` were reversed.
///
/// ```text
/// delta = -d(t[i], t[i+1]) - d(t[j], t[j+1]) + d(t[i], t[j]) + d(t[i+1], t[j+1])
/// ```
///
/// where `t[j+1]` wraps to `t[0]` when `j = n-1`.
///
/// # Panics
///
/// Panics if `i + 1` or `j` is not a valid tour position, or if the tour
/// names a node outside the matrix.
#[inline]
pub fn move_delta(tour: &Tour, matrix: &DistanceMatrix, i: usize, j: usize) -> f64 {
    let n = tour.len();
    let a = tour.at(i);
    let b = tour.at(i + 1);
    let c = tour.at(j);
    let d = tour.at((j + 1) % n);

    -matrix.distance(a, b) - matrix.distance(c, d) + matrix.distance(a, c) + matrix.distance(b, d)
}

/// Returns the first improving move in scan order, or `None` if the tour is
/// a 2-opt local optimum with respect to `epsilon`.
///
/// Does not modify the tour; see [`TwoOptMove::apply`].
///
/// # Examples
///
/// ```
/// use u_twoopt::matrix::DistanceMatrix;
/// use u_twoopt::tour::Tour;
/// use u_twoopt::two_opt::find_first_improvement;
///
/// // Unit square visited in a crossing order.
/// let dm = DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)]).unwrap();
/// let mv = find_first_improvement(&Tour::identity(4), &dm, 1e-10).unwrap();
/// assert_eq!((mv.i, mv.j), (0, 2));
/// assert!(mv.delta < 0.0);
/// ```
pub fn find_first_improvement(
    tour: &Tour,
    matrix: &DistanceMatrix,
    epsilon: f64,
) -> Option<TwoOptMove> {
    let n = tour.len();

    for i in 0..n.saturating_sub(1) {
        for j in (i + 2)..n {
            let delta = move_delta(tour, matrix, i, j);
            if delta < -epsilon {
                return Some(TwoOptMove { i, j, delta });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crossed_square() -> DistanceMatrix {
        DistanceMatrix::from_points(&[(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)])
            .expect("valid")
    }

    #[test]
    fn test_delta_matches_length_change() {
        let dm = DistanceMatrix::from_points(&[
            (0.0, 0.0),
            (4.0, 3.0),
            (1.0, 5.0),
            (6.0, 1.0),
            (2.0, 2.0),
            (5.0, 5.0),
        ])
        .expect("valid");
        let tour = Tour::identity(6);
        let before = dm.tour_length(tour.as_slice());

        for i in 0..5 {
            for j in (i + 2)..6 {
                let delta = move_delta(&tour, &dm, i, j);
                let mut moved = tour.clone();
                moved.reverse_segment(i + 1, j);
                let after = dm.tour_length(moved.as_slice());
                assert!(
                    (after - before - delta).abs() < 1e-9,
                    "delta mismatch at ({i}, {j}): {delta} vs {}",
                    after - before
                );
            }
        }
    }

    #[test]
    fn test_crossed_square_first_move() {
        let dm = crossed_square();
        let mv = find_first_improvement(&Tour::identity(4), &dm, 1e-10).expect("improving move");
        assert_eq!(mv.i, 0);
        assert_eq!(mv.j, 2);
        let expected = 2.0 - 2.0 * 2f64.sqrt();
        assert!((mv.delta - expected).abs() < 1e-12, "got {}", mv.delta);
    }

    #[test]
    fn test_search_does_not_mutate() {
        let dm = crossed_square();
        let tour = Tour::identity(4);
        let _ = find_first_improvement(&tour, &dm, 1e-10);
        assert_eq!(tour.as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_first_not_best() {
        // Positions on a line visited as 0 2 1 4 3 5: both (0, 2) and (2, 4)
        // improve by 2, the scan must report the earliest pair.
        let xs = [0.0, 2.0, 1.0, 4.0, 3.0, 5.0];
        let points: Vec<(f64, f64)> = xs.iter().map(|&x| (x, 0.0)).collect();
        let dm = DistanceMatrix::from_points(&points).expect("valid");
        let tour = Tour::identity(6);

        assert!(move_delta(&tour, &dm, 2, 4) < -1.0);
        let mv = find_first_improvement(&tour, &dm, 1e-10).expect("improving move");
        assert_eq!((mv.i, mv.j), (0, 2));
        for i in 0..mv.i {
            for j in (i + 2)..6 {
                assert!(move_delta(&tour, &dm, i, j) >= -1e-10);
            }
        }
        for j in (mv.i + 2)..mv.j {
            assert!(move_delta(&tour, &dm, mv.i, j) >= -1e-10);
        }
    }

    #[test]
    fn test_epsilon_filters_small_gains() {
        let dm = crossed_square();
        let gain = 2.0 * 2f64.sqrt() - 2.0;
        assert!(find_first_improvement(&Tour::identity(4), &dm, gain + 1e-6).is_none());
        assert!(find_first_improvement(&Tour::identity(4), &dm, gain - 1e-6).is_some());
    }

    #[test]
    fn test_trivial_sizes_have_no_moves() {
        for n in 1..=3 {
            let points: Vec<(f64, f64)> = (0..n).map(|k| (k as f64, (k * k) as f64)).collect();
            let dm = DistanceMatrix::from_points(&points).expect("valid");
            assert!(
                find_first_improvement(&Tour::identity(n), &dm, 1e-10).is_none(),
                "n = {n} should have no improving move"
            );
        }
    }

    #[test]
    fn test_empty_tour() {
        let dm = crossed_square();
        assert!(find_first_improvement(&Tour::identity(0), &dm, 1e-10).is_none());
    }
}
