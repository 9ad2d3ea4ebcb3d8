//! Dense distance matrix.
//!
//! Costs are stored row-major in a single flat buffer. The matrix is built
//! once from external input and is read-only afterwards.
//!
//! Symmetry and a zero diagonal are assumed by the 2-opt delta formula but
//! are not enforced here; [`DistanceMatrix::is_symmetric`] and
//! [`DistanceMatrix::has_zero_diagonal`] exist so a driver can warn about
//! suspicious input.

use crate::error::{Result, TspError};

/// An n×n matrix of travel costs between nodes `0..n`.
///
/// # Examples
///
/// ```
/// use u_twoopt::matrix::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 3.0, 4.0],
///     vec![3.0, 0.0, 5.0],
///     vec![4.0, 5.0, 0.0],
/// ]).unwrap();
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.distance(1, 2), 5.0);
/// assert!((dm.tour_length(&[0, 1, 2]) - 12.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a matrix from flat row-major data.
    ///
    /// Fails with [`TspError::InvalidDimension`] if `size` is zero or
    /// `data.len() != size * size`.
    pub fn new(size: usize, data: Vec<f64>) -> Result<Self> {
        if size == 0 {
            return Err(TspError::InvalidDimension(
                "node count must be positive".into(),
            ));
        }
        let expected = size.checked_mul(size).ok_or_else(|| {
            TspError::InvalidDimension(format!("node count {size} is too large"))
        })?;
        if data.len() != expected {
            return Err(TspError::InvalidDimension(format!(
                "expected {expected} entries for {size} nodes, got {}",
                data.len()
            )));
        }
        Ok(Self { data, size })
    }

    /// Creates a matrix from an explicit n×n grid, `rows[i][j]` being the
    /// cost from `i` to `j`.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(TspError::InvalidDimension(
                "node count must be positive".into(),
            ));
        }
        let mut data = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(TspError::InvalidDimension(format!(
                    "row {i} has {} entries, expected {size}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        Ok(Self { data, size })
    }

    /// Computes a Euclidean distance matrix from planar points.
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self> {
        let n = points.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let (dx, dy) = (points[i].0 - points[j].0, points[i].1 - points[j].1);
                let d = (dx * dx + dy * dy).sqrt();
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self::new(n, data)
    }

    /// Returns the cost from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics with the [`TspError::OutOfRange`] message if either index is
    /// outside `[0, n)`. Use [`DistanceMatrix::get`] for a checked lookup.
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        match self.get(from, to) {
            Ok(d) => d,
            Err(e) => panic!("{e}"),
        }
    }

    /// Checked lookup of the cost from `from` to `to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> Result<f64> {
        if from >= self.size || to >= self.size {
            return Err(TspError::OutOfRange {
                row: from,
                col: to,
                size: self.size,
            });
        }
        Ok(self.data[from * self.size + to])
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Costs from `from` to every node.
    pub fn row(&self, from: usize) -> Result<&[f64]> {
        if from >= self.size {
            return Err(TspError::OutOfRange {
                row: from,
                col: 0,
                size: self.size,
            });
        }
        Ok(&self.data[from * self.size..(from + 1) * self.size])
    }

    /// Length of the closed cycle `order[0] → … → order[k-1] → order[0]`.
    pub fn tour_length(&self, order: &[usize]) -> f64 {
        match order.len() {
            0 => 0.0,
            k => (0..k)
                .map(|p| self.distance(order[p], order[(p + 1) % k]))
                .sum(),
        }
    }

    /// Returns `true` if `d(i, j)` and `d(j, i)` agree within `tol` for all pairs.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.distance(i, j) - self.distance(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns `true` if every `d(i, i)` is within `tol` of zero.
    pub fn has_zero_diagonal(&self, tol: f64) -> bool {
        (0..self.size).all(|i| self.distance(i, i).abs() <= tol)
    }
}
