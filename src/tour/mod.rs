//! Tour representation.
//!
//! A [`Tour`] is a cyclic visiting order over all nodes. It is always a
//! permutation of `[0, n)`: the only mutation it exposes is reversal of a
//! contiguous segment, which preserves that property.

use std::fmt;

use crate::error::{Result, TspError};

/// A Hamiltonian cycle `order[0] → … → order[n-1] → order[0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    order: Vec<usize>,
}

impl Tour {
    /// The identity tour `[0, 1, …, n-1]`.
    pub fn identity(n: usize) -> Self {
        Self {
            order: (0..n).collect(),
        }
    }

    /// Wraps an explicit visiting order.
    ///
    /// Fails with [`TspError::InvalidTour`] if `order` is not a permutation
    /// of `[0, order.len())`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_twoopt::tour::Tour;
    ///
    /// assert!(Tour::from_order(vec![2, 0, 1]).is_ok());
    /// assert!(Tour::from_order(vec![0, 0, 1]).is_err());
    /// ```
    pub fn from_order(order: Vec<usize>) -> Result<Self> {
        let n = order.len();
        let mut seen = vec![false; n];
        for (pos, &node) in order.iter().enumerate() {
            if node >= n {
                return Err(TspError::InvalidTour(format!(
                    "node {node} at position {pos} is outside [0, {n})"
                )));
            }
            if seen[node] {
                return Err(TspError::InvalidTour(format!(
                    "node {node} appears more than once"
                )));
            }
            seen[node] = true;
        }
        Ok(Self { order })
    }

    /// Number of nodes in the tour.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Node at tour position `pos`.
    #[inline]
    pub fn at(&self, pos: usize) -> usize {
        self.order[pos]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.order
    }

    /// Reverses positions `from..=to` in place.
    ///
    /// # Panics
    ///
    /// Panics if `from > to` or `to >= len()`.
    #[inline]
    pub fn reverse_segment(&mut self, from: usize, to: usize) {
        self.order[from..=to].reverse();
    }

    /// Returns `true` if the tour visits every node of `[0, len())` exactly once.
    pub fn is_permutation(&self) -> bool {
        let mut seen = vec![false; self.order.len()];
        self.order.iter().all(|&node| {
            node < seen.len() && !std::mem::replace(&mut seen[node], true)
        })
    }
}

/// Space-separated node ids.
impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pos, node) in self.order.iter().enumerate() {
            if pos > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

impl AsRef<[usize]> for Tour {
    fn as_ref(&self) -> &[usize] {
        &self.order
    }
}
