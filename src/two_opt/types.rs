//! Move and termination types.

use crate::tour::Tour;

/// An improving 2-opt move found by the search.
///
/// Removes edges `(t[i], t[i+1])` and `(t[j], t[(j+1) mod n])` and
/// reconnects the cycle by reversing positions `i+1..=j`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoOptMove {
    /// Position of the first removed edge's tail.
    pub i: usize,
    /// Position of the second removed edge's tail.
    pub j: usize,
    /// Signed change in tour length; negative for an improving move.
    pub delta: f64,
}

impl TwoOptMove {
    /// Applies the move by reversing `tour[i+1..=j]` in place.
    #[inline]
    pub fn apply(&self, tour: &mut Tour) {
        tour.reverse_segment(self.i + 1, self.j);
    }
}

/// Why a 2-opt run stopped. None of these is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// No improving move exists: the tour is a 2-opt local optimum.
    Converged,
    /// The iteration cap was reached before convergence.
    Capped,
    /// An external cancel flag was observed between iterations.
    Cancelled,
}
