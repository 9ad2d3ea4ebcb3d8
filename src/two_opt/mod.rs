//! First-improvement 2-opt local search.
//!
//! Starting from a tour, repeatedly removes two tour edges and reconnects
//! the cycle by reversing the segment between them, accepting the first
//! move in a fixed scan order that shortens the tour. Stops at a 2-opt
//! local optimum or when the iteration cap is reached.
//!
//! # References
//!
//! - Croes, G.A. (1958). "A method for solving traveling salesman problems",
//!   *Operations Research* 6(6), 791-812.
//! - Lin, S. (1965). "Computer solutions of the traveling salesman problem",
//!   *Bell System Technical Journal* 44(10), 2245-2269.

mod config;
mod runner;
mod search;
mod types;

pub use config::{TwoOptConfig, DEFAULT_EPSILON, MAX_ITERATIONS};
pub use runner::{TwoOptResult, TwoOptRunner};
pub use search::{find_first_improvement, move_delta};
pub use types::{Termination, TwoOptMove};
