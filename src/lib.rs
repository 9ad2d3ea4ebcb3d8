//! First-improvement 2-opt local search for the symmetric Traveling
//! Salesman Problem.
//!
//! Starting from the identity tour, the optimizer repeatedly applies the
//! first improving 2-opt edge swap in a fixed scan order until the tour is
//! a 2-opt local optimum or an iteration cap is reached.
//!
//! - **Matrix**: immutable n×n cost lookup ([`matrix::DistanceMatrix`]).
//! - **Tour**: permutation of the nodes with in-place segment reversal
//!   ([`tour::Tour`]).
//! - **2-opt**: move search, improvement loop and its configuration
//!   ([`two_opt`]).
//! - **Instance**: text format and seeded Euclidean instance generator
//!   ([`instance`]).
//! - **Harness**: repeated-run timing and batch solving ([`harness`]).
//!
//! # Example
//!
//! ```
//! use u_twoopt::instance::generate_instance;
//! use u_twoopt::two_opt::{TwoOptConfig, TwoOptRunner};
//!
//! let dm = generate_instance(50, 42).unwrap();
//! let result = TwoOptRunner::run(&dm, &TwoOptConfig::default()).unwrap();
//! assert!(result.total_improvement <= 0.0);
//! assert!(result.final_length <= result.initial_length);
//! ```
//!
//! # Architecture
//!
//! The optimizer is pure: no I/O, no global state, no randomness. Everything
//! that touches files or clocks lives in [`instance`] and [`harness`].

pub mod error;
pub mod harness;
pub mod instance;
pub mod matrix;
pub mod tour;
pub mod two_opt;

pub use error::{Result, TspError};
