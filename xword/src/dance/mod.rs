//! Dancing-links exact-cover matrix and Algorithm X search (§4.4).

mod matrix;
mod solver;

pub use matrix::DanceMatrix;
pub use solver::{solve, CallbackResult, BAIL_SENTINEL};
