//! Crossword construction toolkit: a wildcard-aware dictionary store, a
//! morphological compressor for compact dictionary files, and a
//! dancing-links grid filler built on Algorithm X.
#![deny(missing_docs)]

#[cfg(target_pointer_width = "16")]
compile_error!("`target_pointer_width` must be larger than or equal to 32");

pub mod common;
pub mod dance;
pub mod dictionary;
pub mod duplicate;
pub mod encoder;
pub mod errors;
pub mod grid;
pub mod pattern;

#[cfg(test)]
mod tests;

pub use common::YIsVowel;
pub use dictionary::{Classification, Dictionary, FindControl, Word};
pub use encoder::{strip_dict, GridEncoder, Placement};
pub use errors::{Result, XwordError};
pub use grid::{Cell, Direction, Entry, Grid};
