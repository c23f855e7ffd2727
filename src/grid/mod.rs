//! Implements the two-dimensional grid of quadrilaterals used by the MPFA-O method

mod grid;
pub use crate::grid::grid::*;
