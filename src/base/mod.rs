//! Implements the base structures for the MPFA-O pressure solver

mod attributes;
mod config;
mod enums;
mod parameters;
mod problem;
mod sample_meshes;
mod sample_problem;
mod testing;
pub use crate::base::attributes::*;
pub use crate::base::config::*;
pub use crate::base::enums::*;
pub use crate::base::parameters::*;
pub use crate::base::problem::*;
pub use crate::base::sample_meshes::*;
pub use crate::base::sample_problem::*;

#[allow(unused_imports)]
pub(crate) use crate::base::testing::*;
