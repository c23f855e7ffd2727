//! Implements the constitutive models (material laws and fluid properties)

mod fluid_model;
mod material_law_model;
pub use crate::material::fluid_model::*;
pub use crate::material::material_law_model::*;
