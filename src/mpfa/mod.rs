//! Implements the MPFA-O pressure solver with upwinded mobilities

mod interaction_volume;
mod local_system;
mod mpfa_pressure;
mod upwind;
mod variables;
mod velocity;
pub use crate::mpfa::interaction_volume::*;
pub use crate::mpfa::local_system::*;
pub use crate::mpfa::mpfa_pressure::*;
pub use crate::mpfa::upwind::*;
pub use crate::mpfa::variables::*;
