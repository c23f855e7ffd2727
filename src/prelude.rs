//! Makes available common structures needed to run a pressure solve
//!
//! You may write `use mpfao::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{Attributes, BcKind, Config, GridKind, KrylovKind, PrecondKind, Problem, SpatialParams};
pub use crate::base::{ParamFluid, ParamFluids, ParamMaterialLaw, ParamPorous, ParamRealDensity};
pub use crate::base::{SampleMeshes, SampleProblem, SaturationType, VelocityType};
pub use crate::grid::Grid;
pub use crate::linsol::IterResult;
pub use crate::mpfa::{InteractionVolume, MpfaPressure, Variables};
pub use crate::StrError;
