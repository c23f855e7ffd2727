use crate::StrError;
use serde::{Deserialize, Serialize};

/// Defines the grid implementations that can be used with the MPFA-O method
///
/// The grid kind determines the native order of the faces around a cell and,
/// hence, the rule to find the next face in anticlockwise order.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum GridKind {
    /// Structured grid with faces enumerated as (west, east, south, north)
    SGrid,

    /// Structured (parallel) grid with faces enumerated as (west, east, south, north)
    YaspGrid,

    /// Unstructured grid with faces enumerated anticlockwise following the cell points
    UgGrid,
}

impl GridKind {
    /// Returns the grid kind corresponding to a name
    pub fn from_name(name: &str) -> Result<Self, StrError> {
        match name {
            "SGrid" => Ok(GridKind::SGrid),
            "YaspGrid" => Ok(GridKind::YaspGrid),
            "UGGrid" => Ok(GridKind::UgGrid),
            _ => Err("grid kind cannot be used with the MPFA-O method"),
        }
    }

    /// Returns the name of the grid kind
    pub fn name(&self) -> &'static str {
        match self {
            GridKind::SGrid => "SGrid",
            GridKind::YaspGrid => "YaspGrid",
            GridKind::UgGrid => "UGGrid",
        }
    }
}

/// Defines the type of boundary condition
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum BcKind {
    /// Prescribed value (pressure or saturation)
    Dirichlet,

    /// Prescribed flux
    Neumann,
}

/// Defines which velocity drives the upwinding of mobilities
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum VelocityType {
    /// Wetting phase velocity (vw)
    Wetting,

    /// Non-wetting phase velocity (vn)
    NonWetting,

    /// Total velocity (vt)
    Total,
}

/// Defines the primary saturation variable
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum SaturationType {
    /// The wetting phase saturation Sw is stored
    Wetting,

    /// The non-wetting phase saturation Sn is stored
    NonWetting,
}

impl SaturationType {
    /// Converts the stored (primary) saturation into the wetting phase saturation
    #[inline]
    pub fn wetting(&self, saturation: f64) -> f64 {
        match self {
            SaturationType::Wetting => saturation,
            SaturationType::NonWetting => 1.0 - saturation,
        }
    }
}

/// Defines the Krylov (or stationary) iterative method
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum KrylovKind {
    /// Preconditioned conjugate gradient method
    Cg,

    /// Preconditioned stabilized bi-conjugate gradient method
    BiCgStab,

    /// Preconditioned Richardson iteration (loop solver)
    Loop,
}

impl KrylovKind {
    /// Returns the method corresponding to a name
    pub fn from_name(name: &str) -> Result<Self, StrError> {
        match name {
            "CG" => Ok(KrylovKind::Cg),
            "BiCGSTAB" => Ok(KrylovKind::BiCgStab),
            "Loop" => Ok(KrylovKind::Loop),
            _ => Err("unknown linear solver name"),
        }
    }

    /// Returns the name of the method
    pub fn name(&self) -> &'static str {
        match self {
            KrylovKind::Cg => "CG",
            KrylovKind::BiCgStab => "BiCGSTAB",
            KrylovKind::Loop => "Loop",
        }
    }
}

/// Defines the preconditioner
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum PrecondKind {
    /// Incomplete LU factorization with zero fill-in
    Ilu0,

    /// Complete sparse LU factorization (direct solver used as preconditioner)
    Direct,
}

impl PrecondKind {
    /// Returns the preconditioner corresponding to a name
    pub fn from_name(name: &str) -> Result<Self, StrError> {
        match name {
            "SeqILU0" => Ok(PrecondKind::Ilu0),
            "SeqPardiso" | "Direct" => Ok(PrecondKind::Direct),
            _ => Err("unknown preconditioner name"),
        }
    }

    /// Returns the name of the preconditioner
    pub fn name(&self) -> &'static str {
        match self {
            PrecondKind::Ilu0 => "SeqILU0",
            PrecondKind::Direct => "Direct",
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
