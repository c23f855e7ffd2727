use super::{BcKind, ParamMaterialLaw};
use crate::grid::{GridCell, GridFace};
use crate::StrError;
use russell_lab::Matrix;

/// Defines the data of a two-phase pressure problem
///
/// The positions `x` are the cell centers (for cell data) or the face centers (for boundary data).
///
/// # Sign convention
///
/// The Neumann fluxes are mass fluxes per unit face length with **outflow being positive**.
pub trait Problem {
    /// Returns the source terms `[qw, qn]` (volume per unit volume and time) of the wetting and non-wetting phases
    fn source(&self, x: &[f64], cell: &GridCell) -> [f64; 2];

    /// Returns the type of boundary condition for the pressure equation
    fn bc_type_pressure(&self, x: &[f64], face: &GridFace) -> BcKind;

    /// Returns the prescribed pressure at a Dirichlet boundary face
    fn dirichlet_pressure(&self, x: &[f64], face: &GridFace) -> f64;

    /// Returns the prescribed mass fluxes `[Jw, Jn]` at a Neumann boundary face
    fn neumann_flux(&self, x: &[f64], face: &GridFace) -> [f64; 2];

    /// Returns the type of boundary condition for the saturation (transport) equation
    fn bc_type_saturation(&self, x: &[f64], face: &GridFace) -> BcKind;

    /// Returns the prescribed saturation at a Dirichlet boundary face
    ///
    /// The value refers to the primary saturation variable (see [crate::base::SaturationType]).
    fn dirichlet_saturation(&self, x: &[f64], face: &GridFace) -> f64;

    /// Returns the temperature
    fn temperature(&self, x: &[f64], cell: &GridCell) -> f64;

    /// Returns the reference pressure used to evaluate the fluid properties
    fn reference_pressure(&self, x: &[f64], cell: &GridCell) -> f64;
}

/// Defines the spatial parameters of the porous medium
pub trait SpatialParams {
    /// Returns the intrinsic permeability tensor (2 × 2)
    fn permeability(&self, x: &[f64], cell: &GridCell) -> Result<Matrix, StrError>;

    /// Returns the parameters of the relative permeability and capillary pressure laws
    fn material_law(&self, x: &[f64], cell: &GridCell) -> Result<ParamMaterialLaw, StrError>;
}
