use super::{BcKind, Problem};
use crate::grid::{GridCell, GridFace};

/// Defines a function returning the Dirichlet value at a position or None for a Neumann boundary
pub type FnBoundaryValue = Box<dyn Fn(&[f64]) -> Option<f64>>;

/// Implements a problem with uniform source, uniform Neumann fluxes, and position-dependent Dirichlet data
///
/// The default instance describes a closed domain: no source, zero Neumann flux everywhere,
/// and no prescribed saturations.
///
/// # Examples
///
/// ```
/// use mpfao::prelude::*;
///
/// // left side at p = 2, right side at p = 0, other sides closed
/// let mut problem = SampleProblem::new();
/// problem.set_dirichlet_pressure(|x| {
///     if x[0] == 0.0 {
///         Some(2.0)
///     } else if x[0] == 2.0 {
///         Some(0.0)
///     } else {
///         None
///     }
/// });
/// ```
pub struct SampleProblem {
    /// Source terms [qw, qn]
    pub source: [f64; 2],

    /// Mass fluxes [Jw, Jn] at Neumann faces (outflow is positive)
    pub neumann_flux: [f64; 2],

    /// Dirichlet pressure at a face center (None means Neumann)
    pub dirichlet_pressure: FnBoundaryValue,

    /// Dirichlet saturation at a face center (None means Neumann)
    pub dirichlet_saturation: FnBoundaryValue,

    /// Uniform temperature
    pub temperature: f64,

    /// Uniform reference pressure
    pub reference_pressure: f64,
}

impl SampleProblem {
    /// Allocates a new instance representing a closed domain
    pub fn new() -> Self {
        SampleProblem {
            source: [0.0, 0.0],
            neumann_flux: [0.0, 0.0],
            dirichlet_pressure: Box::new(|_| None),
            dirichlet_saturation: Box::new(|_| None),
            temperature: 283.15,
            reference_pressure: 1e5,
        }
    }

    /// Sets the source terms
    pub fn set_source(&mut self, qw: f64, qn: f64) -> &mut Self {
        self.source = [qw, qn];
        self
    }

    /// Sets the mass fluxes at Neumann faces
    pub fn set_neumann_flux(&mut self, jw: f64, jn: f64) -> &mut Self {
        self.neumann_flux = [jw, jn];
        self
    }

    /// Sets the function returning the Dirichlet pressure (or None for Neumann)
    pub fn set_dirichlet_pressure(&mut self, f: impl Fn(&[f64]) -> Option<f64> + 'static) -> &mut Self {
        self.dirichlet_pressure = Box::new(f);
        self
    }

    /// Sets the function returning the Dirichlet saturation (or None for Neumann)
    pub fn set_dirichlet_saturation(&mut self, f: impl Fn(&[f64]) -> Option<f64> + 'static) -> &mut Self {
        self.dirichlet_saturation = Box::new(f);
        self
    }
}

impl Problem for SampleProblem {
    fn source(&self, _x: &[f64], _cell: &GridCell) -> [f64; 2] {
        self.source
    }

    fn bc_type_pressure(&self, x: &[f64], _face: &GridFace) -> BcKind {
        match (self.dirichlet_pressure)(x) {
            Some(_) => BcKind::Dirichlet,
            None => BcKind::Neumann,
        }
    }

    fn dirichlet_pressure(&self, x: &[f64], _face: &GridFace) -> f64 {
        (self.dirichlet_pressure)(x).unwrap_or(0.0)
    }

    fn neumann_flux(&self, _x: &[f64], _face: &GridFace) -> [f64; 2] {
        self.neumann_flux
    }

    fn bc_type_saturation(&self, x: &[f64], _face: &GridFace) -> BcKind {
        match (self.dirichlet_saturation)(x) {
            Some(_) => BcKind::Dirichlet,
            None => BcKind::Neumann,
        }
    }

    fn dirichlet_saturation(&self, x: &[f64], _face: &GridFace) -> f64 {
        (self.dirichlet_saturation)(x).unwrap_or(0.0)
    }

    fn temperature(&self, _x: &[f64], _cell: &GridCell) -> f64 {
        self.temperature
    }

    fn reference_pressure(&self, _x: &[f64], _cell: &GridCell) -> f64 {
        self.reference_pressure
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::SampleProblem;
    use crate::base::{BcKind, GridKind, Problem, SampleMeshes};
    use crate::grid::Grid;

    #[test]
    fn sample_problem_works() {
        let mesh = SampleMeshes::one_qua4();
        let grid = Grid::new(&mesh, GridKind::UgGrid).unwrap();
        let cell = &grid.cells[0];
        let mut problem = SampleProblem::new();
        assert_eq!(problem.source(&cell.center, cell), [0.0, 0.0]);
        for face in &cell.faces {
            assert_eq!(problem.bc_type_pressure(&face.center, face), BcKind::Neumann);
            assert_eq!(problem.bc_type_saturation(&face.center, face), BcKind::Neumann);
        }

        problem
            .set_source(1.0, 2.0)
            .set_neumann_flux(-3.0, 0.0)
            .set_dirichlet_pressure(|x| if x[0] == 0.0 { Some(5.0) } else { None })
            .set_dirichlet_saturation(|x| if x[1] == 1.0 { Some(0.8) } else { None });
        assert_eq!(problem.source(&cell.center, cell), [1.0, 2.0]);
        let mut n_dirichlet = 0;
        for face in &cell.faces {
            if problem.bc_type_pressure(&face.center, face) == BcKind::Dirichlet {
                assert_eq!(face.center, [0.0, 0.5]);
                assert_eq!(problem.dirichlet_pressure(&face.center, face), 5.0);
                n_dirichlet += 1;
            } else {
                assert_eq!(problem.neumann_flux(&face.center, face), [-3.0, 0.0]);
            }
            if problem.bc_type_saturation(&face.center, face) == BcKind::Dirichlet {
                assert_eq!(face.center, [0.5, 1.0]);
                assert_eq!(problem.dirichlet_saturation(&face.center, face), 0.8);
            }
        }
        assert_eq!(n_dirichlet, 1);
        assert_eq!(problem.temperature(&cell.center, cell), 283.15);
        assert_eq!(problem.reference_pressure(&cell.center, cell), 1e5);
    }
}
