use super::{pressure_conditions, upwind_saturations, HalfFlux, InteractionVolume, LocalSystem, Variables};
use crate::base::{Config, Problem, SpatialParams};
use crate::grid::{Grid, NFACE};
use crate::linsol::{GlobalMatrix, IterResult, LinearSolver};
use crate::material::{FluidModel, MaterialLawModel};
use crate::StrError;
use russell_lab::Vector;

/// Implements the MPFA-O pressure solver with upwind mobilities for two-phase flow
///
/// The pressure equation `Σ_faces flux = volume · (qw + qn)` is discretized with the
/// multi-point flux approximation (O-method). Each cell contributes four interaction volumes
/// (one per corner) and each interaction volume yields the half-fluxes through the two faces of
/// the cell touching that corner. The total mobilities entering the flux coefficients are taken
/// from the upwind mobility table of [Variables].
///
/// # Examples
///
/// ```
/// use mpfao::prelude::*;
///
/// fn main() -> Result<(), StrError> {
///     // 2 × 1 cells with p = 1 on the left and p = 0 on the right
///     let mesh = SampleMeshes::two_qua4();
///     let grid = Grid::new(&mesh, GridKind::UgGrid)?;
///     let mut problem = SampleProblem::new();
///     problem.set_dirichlet_pressure(|x| {
///         if x[0] == 0.0 {
///             Some(1.0)
///         } else if x[0] == 2.0 {
///             Some(0.0)
///         } else {
///             None
///         }
///     });
///     let spatial = Attributes::from([(1, ParamPorous::sample_isotropic())]);
///     let mut config = Config::new();
///     config.set_verbose(false)?;
///
///     let mut solver = MpfaPressure::new(&grid, &problem, &spatial, &config)?;
///     let mut vars = Variables::new(grid.ncell(), 1.0);
///     let res = solver.initial(&mut vars)?;
///     assert!(res.converged());
///     assert!(f64::abs(vars.pressure[0] - 0.75) < 1e-10);
///     assert!(f64::abs(vars.pressure[1] - 0.25) < 1e-10);
///     Ok(())
/// }
/// ```
pub struct MpfaPressure<'a> {
    /// Holds the grid
    pub grid: &'a Grid,

    /// Holds the boundary conditions and sources
    pub problem: &'a dyn Problem,

    /// Holds configuration parameters
    pub config: &'a Config,

    /// Holds all interaction volumes (indexed by `cell * NFACE + face`)
    pub volumes: Vec<InteractionVolume>,

    /// Holds the absolute permeability of each cell
    pub permeability: Vec<[[f64; 2]; 2]>,

    /// Flags the cells with zero permeability tensor
    pub impermeable: Vec<bool>,

    /// Holds the relative permeability and capillary pressure laws of each cell
    pub material_laws: Vec<MaterialLawModel>,

    /// Holds the model of the wetting fluid
    pub fluid_wetting: FluidModel,

    /// Holds the model of the non-wetting fluid
    pub fluid_nonwetting: FluidModel,

    /// Holds the linear solver
    pub linear_solver: LinearSolver,

    /// Global matrix (one row per cell)
    pub mat: GlobalMatrix,

    /// Global right-hand side
    pub rhs: Vector,
}

impl<'a> MpfaPressure<'a> {
    /// Allocates a new instance and initializes the sparsity pattern of the global matrix
    ///
    /// The pattern of row `i` contains cell `i`, its face neighbors, and the cells sharing a
    /// corner with cell `i`.
    pub fn new(
        grid: &'a Grid,
        problem: &'a dyn Problem,
        spatial_params: &dyn SpatialParams,
        config: &'a Config,
    ) -> Result<Self, StrError> {
        let ncell = grid.ncell();
        if ncell == 0 {
            return Err("the grid must have at least one cell");
        }
        let linear_solver = LinearSolver::new(config)?;
        let fluid_wetting = FluidModel::new(&config.fluids.wetting)?;
        let fluid_nonwetting = FluidModel::new(&config.fluids.nonwetting)?;

        // spatial parameters
        let mut permeability = Vec::with_capacity(ncell);
        let mut impermeable = Vec::with_capacity(ncell);
        let mut material_laws = Vec::with_capacity(ncell);
        for cell in &grid.cells {
            let kk = spatial_params.permeability(&cell.center, cell)?;
            if kk.dims() != (2, 2) {
                return Err("the permeability tensor must be 2 × 2");
            }
            let k = [[kk.get(0, 0), kk.get(0, 1)], [kk.get(1, 0), kk.get(1, 1)]];
            impermeable.push(k.iter().all(|row| row.iter().all(|&v| v == 0.0)));
            permeability.push(k);
            let law = spatial_params.material_law(&cell.center, cell)?;
            material_laws.push(MaterialLawModel::new(&law)?);
        }

        // interaction volumes and sparsity pattern
        let volumes = InteractionVolume::all(grid)?;
        let mut pattern = vec![Vec::new(); ncell];
        for iv in &volumes {
            for id in iv.cells().iter().flatten() {
                pattern[iv.cell1].push(*id);
            }
        }
        // each permeable cell adds two half-fluxes with (at most) four coefficients per volume
        let mat = GlobalMatrix::new(&pattern, ncell * NFACE * 2 * 4)?;
        if config.verbose {
            println!("number of nonzero terms in the MPFA O-matrix: nnmat = {}", mat.nnz());
        }
        Ok(MpfaPressure {
            grid,
            problem,
            config,
            volumes,
            permeability,
            impermeable,
            material_laws,
            fluid_wetting,
            fluid_nonwetting,
            linear_solver,
            mat,
            rhs: Vector::new(ncell),
        })
    }

    /// Returns the interaction volume of a cell and one of its faces
    pub fn interaction_volume(&self, cell: usize, face: usize) -> &InteractionVolume {
        &self.volumes[cell * NFACE + face]
    }

    /// Computes the half-fluxes through the faces 12 and 13 of an interaction volume
    ///
    /// The stencils refer to the cells at positions 1, 2, 3, 4 of the interaction volume.
    pub fn half_fluxes(&self, vars: &Variables, cell: usize, face: usize) -> Result<[HalfFlux; 2], StrError> {
        let iv = self.interaction_volume(cell, face);
        let mut lambda = [0.0; 4];
        for k in 0..4 {
            lambda[k] =
                vars.upwind_mobility_wetting[cell][face][k] + vars.upwind_mobility_nonwetting[cell][face][k];
        }
        let conditions = pressure_conditions(
            self.grid,
            iv,
            self.problem,
            vars.density_wetting[cell],
            vars.density_nonwetting[cell],
        );
        let local = LocalSystem::new(self.grid, iv, &self.permeability, &lambda, conditions)?;
        local.half_fluxes()
    }

    /// Performs the initial pressure solve
    ///
    /// The first solve uses the cell mobilities (no upwinding). The resulting velocity field
    /// defines the upwind directions of the second solve. Returns an error if the first solve
    /// does not converge; otherwise, returns the results of the second solve.
    pub fn initial(&mut self, vars: &mut Variables) -> Result<IterResult, StrError> {
        self.update_material_laws(vars, true)?;
        self.assemble(vars)?;
        let res = self.solve(vars)?;
        if !res.converged() {
            return Err("initial pressure solve did not converge");
        }
        self.calculate_velocity(vars)?;
        self.update_material_laws(vars, false)?;
        self.assemble(vars)?;
        self.solve(vars)
    }

    /// Assembles and solves the pressure equation with the current upwind mobilities
    ///
    /// See [MpfaPressure::solve] regarding non-converged results.
    pub fn pressure(&mut self, vars: &mut Variables) -> Result<IterResult, StrError> {
        self.assemble(vars)?;
        self.solve(vars)
    }

    /// Assembles the global matrix and right-hand side
    pub fn assemble(&mut self, vars: &Variables) -> Result<(), StrError> {
        vars.check(self.grid.ncell())?;
        self.mat.reset()?;
        self.rhs.fill(0.0);
        for cell in &self.grid.cells {
            let i = cell.id;
            let q = self.problem.source(&cell.center, cell);
            self.rhs[i] = cell.volume * (q[0] + q[1]);
            if self.impermeable[i] {
                self.mat.add(i, i, 1.0)?;
                continue;
            }
            for face in 0..NFACE {
                let fluxes = self.half_fluxes(vars, i, face)?;
                let cells = self.interaction_volume(i, face).cells();
                for flux in &fluxes {
                    for (k, id) in cells.iter().enumerate() {
                        if let Some(j) = id {
                            self.mat.add(i, *j, flux.coef[k])?;
                        }
                    }
                    self.rhs[i] -= flux.constant;
                }
            }
        }
        self.mat.compress()
    }

    /// Solves the global linear system and stores the pressure in the variables
    ///
    /// The current pressure is the initial guess of the iterative method. The pressure is
    /// replaced by the last iterate even if the method has not converged; thus, the caller must
    /// check the returned results.
    pub fn solve(&mut self, vars: &mut Variables) -> Result<IterResult, StrError> {
        vars.check(self.grid.ncell())?;
        if self.config.verbose {
            println!("MpfaPressure: solve for pressure");
        }
        let mut x = Vector::from(&vars.pressure);
        let res = self.linear_solver.solve(&mut x, &self.mat, &self.rhs)?;
        if self.config.verbose && !res.converged() {
            println!(
                "MpfaPressure: linear solver did not converge ({:?}, reduction = {:.3e})",
                res.status,
                res.reduction()
            );
        }
        vars.pressure.copy_from_slice(x.as_data());
        Ok(res)
    }

    /// Updates the constitutive quantities and the upwind mobility table
    ///
    /// With `first = true` all slots of the table receive the mobility of the cell itself.
    /// Otherwise the slots are upwinded using the velocities and potentials in the variables.
    pub fn update_material_laws(&mut self, vars: &mut Variables, first: bool) -> Result<(), StrError> {
        vars.check(self.grid.ncell())?;
        let sat_type = self.config.saturation_type;
        for cell in &self.grid.cells {
            let i = cell.id;
            let law = &self.material_laws[i];
            let sw = sat_type.wetting(vars.saturation[i]);
            let temperature = self.problem.temperature(&cell.center, cell);
            let p_ref = self.problem.reference_pressure(&cell.center, cell);
            let rho_w = self.fluid_wetting.density(p_ref, temperature)?;
            let rho_n = self.fluid_nonwetting.density(p_ref, temperature)?;
            let mu_w = self.fluid_wetting.viscosity(p_ref, temperature);
            let mu_n = self.fluid_nonwetting.viscosity(p_ref, temperature);
            let mob_w = law.krw(sw) / mu_w;
            let mob_n = law.krn(sw) / mu_n;

            // upwind mobility table
            for face in 0..NFACE {
                if first {
                    vars.upwind_mobility_wetting[i][face] = [mob_w; 4];
                    vars.upwind_mobility_nonwetting[i][face] = [mob_n; 4];
                    continue;
                }
                let iv = self.interaction_volume(i, face);
                let cells = iv.cells();
                let sat = upwind_saturations(
                    self.grid,
                    iv,
                    self.problem,
                    vars,
                    sat_type,
                    self.config.velocity_type,
                );
                for k in 0..4 {
                    if let (Some(s), Some(id)) = (sat[k], cells[k]) {
                        let law_k = &self.material_laws[id];
                        vars.upwind_mobility_wetting[i][face][k] = law_k.krw(s) / mu_w;
                        vars.upwind_mobility_nonwetting[i][face][k] = law_k.krn(s) / mu_n;
                    }
                }
            }

            // cell quantities
            vars.capillary_pressure[i] = law.pc(sw);
            vars.density_wetting[i] = rho_w;
            vars.density_nonwetting[i] = rho_n;
            vars.viscosity_wetting[i] = mu_w;
            vars.viscosity_nonwetting[i] = mu_n;
            vars.mobility_wetting[i] = mob_w;
            vars.mobility_nonwetting[i] = mob_n;
            vars.frac_flow_wetting[i] = mob_w / (mob_w + mob_n);
            vars.frac_flow_nonwetting[i] = mob_n / (mob_w + mob_n);
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
