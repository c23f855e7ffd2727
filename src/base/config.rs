use super::{KrylovKind, ParamFluids, PrecondKind, SaturationType, VelocityType};
use crate::StrError;
use std::fmt;

/// Holds configuration data for the MPFA-O pressure solver
pub struct Config {
    /// Iterative method for the global linear system
    pub solver: KrylovKind,

    /// Preconditioner for the global linear system
    pub preconditioner: PrecondKind,

    /// Velocity used to compute the upwind directions
    pub velocity_type: VelocityType,

    /// Primary saturation variable stored in the Variables
    pub saturation_type: SaturationType,

    /// Residual reduction required by the iterative method (relative to the larger of the
    /// initial residual and the right-hand side norms)
    pub lin_sol_tol: f64,

    /// Maximum number of iterations of the iterative method
    pub lin_sol_max_it: usize,

    /// Shows messages such as the number of nonzeros and the solve banner
    pub verbose: bool,

    /// Shows the iterations of the linear solver
    pub verbose_lin_sys: bool,

    /// Parameters for the wetting and non-wetting fluids
    pub fluids: ParamFluids,
}

impl Config {
    /// Allocates a new instance with default values
    ///
    /// The defaults are BiCGSTAB preconditioned with ILU(0), a reduction of 1e-14
    /// within 1000 iterations, total velocity, and the wetting saturation as primary variable.
    pub fn new() -> Self {
        Config {
            solver: KrylovKind::BiCgStab,
            preconditioner: PrecondKind::Ilu0,
            velocity_type: VelocityType::Total,
            saturation_type: SaturationType::Wetting,
            lin_sol_tol: 1e-14,
            lin_sol_max_it: 1000,
            verbose: true,
            verbose_lin_sys: false,
            fluids: ParamFluids::sample_unit(),
        }
    }

    /// Sets the iterative method
    pub fn set_solver(&mut self, solver: KrylovKind) -> Result<&mut Self, StrError> {
        self.solver = solver;
        Ok(self)
    }

    /// Sets the preconditioner
    pub fn set_preconditioner(&mut self, preconditioner: PrecondKind) -> Result<&mut Self, StrError> {
        self.preconditioner = preconditioner;
        Ok(self)
    }

    /// Sets the iterative method and preconditioner by their names
    ///
    /// Example: `config.set_solver_by_name("BiCGSTAB", "SeqILU0")`
    pub fn set_solver_by_name(&mut self, solver: &str, preconditioner: &str) -> Result<&mut Self, StrError> {
        self.solver = KrylovKind::from_name(solver)?;
        self.preconditioner = PrecondKind::from_name(preconditioner)?;
        Ok(self)
    }

    /// Sets the velocity used for upwinding
    pub fn set_velocity_type(&mut self, velocity_type: VelocityType) -> Result<&mut Self, StrError> {
        self.velocity_type = velocity_type;
        Ok(self)
    }

    /// Sets the primary saturation variable
    pub fn set_saturation_type(&mut self, saturation_type: SaturationType) -> Result<&mut Self, StrError> {
        self.saturation_type = saturation_type;
        Ok(self)
    }

    /// Sets the relative residual reduction of the linear solver
    pub fn set_lin_sol_tol(&mut self, value: f64) -> Result<&mut Self, StrError> {
        if value <= 0.0 {
            return Err("lin_sol_tol must be > 0.0");
        }
        self.lin_sol_tol = value;
        Ok(self)
    }

    /// Sets the maximum number of iterations of the linear solver
    pub fn set_lin_sol_max_it(&mut self, value: usize) -> Result<&mut Self, StrError> {
        if value < 1 {
            return Err("lin_sol_max_it must be ≥ 1");
        }
        self.lin_sol_max_it = value;
        Ok(self)
    }

    /// Enables or disables messages
    pub fn set_verbose(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        self.verbose = flag;
        Ok(self)
    }

    /// Sets the parameters for the fluids
    pub fn set_fluids(&mut self, fluids: ParamFluids) -> Result<&mut Self, StrError> {
        if fluids.wetting.viscosity <= 0.0 || fluids.nonwetting.viscosity <= 0.0 {
            return Err("viscosities must be > 0.0");
        }
        if fluids.wetting.density.rho_ref <= 0.0 || fluids.nonwetting.density.rho_ref <= 0.0 {
            return Err("reference densities must be > 0.0");
        }
        self.fluids = fluids;
        Ok(self)
    }

    /// Enables or disables messages of the linear solver iterations
    pub fn set_verbose_lin_sys(&mut self, flag: bool) -> Result<&mut Self, StrError> {
        self.verbose_lin_sys = flag;
        Ok(self)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration data\n").unwrap();
        write!(f, "==================\n").unwrap();
        write!(f, "solver = {}\n", self.solver.name()).unwrap();
        write!(f, "preconditioner = {}\n", self.preconditioner.name()).unwrap();
        write!(f, "velocity_type = {:?}\n", self.velocity_type).unwrap();
        write!(f, "saturation_type = {:?}\n", self.saturation_type).unwrap();
        write!(f, "lin_sol_tol = {:?}\n", self.lin_sol_tol).unwrap();
        write!(f, "lin_sol_max_it = {:?}\n", self.lin_sol_max_it).unwrap();
        write!(f, "verbose = {:?}\n", self.verbose).unwrap();
        write!(f, "verbose_lin_sys = {:?}\n", self.verbose_lin_sys).unwrap();

        write!(f, "\nParameters for fluids\n").unwrap();
        write!(f, "=====================\n").unwrap();
        write!(f, "wetting = {:?}\n", self.fluids.wetting).unwrap();
        write!(f, "nonwetting = {:?}\n", self.fluids.nonwetting).unwrap();
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
