use super::{solve_bicgstab, solve_cg, solve_loop, GlobalMatrix, IterParams, IterResult};
use super::{DirectPreconditioner, Ilu0Preconditioner, Preconditioner};
use crate::base::{Config, KrylovKind, PrecondKind};
use crate::StrError;
use russell_lab::Vector;

/// Drives the solution of the global linear system with a (preconditioner, method) combination
///
/// The supported combinations are:
///
/// * ILU(0) with CG or BiCGSTAB
/// * Direct (complete sparse LU) with Loop or BiCGSTAB
pub struct LinearSolver {
    /// Iterative method
    pub method: KrylovKind,

    /// Preconditioner
    pub preconditioner: PrecondKind,

    /// Stopping criteria
    pub params: IterParams,
}

impl LinearSolver {
    /// Allocates a new instance
    ///
    /// Returns an error if the combination of preconditioner and solver is not implemented.
    pub fn new(config: &Config) -> Result<Self, StrError> {
        match (config.preconditioner, config.solver) {
            (PrecondKind::Ilu0, KrylovKind::Cg)
            | (PrecondKind::Ilu0, KrylovKind::BiCgStab)
            | (PrecondKind::Direct, KrylovKind::Loop)
            | (PrecondKind::Direct, KrylovKind::BiCgStab) => (),
            _ => return Err("combination of preconditioner and solver is not implemented"),
        }
        Ok(LinearSolver {
            method: config.solver,
            preconditioner: config.preconditioner,
            params: IterParams {
                reduction: config.lin_sol_tol,
                max_it: config.lin_sol_max_it,
                verbose: config.verbose_lin_sys,
            },
        })
    }

    /// Solves A · x = b starting from the current values in x
    ///
    /// The matrix must have been compressed after the assembly (see [GlobalMatrix::compress]).
    /// On return, x holds the last iterate even if the method has not converged.
    pub fn solve(&self, x: &mut Vector, mat: &GlobalMatrix, b: &Vector) -> Result<IterResult, StrError> {
        if x.dim() != mat.nrow() || b.dim() != mat.nrow() {
            return Err("vectors are incompatible with the matrix");
        }
        let csr = mat.csr()?;
        let mut pre: Box<dyn Preconditioner> = match self.preconditioner {
            PrecondKind::Ilu0 => Box::new(Ilu0Preconditioner::new(csr)?),
            PrecondKind::Direct => Box::new(DirectPreconditioner::new(mat.coo())?),
        };
        let res = match self.method {
            KrylovKind::Cg => solve_cg(x, csr, b, pre.as_mut(), &self.params)?,
            KrylovKind::BiCgStab => solve_bicgstab(x, csr, b, pre.as_mut(), &self.params)?,
            KrylovKind::Loop => solve_loop(x, csr, b, pre.as_mut(), &self.params)?,
        };
        if self.params.verbose {
            println!(
                "{} + {}: {:?} after {} iterations (reduction = {:.3e})",
                pre.name(),
                self.method.name(),
                res.status,
                res.iterations,
                res.reduction()
            );
        }
        Ok(res)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
