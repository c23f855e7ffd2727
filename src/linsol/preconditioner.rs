use crate::StrError;
use russell_lab::Vector;
use russell_sparse::{CooMatrix, CsrMatrix, Genie, LinSolParams, LinSolver};

/// Defines a preconditioner computing z = M⁻¹ · r
pub trait Preconditioner {
    /// Applies the preconditioner
    fn apply(&mut self, z: &mut Vector, r: &Vector) -> Result<(), StrError>;

    /// Returns the name of the preconditioner
    fn name(&self) -> &'static str;
}

/// Implements the incomplete LU factorization with zero fill-in
///
/// The factors L (unit lower triangular) and U share the pattern of the matrix.
pub struct Ilu0Preconditioner {
    /// Dimension
    n: usize,

    /// Row pointers (copy of the matrix pattern)
    row_ptr: Vec<usize>,

    /// Column indices (copy of the matrix pattern)
    col_idx: Vec<usize>,

    /// Strictly lower part of L and upper part of U (including the diagonal)
    lu_values: Vec<f64>,

    /// Position of the diagonal entry of each row
    diag_ptr: Vec<usize>,

    /// Workspace for the forward substitution
    work: Vector,
}

impl Ilu0Preconditioner {
    /// Allocates a new instance and performs the factorization
    ///
    /// The column indices of each row of the compressed matrix must be sorted (as given by
    /// [CsrMatrix::from_coo]).
    pub fn new(csr: &CsrMatrix) -> Result<Self, StrError> {
        let n = csr.get_info().0;
        let row_ptr: Vec<usize> = csr.get_row_pointers().iter().map(|&k| k as usize).collect();
        let col_idx: Vec<usize> = csr.get_col_indices().iter().map(|&j| j as usize).collect();
        let mut diag_ptr = vec![0; n];
        for i in 0..n {
            let row = &col_idx[row_ptr[i]..row_ptr[i + 1]];
            let k = row
                .binary_search(&i)
                .map_err(|_| "ILU(0) requires all diagonal entries in the pattern")?;
            diag_ptr[i] = row_ptr[i] + k;
        }
        let mut lu_values = csr.get_values().to_vec();
        factorize(&row_ptr, &col_idx, &diag_ptr, &mut lu_values)?;
        Ok(Ilu0Preconditioner {
            n,
            row_ptr,
            col_idx,
            lu_values,
            diag_ptr,
            work: Vector::new(n),
        })
    }
}

/// Performs the ILU(0) factorization in place (column indices must be sorted)
fn factorize(row_ptr: &[usize], col_idx: &[usize], diag_ptr: &[usize], lu: &mut [f64]) -> Result<(), StrError> {
    let n = diag_ptr.len();
    for i in 1..n {
        for k_idx in row_ptr[i]..diag_ptr[i] {
            let k = col_idx[k_idx];
            let pivot = lu[diag_ptr[k]];
            if pivot == 0.0 {
                return Err("ILU(0) factorization found a zero pivot");
            }
            let factor = lu[k_idx] / pivot;
            lu[k_idx] = factor;
            for j_idx in (k_idx + 1)..row_ptr[i + 1] {
                let j = col_idx[j_idx];
                // find U[k,j]
                let start = diag_ptr[k] + 1;
                let end = row_ptr[k + 1];
                if let Ok(m) = col_idx[start..end].binary_search(&j) {
                    lu[j_idx] -= factor * lu[start + m];
                }
            }
        }
    }
    if diag_ptr.iter().any(|&d| lu[d] == 0.0) {
        return Err("ILU(0) factorization found a zero pivot");
    }
    Ok(())
}

impl Preconditioner for Ilu0Preconditioner {
    fn apply(&mut self, z: &mut Vector, r: &Vector) -> Result<(), StrError> {
        if r.dim() != self.n || z.dim() != self.n {
            return Err("vectors are incompatible with the preconditioner");
        }
        // forward: L · y = r
        for i in 0..self.n {
            let mut sum = r[i];
            for k in self.row_ptr[i]..self.diag_ptr[i] {
                sum -= self.lu_values[k] * self.work[self.col_idx[k]];
            }
            self.work[i] = sum;
        }
        // backward: U · z = y
        for i in (0..self.n).rev() {
            let mut sum = self.work[i];
            for k in (self.diag_ptr[i] + 1)..self.row_ptr[i + 1] {
                sum -= self.lu_values[k] * z[self.col_idx[k]];
            }
            z[i] = sum / self.lu_values[self.diag_ptr[i]];
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "SeqILU0"
    }
}

/// Implements a preconditioner given by the complete sparse LU factorization (UMFPACK)
///
/// Applying this preconditioner solves the linear system exactly (up to round-off).
pub struct DirectPreconditioner {
    /// Dimension
    n: usize,

    /// Sparse solver holding the factorization
    solver: LinSolver<'static>,
}

impl DirectPreconditioner {
    /// Allocates a new instance and performs the factorization
    pub fn new(coo: &CooMatrix) -> Result<Self, StrError> {
        let mut solver = LinSolver::new(Genie::Umfpack)?;
        solver.actual.factorize(coo, Some(LinSolParams::new()))?;
        Ok(DirectPreconditioner {
            n: coo.get_info().0,
            solver,
        })
    }
}

impl Preconditioner for DirectPreconditioner {
    fn apply(&mut self, z: &mut Vector, r: &Vector) -> Result<(), StrError> {
        if r.dim() != self.n || z.dim() != self.n {
            return Err("vectors are incompatible with the preconditioner");
        }
        self.solver.actual.solve(z, r, false)
    }

    fn name(&self) -> &'static str {
        "Direct"
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
