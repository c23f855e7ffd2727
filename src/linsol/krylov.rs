use super::Preconditioner;
use crate::StrError;
use russell_lab::{vec_add, vec_copy, vec_inner, vec_norm, vec_update, Norm, Vector};
use russell_sparse::CsrMatrix;

/// Smallest magnitude of the scalars used as denominators by the iterative methods
const BREAKDOWN_TOL: f64 = 1e-300;

/// Defines the final status of an iterative method
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IterStatus {
    /// The residual reduction criterion was satisfied
    Converged,

    /// The maximum number of iterations was reached
    MaxIterationsReached,

    /// The method could not proceed (breakdown or no further residual reduction)
    Stagnated,
}

/// Holds the results of an iterative method
#[derive(Clone, Copy, Debug)]
pub struct IterResult {
    /// Final status
    pub status: IterStatus,

    /// Number of iterations performed
    pub iterations: usize,

    /// Euclidean norm of the initial residual
    pub initial_residual_norm: f64,

    /// Euclidean norm of the final residual
    pub residual_norm: f64,
}

impl IterResult {
    /// Returns the achieved residual reduction ‖r‖ / ‖r₀‖
    pub fn reduction(&self) -> f64 {
        if self.initial_residual_norm > 0.0 {
            self.residual_norm / self.initial_residual_norm
        } else {
            0.0
        }
    }

    /// Returns true if the method has converged
    pub fn converged(&self) -> bool {
        self.status == IterStatus::Converged
    }
}

/// Holds the stopping criteria of the iterative methods
///
/// An iterative method converges when `‖r‖ ≤ reduction · max(‖r₀‖, ‖b‖)`. Thus, an initial guess
/// that already solves the system up to round-off is accepted without iterations.
#[derive(Clone, Copy, Debug)]
pub struct IterParams {
    /// Required residual reduction ‖r‖ / max(‖r₀‖, ‖b‖)
    pub reduction: f64,

    /// Maximum number of iterations
    pub max_it: usize,

    /// Prints the residual at each iteration
    pub verbose: bool,
}

/// Computes r := b - A · x and returns ‖r‖
fn residual(r: &mut Vector, mat: &CsrMatrix, x: &Vector, b: &Vector, ax: &mut Vector) -> Result<f64, StrError> {
    mat.mat_vec_mul(ax, 1.0, x)?;
    vec_add(r, 1.0, b, -1.0, ax)?;
    Ok(vec_norm(r, Norm::Euc))
}

/// Returns the target residual norm
fn target(params: &IterParams, norm0: f64, b: &Vector) -> f64 {
    params.reduction * f64::max(norm0, vec_norm(b, Norm::Euc))
}

/// Returns the result corresponding to an initial guess satisfying the stopping criterion
fn already_converged(norm: f64) -> IterResult {
    IterResult {
        status: IterStatus::Converged,
        iterations: 0,
        initial_residual_norm: norm,
        residual_norm: norm,
    }
}

/// Prints the residual of an iteration
fn print_iteration(method: &str, it: usize, norm: f64, norm0: f64) {
    println!("{:>10} {:>5} {:>13.6e} {:>13.6e}", method, it, norm, norm / norm0);
}

/// Solves A · x = b with the preconditioned conjugate gradient method
///
/// The matrix must be symmetric positive-definite. On input, `x` holds the initial guess.
pub fn solve_cg(
    x: &mut Vector,
    mat: &CsrMatrix,
    b: &Vector,
    pre: &mut dyn Preconditioner,
    params: &IterParams,
) -> Result<IterResult, StrError> {
    let n = mat.get_info().0;
    let mut r = Vector::new(n);
    let mut z = Vector::new(n);
    let mut p = Vector::new(n);
    let mut ap = Vector::new(n);
    let norm0 = residual(&mut r, mat, x, b, &mut ap)?;
    let tol = target(params, norm0, b);
    if norm0 <= tol {
        return Ok(already_converged(norm0));
    }
    pre.apply(&mut z, &r)?;
    vec_copy(&mut p, &z)?;
    let mut rz = vec_inner(&r, &z);
    let mut norm = norm0;
    for it in 0..params.max_it {
        mat.mat_vec_mul(&mut ap, 1.0, &p)?;
        let pap = vec_inner(&p, &ap);
        if f64::abs(pap) < BREAKDOWN_TOL {
            return Ok(IterResult {
                status: IterStatus::Stagnated,
                iterations: it,
                initial_residual_norm: norm0,
                residual_norm: norm,
            });
        }
        let alpha = rz / pap;
        vec_update(x, alpha, &p)?;
        vec_update(&mut r, -alpha, &ap)?;
        norm = vec_norm(&r, Norm::Euc);
        if params.verbose {
            print_iteration("CG", it + 1, norm, norm0);
        }
        if norm <= tol {
            return Ok(IterResult {
                status: IterStatus::Converged,
                iterations: it + 1,
                initial_residual_norm: norm0,
                residual_norm: norm,
            });
        }
        pre.apply(&mut z, &r)?;
        let rz_new = vec_inner(&r, &z);
        let beta = rz_new / rz;
        rz = rz_new;
        for i in 0..n {
            p[i] = z[i] + beta * p[i];
        }
    }
    Ok(IterResult {
        status: IterStatus::MaxIterationsReached,
        iterations: params.max_it,
        initial_residual_norm: norm0,
        residual_norm: norm,
    })
}

/// Solves A · x = b with the (right) preconditioned stabilized bi-conjugate gradient method
///
/// On input, `x` holds the initial guess.
pub fn solve_bicgstab(
    x: &mut Vector,
    mat: &CsrMatrix,
    b: &Vector,
    pre: &mut dyn Preconditioner,
    params: &IterParams,
) -> Result<IterResult, StrError> {
    let n = mat.get_info().0;
    let mut r = Vector::new(n);
    let mut r0 = Vector::new(n);
    let mut p = Vector::new(n);
    let mut v = Vector::new(n);
    let mut s = Vector::new(n);
    let mut t = Vector::new(n);
    let mut p_hat = Vector::new(n);
    let mut s_hat = Vector::new(n);
    let norm0 = residual(&mut r, mat, x, b, &mut v)?;
    let tol = target(params, norm0, b);
    if norm0 <= tol {
        return Ok(already_converged(norm0));
    }
    vec_copy(&mut r0, &r)?;
    v.fill(0.0);
    let mut rho_old = 1.0;
    let mut alpha = 1.0;
    let mut omega = 1.0;
    let mut norm = norm0;
    let stagnated = |it: usize, norm: f64| IterResult {
        status: IterStatus::Stagnated,
        iterations: it,
        initial_residual_norm: norm0,
        residual_norm: norm,
    };
    for it in 0..params.max_it {
        let rho = vec_inner(&r0, &r);
        if f64::abs(rho) < BREAKDOWN_TOL {
            return Ok(stagnated(it, norm));
        }
        let beta = if it == 0 {
            0.0
        } else {
            (rho / rho_old) * (alpha / omega)
        };
        rho_old = rho;
        for i in 0..n {
            p[i] = r[i] + beta * (p[i] - omega * v[i]);
        }
        pre.apply(&mut p_hat, &p)?;
        mat.mat_vec_mul(&mut v, 1.0, &p_hat)?;
        let r0v = vec_inner(&r0, &v);
        if f64::abs(r0v) < BREAKDOWN_TOL {
            return Ok(stagnated(it, norm));
        }
        alpha = rho / r0v;
        vec_add(&mut s, 1.0, &r, -alpha, &v)?;
        let s_norm = vec_norm(&s, Norm::Euc);
        if s_norm <= tol {
            vec_update(x, alpha, &p_hat)?;
            if params.verbose {
                print_iteration("BiCGSTAB", it + 1, s_norm, norm0);
            }
            return Ok(IterResult {
                status: IterStatus::Converged,
                iterations: it + 1,
                initial_residual_norm: norm0,
                residual_norm: s_norm,
            });
        }
        pre.apply(&mut s_hat, &s)?;
        mat.mat_vec_mul(&mut t, 1.0, &s_hat)?;
        let tt = vec_inner(&t, &t);
        if tt < BREAKDOWN_TOL {
            vec_update(x, alpha, &p_hat)?;
            return Ok(stagnated(it + 1, s_norm));
        }
        omega = vec_inner(&t, &s) / tt;
        vec_update(x, alpha, &p_hat)?;
        vec_update(x, omega, &s_hat)?;
        vec_add(&mut r, 1.0, &s, -omega, &t)?;
        norm = vec_norm(&r, Norm::Euc);
        if params.verbose {
            print_iteration("BiCGSTAB", it + 1, norm, norm0);
        }
        if norm <= tol {
            return Ok(IterResult {
                status: IterStatus::Converged,
                iterations: it + 1,
                initial_residual_norm: norm0,
                residual_norm: norm,
            });
        }
        if f64::abs(omega) < BREAKDOWN_TOL {
            return Ok(stagnated(it + 1, norm));
        }
    }
    Ok(IterResult {
        status: IterStatus::MaxIterationsReached,
        iterations: params.max_it,
        initial_residual_norm: norm0,
        residual_norm: norm,
    })
}

/// Solves A · x = b with the preconditioned Richardson iteration x ← x + M⁻¹ (b - A · x)
///
/// The iteration stops when the residual no longer decreases; the last update is then undone.
/// On input, `x` holds the initial guess.
pub fn solve_loop(
    x: &mut Vector,
    mat: &CsrMatrix,
    b: &Vector,
    pre: &mut dyn Preconditioner,
    params: &IterParams,
) -> Result<IterResult, StrError> {
    let n = mat.get_info().0;
    let mut r = Vector::new(n);
    let mut z = Vector::new(n);
    let mut ax = Vector::new(n);
    let norm0 = residual(&mut r, mat, x, b, &mut ax)?;
    let tol = target(params, norm0, b);
    if norm0 <= tol {
        return Ok(already_converged(norm0));
    }
    let mut norm = norm0;
    for it in 0..params.max_it {
        pre.apply(&mut z, &r)?;
        vec_update(x, 1.0, &z)?;
        let norm_new = residual(&mut r, mat, x, b, &mut ax)?;
        if params.verbose {
            print_iteration("Loop", it + 1, norm_new, norm0);
        }
        if norm_new <= tol {
            return Ok(IterResult {
                status: IterStatus::Converged,
                iterations: it + 1,
                initial_residual_norm: norm0,
                residual_norm: norm_new,
            });
        }
        if norm_new >= norm {
            vec_update(x, -1.0, &z)?;
            return Ok(IterResult {
                status: IterStatus::Stagnated,
                iterations: it + 1,
                initial_residual_norm: norm0,
                residual_norm: norm,
            });
        }
        norm = norm_new;
    }
    Ok(IterResult {
        status: IterStatus::MaxIterationsReached,
        iterations: params.max_it,
        initial_residual_norm: norm0,
        residual_norm: norm,
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
