//! Implements the sparse matrix, preconditioners, and iterative methods for the global linear system

mod global_matrix;
mod krylov;
mod linear_solver;
mod preconditioner;
pub use crate::linsol::global_matrix::*;
pub use crate::linsol::krylov::*;
pub use crate::linsol::linear_solver::*;
pub use crate::linsol::preconditioner::*;
