//! Mpfao - MPFA-O pressure solver for two-phase flow in porous media
//!
//! The pressure equation is discretized with the multi-point flux approximation (O-method)
//! on quadrilateral grids. The mobilities entering the transmissibilities are upwinded over
//! each interaction volume using the reconstructed velocity field.

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod grid;
pub mod linsol;
pub mod material;
pub mod mpfa;
pub mod prelude;
