//! # Ripple Core
//!
//! The numerical backbone of the Ripple framework. This crate computes the
//! electromagnetic scattering matrix of a two-dimensional dielectric cavity
//! by solving a volume integral equation over a triangular mesh: one dense
//! linear solve per angular-momentum order of the incident cylindrical
//! wave, followed by a cylindrical-harmonic reduction of the induced field.
//!
//! ## Modules
//!
//! - [`types`] — Solver parameters and result containers.
//! - [`special`] — Integer-order Bessel and Hankel functions.
//! - [`green`] — The 2D free-space Green's-function interaction kernel.
//! - [`solver`] — Dense matrix assembly and direct LU solve.
//! - [`scattering`] — Incident-field harmonics and scattering-matrix
//!   extraction, parallelised over angular orders.
//! - [`analytic`] — Closed-form reference for the homogeneous circular
//!   cavity, used for validation.
//! - [`convergence`] — Mesh-refinement study with a power-law error fit.

pub mod analytic;
pub mod convergence;
pub mod error;
pub mod green;
pub mod scattering;
pub mod solver;
pub mod special;
pub mod types;

pub use error::SolverError;
pub use scattering::{compute_scattering_matrix, ScatteringSolution};
pub use types::{ScatteringMatrix, SolverParams};
