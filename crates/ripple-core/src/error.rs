//! Error types for the scattering solver.

use ripple_mesh::MeshError;
use thiserror::Error;

/// Errors that can occur during a scattering computation.
#[derive(Debug, Error)]
pub enum SolverError {
    /// Mesh generation failed before the solve could start.
    #[error("Mesh generation failed: {0}")]
    Mesh(#[from] MeshError),

    /// The dense system is singular or ill-conditioned beyond tolerance.
    #[error("Linear solve failed for angular order {order}: {reason}")]
    LinearSolve { order: i32, reason: String },

    /// The analytic reference formula hit a near-zero denominator.
    #[error("Analytic reference is singular at order {order} (|denominator| = {denominator:.3e})")]
    SingularReference { order: i32, denominator: f64 },

    /// A construction-time parameter is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
