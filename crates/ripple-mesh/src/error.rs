//! Error types for mesh generation.

use thiserror::Error;

/// Errors that can occur while building a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    /// The requested point count is too small to mesh the cavity.
    #[error(
        "Degenerate mesh: {requested} points gives a {side}x{side} distribution; \
         at least 2 points per side are required"
    )]
    DegenerateMesh { requested: usize, side: usize },

    /// The triangulation algorithm could not produce a valid triangulation.
    #[error("Triangulation failed: {0}")]
    Triangulation(String),
}
