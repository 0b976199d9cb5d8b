//! # Ripple Mesh
//!
//! Geometry handling and mesh generation for the Ripple framework. This
//! crate provides:
//!
//! - **Cavity geometry** ([`geometry`]) — The [`CavityGeometry`] capability
//!   trait (boundary shape and refractive-index law) with the homogeneous
//!   circular cavity as the provided implementation.
//! - **Mesh construction** ([`builder`]) — Boundary/interior point
//!   distribution for a target point count.
//! - **Delaunay triangulation** ([`delaunay`]) — Incremental Bowyer-Watson
//!   triangulation of the generated point set.
//! - **Triangle metrics** ([`metrics`]) — Heron areas and the collocation
//!   points consumed by the integral-equation solver.

pub mod builder;
pub mod delaunay;
pub mod error;
pub mod geometry;
pub mod metrics;

pub use builder::{build_mesh, Mesh};
pub use error::MeshError;
pub use geometry::{CavityGeometry, HomogeneousCircle};
pub use metrics::TriangleMetrics;
