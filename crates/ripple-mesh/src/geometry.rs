//! Cavity geometry: boundary shape and refractive-index distribution.
//!
//! A cavity is described by its boundary in the implicit polar form
//! $r(\theta)$ together with a piecewise-constant refractive-index law.
//! New geometries are added by implementing [`CavityGeometry`], not by
//! touching the solver.

use serde::{Deserialize, Serialize};

/// A dielectric cavity: boundary shape plus refractive-index law.
///
/// The dielectric contrast $n_c^2 - n_o^2$ is the source-term strength of
/// the volume integral equation; zero contrast means no scattering.
pub trait CavityGeometry: Send + Sync {
    /// Boundary radius $r(\theta)$ at polar angle `theta`.
    fn boundary(&self, theta: f64) -> f64;

    /// Refractive index at polar position `(r, theta)`.
    fn refractive_index(&self, r: f64, theta: f64) -> f64;

    /// Dielectric contrast $n_c^2 - n_o^2$ between cavity and exterior.
    fn contrast(&self) -> f64;
}

/// Circular cavity with a homogeneous refractive index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomogeneousCircle {
    /// Boundary radius $r_0$.
    pub radius: f64,
    /// Refractive index inside the boundary.
    pub n_core: f64,
    /// Refractive index outside the boundary.
    pub n_outside: f64,
}

impl HomogeneousCircle {
    pub fn new(radius: f64, n_core: f64, n_outside: f64) -> Self {
        Self {
            radius,
            n_core,
            n_outside,
        }
    }
}

impl CavityGeometry for HomogeneousCircle {
    fn boundary(&self, _theta: f64) -> f64 {
        self.radius
    }

    fn refractive_index(&self, r: f64, _theta: f64) -> f64 {
        if r < self.radius {
            self.n_core
        } else {
            self.n_outside
        }
    }

    fn contrast(&self) -> f64 {
        self.n_core * self.n_core - self.n_outside * self.n_outside
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_circle_boundary_is_constant() {
        let cavity = HomogeneousCircle::new(1.5, 2.0, 1.0);
        for i in 0..8 {
            let theta = i as f64 * std::f64::consts::FRAC_PI_4;
            assert_abs_diff_eq!(cavity.boundary(theta), 1.5);
        }
    }

    #[test]
    fn test_refractive_index_step() {
        let cavity = HomogeneousCircle::new(1.0, 2.0, 1.0);
        assert_abs_diff_eq!(cavity.refractive_index(0.5, 0.3), 2.0);
        assert_abs_diff_eq!(cavity.refractive_index(1.5, 0.3), 1.0);
        // On the boundary itself the exterior index applies.
        assert_abs_diff_eq!(cavity.refractive_index(1.0, 0.0), 1.0);
    }

    #[test]
    fn test_contrast() {
        let cavity = HomogeneousCircle::new(1.0, 2.0, 1.0);
        assert_abs_diff_eq!(cavity.contrast(), 3.0);

        let no_contrast = HomogeneousCircle::new(1.0, 1.0, 1.0);
        assert_abs_diff_eq!(no_contrast.contrast(), 0.0);
    }
}
