//! Core types shared across the Ripple framework.

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Parameters defining one scattering computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverParams {
    /// Wavenumber $k$ of the incident field.
    pub wavenumber: f64,
    /// Maximum angular-momentum order $M_{max}$; the scattering matrix has
    /// dimension $2 M_{max} + 1$.
    pub max_order: i32,
    /// Relative-residual tolerance above which a dense solve is reported as
    /// singular or ill-conditioned.
    pub residual_tolerance: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            wavenumber: 1.0,
            max_order: 1,
            residual_tolerance: 1e-8,
        }
    }
}

/// The complex scattering matrix, indexed by (output order, input order).
///
/// Row and column `i` correspond to angular order `i - max_order`, so the
/// matrix runs over orders $-M_{max} \ldots M_{max}$ in both directions.
#[derive(Debug, Clone)]
pub struct ScatteringMatrix {
    pub max_order: i32,
    pub entries: Array2<Complex64>,
}

impl ScatteringMatrix {
    /// Matrix dimension, $2 M_{max} + 1$.
    pub fn dim(&self) -> usize {
        2 * self.max_order as usize + 1
    }

    /// Entry for output order `mp` and input order `m`.
    pub fn entry(&self, mp: i32, m: i32) -> Complex64 {
        let row = (mp + self.max_order) as usize;
        let col = (m + self.max_order) as usize;
        self.entries[[row, col]]
    }

    /// The diagonal, ordered $m = -M_{max} \ldots M_{max}$.
    pub fn diagonal(&self) -> Vec<Complex64> {
        (0..self.dim()).map(|i| self.entries[[i, i]]).collect()
    }
}

/// The induced field inside the cavity for one incident angular order.
#[derive(Debug, Clone)]
pub struct InducedField {
    /// The incident angular order this field was solved for.
    pub order: i32,
    /// One complex value per mesh triangle.
    pub values: ndarray::Array1<Complex64>,
}

/// One measurement of the convergence study.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConvergencePoint {
    /// Requested point count of this resolution.
    pub target_points: usize,
    /// Mean triangle area of the generated mesh.
    pub mean_area: f64,
    /// Max absolute error of the matrix diagonal vs the analytic reference.
    pub error: f64,
}

/// Result of a full convergence study.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvergenceReport {
    pub points: Vec<ConvergencePoint>,
    /// Fitted power-law exponent of error vs mean area. Negative when the
    /// error shrinks under refinement.
    pub exponent: f64,
    /// Fitted log-log intercept, kept for reproducing the fitted line.
    pub intercept: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scattering_matrix_indexing() {
        let max_order = 2;
        let dim = 5;
        let mut entries = Array2::<Complex64>::zeros((dim, dim));
        entries[[0, 4]] = Complex64::new(1.0, -1.0);
        let s = ScatteringMatrix { max_order, entries };

        assert_eq!(s.dim(), 5);
        assert_eq!(s.entry(-2, 2), Complex64::new(1.0, -1.0));
        assert_eq!(s.entry(0, 0), Complex64::new(0.0, 0.0));
        assert_eq!(s.diagonal().len(), 5);
    }
}
