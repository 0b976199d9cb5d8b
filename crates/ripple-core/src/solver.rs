//! Dense system assembly and direct linear solve.
//!
//! The volume integral equation discretised over $T$ triangles becomes the
//! dense complex system
//!
//! $$ (\mathbf{I} - \mathbf{M})\,\mathbf{x} = \mathbf{b} $$
//!
//! with $M_{ij} = K(c_i, c_j)\,A_j$ for $i \neq j$ and $M_{ii} = 0$: the
//! kernel couples every pair of collocation points, and the self term is
//! excluded (see [`crate::green`]). `M` does not depend on the incident
//! angular order, so it is assembled once per mesh and shared read-only by
//! the per-order solves; each order performs its own $O(T^3)$ LU
//! factorisation, which dominates the cost of the whole pipeline.

use faer::linalg::solvers::SpSolver;
use ndarray::{Array1, Array2};
use num_complex::Complex64;
use ripple_mesh::TriangleMetrics;

use crate::error::SolverError;
use crate::green::interaction_kernel;

/// Assemble the $T \times T$ interaction matrix `M` (zero diagonal).
pub fn assemble_interaction_matrix(
    metrics: &TriangleMetrics,
    k: f64,
    contrast: f64,
) -> Array2<Complex64> {
    let t = metrics.num_triangles();
    let mut matrix = Array2::<Complex64>::zeros((t, t));

    for i in 0..t {
        for j in 0..t {
            if i == j {
                continue;
            }
            let kernel = interaction_kernel(k, contrast, metrics.centroids[i], metrics.centroids[j]);
            matrix[[i, j]] = kernel * metrics.areas[j];
        }
    }

    matrix
}

/// Form the system matrix $\mathbf{I} - \mathbf{M}$.
pub fn system_matrix(interaction: &Array2<Complex64>) -> Array2<Complex64> {
    let t = interaction.nrows();
    let mut system = interaction.mapv(|v| -v);
    for i in 0..t {
        system[[i, i]] += Complex64::new(1.0, 0.0);
    }
    system
}

/// Solve the dense system by LU decomposition with partial pivoting.
///
/// `faer`'s LU does not report rank deficiency, so singularity is detected
/// after the fact: a non-finite solution or a relative residual above
/// `residual_tolerance` fails with [`SolverError::LinearSolve`]. `order` is
/// carried only for error reporting.
pub fn solve_dense(
    system: &Array2<Complex64>,
    rhs: &Array1<Complex64>,
    residual_tolerance: f64,
    order: i32,
) -> Result<Array1<Complex64>, SolverError> {
    let dim = system.nrows();
    assert_eq!(dim, system.ncols(), "System matrix must be square");
    assert_eq!(dim, rhs.len(), "RHS length must match system dimension");

    // Convert ndarray to faer Mat<c64>
    let faer_mat = faer::Mat::<faer::complex_native::c64>::from_fn(dim, dim, |i, j| {
        let v = system[[i, j]];
        faer::complex_native::c64::new(v.re, v.im)
    });
    let faer_rhs = faer::Col::<faer::complex_native::c64>::from_fn(dim, |i| {
        let v = rhs[i];
        faer::complex_native::c64::new(v.re, v.im)
    });

    let lu = faer_mat.partial_piv_lu();
    let faer_sol = lu.solve(&faer_rhs);

    let solution = Array1::from_vec(
        (0..dim)
            .map(|i| {
                let v = faer_sol[i];
                Complex64::new(v.re, v.im)
            })
            .collect(),
    );

    if solution.iter().any(|v| !v.re.is_finite() || !v.im.is_finite()) {
        return Err(SolverError::LinearSolve {
            order,
            reason: "solution contains non-finite values (singular system)".into(),
        });
    }

    let residual = system.dot(&solution) - rhs;
    let rhs_norm = norm(rhs).max(f64::MIN_POSITIVE);
    let relative = norm(&residual) / rhs_norm;
    if relative > residual_tolerance {
        return Err(SolverError::LinearSolve {
            order,
            reason: format!(
                "relative residual {relative:.3e} exceeds tolerance {residual_tolerance:.1e}"
            ),
        });
    }

    Ok(solution)
}

fn norm(v: &Array1<Complex64>) -> f64 {
    v.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use ripple_mesh::{build_mesh, CavityGeometry, HomogeneousCircle, TriangleMetrics};

    #[test]
    fn test_interaction_matrix_has_zero_diagonal() {
        let cavity = HomogeneousCircle::new(1.0, 2.0, 1.0);
        let mesh = build_mesh(&cavity, 25).unwrap();
        let metrics = TriangleMetrics::compute(&mesh);
        let m = assemble_interaction_matrix(&metrics, 1.0, cavity.contrast());

        for i in 0..metrics.num_triangles() {
            assert_eq!(m[[i, i]], Complex64::new(0.0, 0.0));
        }
    }

    #[test]
    fn test_zero_contrast_matrix_is_zero() {
        let cavity = HomogeneousCircle::new(1.0, 1.0, 1.0);
        let mesh = build_mesh(&cavity, 25).unwrap();
        let metrics = TriangleMetrics::compute(&mesh);
        let m = assemble_interaction_matrix(&metrics, 1.0, cavity.contrast());

        for v in m.iter() {
            assert_eq!(*v, Complex64::new(0.0, 0.0));
        }
    }

    #[test]
    fn test_zero_contrast_solution_equals_rhs() {
        // With M = 0 the system is the identity, so x == b exactly.
        let t = 40;
        let m = Array2::<Complex64>::zeros((t, t));
        let system = system_matrix(&m);
        let rhs = Array1::from_vec(
            (0..t)
                .map(|i| Complex64::new(i as f64 * 0.1, -(i as f64) * 0.05))
                .collect(),
        );

        let x = solve_dense(&system, &rhs, 1e-10, 0).unwrap();
        for i in 0..t {
            assert_abs_diff_eq!((x[i] - rhs[i]).norm(), 0.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_solve_complex_system() {
        let system = Array2::from_shape_vec(
            (2, 2),
            vec![
                Complex64::new(1.0, 1.0),
                Complex64::new(2.0, 0.0),
                Complex64::new(0.0, 1.0),
                Complex64::new(3.0, -1.0),
            ],
        )
        .unwrap();
        let rhs = array![Complex64::new(5.0, 1.0), Complex64::new(4.0, 2.0)];

        let x = solve_dense(&system, &rhs, 1e-10, 0).unwrap();
        let check = system.dot(&x);
        for i in 0..2 {
            assert!((check[i] - rhs[i]).norm() < 1e-10);
        }
    }

    #[test]
    fn test_singular_system_is_reported() {
        // Rank-1 matrix: both rows identical.
        let row = [Complex64::new(1.0, 0.0), Complex64::new(2.0, 0.0)];
        let system = Array2::from_shape_vec((2, 2), vec![row[0], row[1], row[0], row[1]]).unwrap();
        let rhs = array![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)];

        assert!(matches!(
            solve_dense(&system, &rhs, 1e-8, 3),
            Err(SolverError::LinearSolve { order: 3, .. })
        ));
    }
}
