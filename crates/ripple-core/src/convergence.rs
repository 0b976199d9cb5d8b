//! Convergence study: error vs mesh refinement.
//!
//! Runs the full mesh → solve → extract pipeline at a sequence of target
//! point counts, measures the max absolute error of the scattering-matrix
//! diagonal against the analytic circular-cavity reference, and fits a
//! power law through the (mean triangle area, error) pairs. The fitted
//! exponent is diagnostic output only; it never feeds back into the solver.

use ripple_mesh::{build_mesh, CavityGeometry, HomogeneousCircle, Mesh, TriangleMetrics};

use crate::analytic::reference_coefficients;
use crate::error::SolverError;
use crate::scattering::{compute_scattering_matrix, ScatteringSolution};
use crate::types::{ConvergencePoint, ConvergenceReport, SolverParams};

/// Run the convergence study over `mesh_sizes`, invoking `observe` with the
/// artefacts of every resolution (mesh, metrics, solution) so a caller can
/// hand them to an external visualiser. Observer failures are the caller's
/// business; a solve failure at any resolution propagates instead of being
/// papered over with a default.
pub fn convergence_study_with<F>(
    cavity: &HomogeneousCircle,
    params: &SolverParams,
    mesh_sizes: &[usize],
    mut observe: F,
) -> Result<ConvergenceReport, SolverError>
where
    F: FnMut(usize, &Mesh, &TriangleMetrics, &ScatteringSolution),
{
    if mesh_sizes.len() < 2 {
        return Err(SolverError::InvalidParameter(format!(
            "convergence study needs at least 2 mesh sizes, got {}",
            mesh_sizes.len()
        )));
    }

    let reference = reference_coefficients(
        cavity.n_core,
        cavity.n_outside,
        params.wavenumber,
        params.max_order,
    )?;

    let mut points = Vec::with_capacity(mesh_sizes.len());
    for &target in mesh_sizes {
        let mesh = build_mesh(cavity, target)?;
        let metrics = TriangleMetrics::compute(&mesh);
        let solution = compute_scattering_matrix(&metrics, cavity.contrast(), params)?;

        let error = solution
            .matrix
            .diagonal()
            .iter()
            .zip(&reference)
            .map(|(s, r)| (s - r).norm())
            .fold(0.0_f64, f64::max);

        log::info!(
            "N={target}: {} triangles, mean area {:.4e}, diagonal error {error:.4e}",
            mesh.num_triangles(),
            metrics.mean_area()
        );

        observe(target, &mesh, &metrics, &solution);

        points.push(ConvergencePoint {
            target_points: target,
            mean_area: metrics.mean_area(),
            error,
        });
    }

    let (exponent, intercept) = fit_power_law(&points)?;
    Ok(ConvergenceReport {
        points,
        exponent,
        intercept,
    })
}

/// Run the convergence study without observing per-resolution artefacts.
pub fn convergence_study(
    cavity: &HomogeneousCircle,
    params: &SolverParams,
    mesh_sizes: &[usize],
) -> Result<ConvergenceReport, SolverError> {
    convergence_study_with(cavity, params, mesh_sizes, |_, _, _, _| {})
}

/// Least-squares line through (log mean area, log error): returns
/// (slope, intercept) of $\log e = \alpha \log A + \beta$.
///
/// Fails with [`SolverError::InvalidParameter`] when any error or mean
/// area is zero, negative, or non-finite (e.g. a zero-contrast study hits
/// the reference exactly), since the logs would poison the fit.
pub fn fit_power_law(points: &[ConvergencePoint]) -> Result<(f64, f64), SolverError> {
    for p in points {
        if !(p.error > 0.0 && p.error.is_finite()) {
            return Err(SolverError::InvalidParameter(format!(
                "convergence error {} at N={} admits no power-law fit",
                p.error, p.target_points
            )));
        }
        if !(p.mean_area > 0.0 && p.mean_area.is_finite()) {
            return Err(SolverError::InvalidParameter(format!(
                "mean triangle area {} at N={} admits no power-law fit",
                p.mean_area, p.target_points
            )));
        }
    }

    let n = points.len() as f64;
    let xs: Vec<f64> = points.iter().map(|p| p.mean_area.ln()).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.error.ln()).collect();

    let x_mean = xs.iter().sum::<f64>() / n;
    let y_mean = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var = 0.0;
    for (x, y) in xs.iter().zip(&ys) {
        cov += (x - x_mean) * (y - y_mean);
        var += (x - x_mean) * (x - x_mean);
    }

    if var == 0.0 {
        return Err(SolverError::InvalidParameter(
            "all resolutions share one mean triangle area; slope is undefined".into(),
        ));
    }

    let slope = cov / var;
    Ok((slope, y_mean - slope * x_mean))
}
