//! Cylindrical-harmonic decomposition and scattering-matrix extraction.
//!
//! The incident field is decomposed into cylindrical harmonics
//! $J_m(kr)\,e^{im\varphi}$. For each angular order $m$ one dense solve
//! yields the induced field, which is then reduced against the outgoing
//! harmonics of every output order $m'$ to fill one column of the
//! scattering matrix. The per-order solves are data-independent and run on
//! a Rayon worker pool, sharing the mesh metrics and the assembled
//! interaction matrix read-only.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use rayon::prelude::*;
use ripple_mesh::TriangleMetrics;

use crate::error::SolverError;
use crate::solver::{assemble_interaction_matrix, solve_dense, system_matrix};
use crate::special::bessel_j;
use crate::types::{InducedField, ScatteringMatrix, SolverParams};

/// Polar angle of a collocation point, reduced into $[0, 2\pi)$.
fn polar_angle(p: [f64; 2]) -> f64 {
    p[1].atan2(p[0]).rem_euclid(std::f64::consts::TAU)
}

/// The incident field's `m`-th cylindrical harmonic sampled at every
/// collocation point: $b_i = J_m(k |c_i|)\,e^{i m \varphi_i}$.
pub fn incident_field_vector(metrics: &TriangleMetrics, k: f64, m: i32) -> Array1<Complex64> {
    Array1::from_vec(
        metrics
            .centroids
            .iter()
            .map(|&c| {
                let r = (c[0] * c[0] + c[1] * c[1]).sqrt();
                let phi = polar_angle(c);
                bessel_j(m, k * r) * Complex64::new(0.0, m as f64 * phi).exp()
            })
            .collect(),
    )
}

/// Reduce the induced field for incident order `m` into one column of the
/// scattering matrix (output orders $-M_{max} \ldots M_{max}$).
pub fn extract_column(
    metrics: &TriangleMetrics,
    k: f64,
    contrast: f64,
    max_order: i32,
    m: i32,
    induced: &Array1<Complex64>,
) -> Vec<Complex64> {
    let dim = 2 * max_order as usize + 1;
    let mut column = Vec::with_capacity(dim);

    for row in 0..dim {
        let mp = row as i32 - max_order;

        let mut sum = Complex64::new(0.0, 0.0);
        for (h, &c) in metrics.centroids.iter().enumerate() {
            let r = (c[0] * c[0] + c[1] * c[1]).sqrt();
            let phi = polar_angle(c);
            sum += bessel_j(mp, k * r)
                * Complex64::new(0.0, -(mp as f64) * phi).exp()
                * induced[h]
                * metrics.areas[h];
        }

        let mut entry = Complex64::new(0.0, k * k / 2.0) * contrast * sum;
        if mp == m {
            entry += Complex64::new(1.0, 0.0); // identity/background term
        }
        column.push(entry);
    }

    column
}

/// Full output of one scattering computation.
pub struct ScatteringSolution {
    pub matrix: ScatteringMatrix,
    /// Induced fields, one per incident order, ordered
    /// $m = -M_{max} \ldots M_{max}$. Kept so callers can hand the field
    /// magnitudes to an external visualiser.
    pub induced_fields: Vec<InducedField>,
}

/// Compute the full $(2 M_{max}+1)^2$ scattering matrix.
///
/// Assembles the dense interaction system once, then solves one column per
/// angular order in parallel. A failed solve for any order propagates; a
/// silently wrong matrix entry would be worse than a visible failure.
pub fn compute_scattering_matrix(
    metrics: &TriangleMetrics,
    contrast: f64,
    params: &SolverParams,
) -> Result<ScatteringSolution, SolverError> {
    if params.max_order < 0 {
        return Err(SolverError::InvalidParameter(format!(
            "max_order must be non-negative, got {}",
            params.max_order
        )));
    }
    if !(params.wavenumber > 0.0) {
        return Err(SolverError::InvalidParameter(format!(
            "wavenumber must be positive, got {}",
            params.wavenumber
        )));
    }

    let k = params.wavenumber;
    let max_order = params.max_order;
    let dim = 2 * max_order as usize + 1;

    log::debug!(
        "assembling {t}x{t} interaction system (k={k}, contrast={contrast})",
        t = metrics.num_triangles()
    );
    let interaction = assemble_interaction_matrix(metrics, k, contrast);
    let system = system_matrix(&interaction);

    // One task per angular order; each owns its RHS, solve, and column.
    let columns: Vec<(InducedField, Vec<Complex64>)> = (0..dim)
        .into_par_iter()
        .map(|col| {
            let m = col as i32 - max_order;
            let rhs = incident_field_vector(metrics, k, m);
            let induced = solve_dense(&system, &rhs, params.residual_tolerance, m)?;
            let column = extract_column(metrics, k, contrast, max_order, m, &induced);
            Ok((
                InducedField {
                    order: m,
                    values: induced,
                },
                column,
            ))
        })
        .collect::<Result<_, SolverError>>()?;

    let mut entries = Array2::<Complex64>::zeros((dim, dim));
    let mut induced_fields = Vec::with_capacity(dim);
    for (col, (field, column)) in columns.into_iter().enumerate() {
        for (row, value) in column.into_iter().enumerate() {
            entries[[row, col]] = value;
        }
        induced_fields.push(field);
    }

    Ok(ScatteringSolution {
        matrix: ScatteringMatrix { max_order, entries },
        induced_fields,
    })
}
