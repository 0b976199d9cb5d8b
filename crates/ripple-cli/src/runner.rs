//! Job runner: ties together geometry, mesh, solver, and export.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use ripple_core::analytic::reference_coefficients;
use ripple_core::convergence::convergence_study_with;
use ripple_core::scattering::compute_scattering_matrix;
use ripple_core::types::{ConvergenceReport, SolverParams};
use ripple_mesh::{build_mesh, CavityGeometry, HomogeneousCircle, Mesh, TriangleMetrics};

use crate::config::JobConfig;
use crate::export;

fn cavity_from_config(job: &JobConfig) -> HomogeneousCircle {
    HomogeneousCircle::new(job.cavity.radius, job.cavity.n_core, job.cavity.n_outside)
}

fn params_from_config(job: &JobConfig) -> SolverParams {
    SolverParams {
        wavenumber: job.simulation.wavenumber,
        max_order: job.simulation.max_order,
        residual_tolerance: job.simulation.residual_tolerance,
    }
}

fn output_dir(job: &JobConfig, override_dir: &Option<PathBuf>) -> Result<PathBuf> {
    let dir = override_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&job.output.directory));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    Ok(dir)
}

/// Export everything configured for one solved resolution, downgrading any
/// failure to a warning.
fn export_resolution(
    job: &JobConfig,
    dir: &Path,
    target_points: usize,
    mesh: &Mesh,
    metrics: &TriangleMetrics,
    solution: &ripple_core::ScatteringSolution,
) {
    if job.output.save_mesh {
        if let Err(e) = export::write_mesh_json(dir, target_points, mesh, metrics) {
            log::warn!("mesh export failed for N={target_points}: {e:#}");
        }
    }
    if job.output.save_matrix {
        if let Err(e) = export::write_scattering_csv(dir, target_points, &solution.matrix) {
            log::warn!("scattering-matrix export failed for N={target_points}: {e:#}");
        }
    }
    if job.output.save_fields {
        for field in &solution.induced_fields {
            if let Err(e) = export::write_field_csv(dir, target_points, field) {
                log::warn!(
                    "induced-field export failed for N={target_points}, m={}: {e:#}",
                    field.order
                );
            }
        }
    }
}

/// Solve one resolution and report the diagonal error against the analytic
/// reference.
pub fn run_solve(job: &JobConfig, override_dir: &Option<PathBuf>) -> Result<()> {
    let cavity = cavity_from_config(job);
    let params = params_from_config(job);
    let target = job.simulation.points;
    let dir = output_dir(job, override_dir)?;

    println!(
        "Cavity: r0={}, nc={}, no={} (contrast {})",
        cavity.radius,
        cavity.n_core,
        cavity.n_outside,
        cavity.contrast()
    );

    let mesh = build_mesh(&cavity, target).context("mesh generation failed")?;
    let metrics = TriangleMetrics::compute(&mesh);
    println!(
        "Mesh: {} points, {} triangles, mean area {:.4e}",
        mesh.num_points(),
        mesh.num_triangles(),
        metrics.mean_area()
    );

    let solution = compute_scattering_matrix(&metrics, cavity.contrast(), &params)
        .context("scattering solve failed")?;

    println!(
        "Scattering matrix: {dim}x{dim} (orders -{m}..{m})",
        dim = solution.matrix.dim(),
        m = params.max_order
    );
    for (i, s) in solution.matrix.diagonal().iter().enumerate() {
        let m = i as i32 - params.max_order;
        println!("  S[{m},{m}] = {:+.6} {:+.6}i", s.re, s.im);
    }

    // The analytic comparison only holds for the homogeneous circle, which
    // is the sole geometry the CLI currently builds.
    match reference_coefficients(
        cavity.n_core,
        cavity.n_outside,
        params.wavenumber,
        params.max_order,
    ) {
        Ok(reference) => {
            let error = solution
                .matrix
                .diagonal()
                .iter()
                .zip(&reference)
                .map(|(s, r)| (s - r).norm())
                .fold(0.0_f64, f64::max);
            println!("Max diagonal error vs analytic reference: {error:.4e}");
        }
        Err(e) => log::warn!("analytic reference unavailable: {e}"),
    }

    export_resolution(job, &dir, target, &mesh, &metrics, &solution);
    println!("Artefacts written to {}", dir.display());
    Ok(())
}

/// Run the convergence study over the configured mesh sequence.
pub fn run_convergence(job: &JobConfig, override_dir: &Option<PathBuf>) -> Result<ConvergenceReport> {
    let cavity = cavity_from_config(job);
    let params = params_from_config(job);
    let dir = output_dir(job, override_dir)?;
    let sizes = &job.simulation.mesh_sizes;

    println!(
        "Convergence study over {} resolutions: {:?}",
        sizes.len(),
        sizes
    );

    let report = convergence_study_with(&cavity, &params, sizes, |n, mesh, metrics, solution| {
        println!(
            "  N={n}: {} triangles, mean area {:.4e}",
            mesh.num_triangles(),
            metrics.mean_area()
        );
        export_resolution(job, &dir, n, mesh, metrics, solution);
    })
    .context("convergence study failed")?;

    println!(
        "Fitted power law: error ~ (mean area)^{:.3}",
        report.exponent
    );
    for p in &report.points {
        println!(
            "  N={:>5}: mean area {:.4e}, error {:.4e}",
            p.target_points, p.mean_area, p.error
        );
    }

    if let Err(e) = export::write_convergence_csv(&dir, &report) {
        log::warn!("convergence export failed: {e:#}");
    }
    println!("Artefacts written to {}", dir.display());
    Ok(report)
}
