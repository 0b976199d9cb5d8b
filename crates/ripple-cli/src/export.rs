//! Data-file export: the interface to external visualisation.
//!
//! The solver itself never plots; it writes plain data artefacts keyed by
//! the point-count parameter (`mesh-{N}.json`, `field-{N}-m{m}.csv`,
//! `scattering-{N}.csv`, `convergence.csv`) for an external tool to render.
//! Callers treat export failures as warnings: a failed figure must never
//! invalidate a finished numerical result.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use ripple_core::types::{ConvergenceReport, InducedField, ScatteringMatrix};
use ripple_mesh::{Mesh, TriangleMetrics};

/// Write the mesh, collocation points, and areas as JSON.
pub fn write_mesh_json(
    dir: &Path,
    target_points: usize,
    mesh: &Mesh,
    metrics: &TriangleMetrics,
) -> Result<()> {
    let path = dir.join(format!("mesh-{target_points}.json"));
    let value = serde_json::json!({
        "target_points": target_points,
        "points": mesh.points,
        "triangles": mesh.triangles,
        "centroids": metrics.centroids,
        "areas": metrics.areas,
    });
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer(file, &value).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Write one induced field (per-triangle magnitude and phase) as CSV.
pub fn write_field_csv(dir: &Path, target_points: usize, field: &InducedField) -> Result<()> {
    let path = dir.join(format!("field-{target_points}-m{}.csv", field.order));
    let mut file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;

    writeln!(file, "triangle,re,im,abs")?;
    for (h, v) in field.values.iter().enumerate() {
        writeln!(file, "{h},{:.12e},{:.12e},{:.12e}", v.re, v.im, v.norm())?;
    }
    Ok(())
}

/// Write the scattering matrix as CSV, one entry per row.
pub fn write_scattering_csv(
    dir: &Path,
    target_points: usize,
    matrix: &ScatteringMatrix,
) -> Result<()> {
    let path = dir.join(format!("scattering-{target_points}.csv"));
    let mut file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;

    writeln!(file, "mp,m,re,im")?;
    for mp in -matrix.max_order..=matrix.max_order {
        for m in -matrix.max_order..=matrix.max_order {
            let s = matrix.entry(mp, m);
            writeln!(file, "{mp},{m},{:.12e},{:.12e}", s.re, s.im)?;
        }
    }
    Ok(())
}

/// Write the convergence study (points plus fitted power law) as CSV.
pub fn write_convergence_csv(dir: &Path, report: &ConvergenceReport) -> Result<()> {
    let path = dir.join("convergence.csv");
    let mut file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;

    writeln!(file, "# fitted: log(error) = {:.6} * log(mean_area) + {:.6}",
        report.exponent, report.intercept)?;
    writeln!(file, "target_points,mean_area,error")?;
    for p in &report.points {
        writeln!(
            file,
            "{},{:.12e},{:.12e}",
            p.target_points, p.mean_area, p.error
        )?;
    }
    Ok(())
}
