//! Per-triangle areas and collocation points.
//!
//! Areas come from Heron's formula. The collocation point of a triangle is
//! NOT the geometric centroid: it is the vertex combination weighted by
//! inverse edge lengths, which is the point the integral-equation kernel is
//! evaluated at. The weighting is part of the numerical contract; replacing
//! it with the plain centroid silently changes every downstream result.

use crate::builder::Mesh;

/// Cached per-triangle quantities, computed once per mesh.
#[derive(Debug, Clone)]
pub struct TriangleMetrics {
    /// Heron areas, one per triangle. Always non-negative.
    pub areas: Vec<f64>,
    /// Collocation points, one per triangle.
    pub centroids: Vec<[f64; 2]>,
}

impl TriangleMetrics {
    /// Compute areas and collocation points for every triangle of `mesh`.
    pub fn compute(mesh: &Mesh) -> Self {
        let n = mesh.num_triangles();
        let mut areas = Vec::with_capacity(n);
        let mut centroids = Vec::with_capacity(n);

        for t in 0..n {
            let [va, vb, vc] = mesh.triangle_vertices(t);

            // Edge opposite each vertex: a = |B-C|, b = |C-A|, c = |A-B|.
            let a = dist(vb, vc);
            let b = dist(vc, va);
            let c = dist(va, vb);

            let s = (a + b + c) / 2.0;
            // Roundoff can push the radicand a hair below zero for slivers.
            areas.push((s * (s - a) * (s - b) * (s - c)).max(0.0).sqrt());

            // Inverse-edge-length weights x = 1/a, y = 1/c, z = 1/b.
            let x = 1.0 / a;
            let y = 1.0 / c;
            let z = 1.0 / b;
            let sum = a * x + b * y + c * z;
            let alpha = a * x / sum;
            let beta = b * y / sum;
            let gamma = c * z / sum;

            centroids.push([
                alpha * va[0] + beta * vb[0] + gamma * vc[0],
                alpha * va[1] + beta * vb[1] + gamma * vc[1],
            ]);
        }

        Self { areas, centroids }
    }

    pub fn num_triangles(&self) -> usize {
        self.areas.len()
    }

    /// Mean triangle area, the resolution measure of the convergence study.
    pub fn mean_area(&self) -> f64 {
        if self.areas.is_empty() {
            return 0.0;
        }
        self.areas.iter().sum::<f64>() / self.areas.len() as f64
    }
}

fn dist(p: [f64; 2], q: [f64; 2]) -> f64 {
    let dx = p[0] - q[0];
    let dy = p[1] - q[1];
    (dx * dx + dy * dy).sqrt()
}
