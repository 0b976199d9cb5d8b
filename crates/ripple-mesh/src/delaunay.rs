//! Incremental Delaunay triangulation (Bowyer-Watson).
//!
//! The triangulation is used purely as a spatial discretisation of the
//! cavity: each triangle becomes one collocation cell of the integral
//! equation. The algorithm is deterministic for a fixed point order, which
//! the mesh-reproducibility guarantee relies on.

use std::collections::HashMap;

use crate::error::MeshError;

/// A triangle under construction, carrying its circumcircle.
#[derive(Debug, Clone, Copy)]
struct Triangle {
    vertices: [usize; 3],
    circumcentre: [f64; 2],
    circumradius_sq: f64,
}

/// Relative magnitude of the tie-breaking jitter, in units of the point
/// cloud's bounding-box span.
const JITTER_SCALE: f64 = 1e-9;

/// Compute the Delaunay triangulation of a 2D point set.
///
/// Returns index triples into `points`. Fails with
/// [`MeshError::Triangulation`] when fewer than 3 points are supplied,
/// when the points do not span a 2D region (all collinear), or when the
/// produced triangles fail the partition checks in [`validate`].
///
/// All circumcircle tests run on a jittered working copy of the points.
/// Exactly cocircular configurations (a boundary ring sampled on a circle,
/// the corners of a lattice square) otherwise make the strict-inequality
/// circumcircle test inconsistent under rounding, and the carved cavity
/// stops being a simple polygon. The jitter is deterministic per point
/// index and several orders of magnitude below any point spacing, so the
/// returned connectivity is a valid triangulation of the unperturbed
/// input.
pub fn triangulate(points: &[[f64; 2]]) -> Result<Vec<[usize; 3]>, MeshError> {
    if points.len() < 3 {
        return Err(MeshError::Triangulation(format!(
            "need at least 3 points, got {}",
            points.len()
        )));
    }
    if collinear(points) {
        return Err(MeshError::Triangulation(
            "points are collinear; no valid triangles produced".into(),
        ));
    }

    let n = points.len();
    let working = jittered(points);
    let (super_a, super_b, super_c) = super_triangle(&working);

    // Working point list: jittered inputs followed by the three
    // super-triangle vertices.
    let mut all = Vec::with_capacity(n + 3);
    all.extend_from_slice(&working);
    all.push(super_a);
    all.push(super_b);
    all.push(super_c);

    let mut triangles = vec![make_triangle(&all, n, n + 1, n + 2)];

    for point_idx in 0..n {
        insert_point(&all, &mut triangles, point_idx);
    }

    // Strip everything attached to the super-triangle.
    let result: Vec<[usize; 3]> = triangles
        .iter()
        .filter(|t| t.vertices.iter().all(|&v| v < n))
        .map(|t| t.vertices)
        .collect();

    validate(n, &result)?;

    Ok(result)
}

/// True when every point lies on one line (within a span-relative
/// tolerance). Checked on the exact inputs, before any jitter.
fn collinear(points: &[[f64; 2]]) -> bool {
    let p0 = points[0];
    let Some(p1) = points.iter().find(|p| {
        let dx = p[0] - p0[0];
        let dy = p[1] - p0[1];
        dx * dx + dy * dy > 1e-24
    }) else {
        // All points coincident.
        return true;
    };

    let ux = p1[0] - p0[0];
    let uy = p1[1] - p0[1];
    let len = (ux * ux + uy * uy).sqrt();

    points.iter().all(|p| {
        let cross = ux * (p[1] - p0[1]) - uy * (p[0] - p0[0]);
        // |cross| / len is the perpendicular distance from the line.
        cross.abs() < 1e-12 * len.max(1.0)
    })
}

/// A copy of the points with a deterministic per-index offset far below
/// any point spacing but far above circumcircle rounding noise.
fn jittered(points: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    for p in points {
        for c in 0..2 {
            min[c] = min[c].min(p[c]);
            max[c] = max[c].max(p[c]);
        }
    }
    let span = (max[0] - min[0]).max(max[1] - min[1]).max(1.0);
    let scale = span * JITTER_SCALE;

    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            [
                p[0] + scale * unit_hash(2 * i as u64),
                p[1] + scale * unit_hash(2 * i as u64 + 1),
            ]
        })
        .collect()
}

/// SplitMix64 finaliser mapped to [-0.5, 0.5).
fn unit_hash(i: u64) -> f64 {
    let mut z = i.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;
    z as f64 / (u64::MAX as f64 + 1.0) - 0.5
}

/// Check that the triangles form a triangulated disk over all `num_points`
/// vertices: every vertex used, no edge in more than two triangles, and
/// Euler's formula `T + B = 2P - 2` with `B` the number of edges belonging
/// to exactly one triangle. Overlapping or duplicated triangles fail one
/// of these.
fn validate(num_points: usize, triangles: &[[usize; 3]]) -> Result<(), MeshError> {
    let mut edges: HashMap<(usize, usize), u32> = HashMap::new();
    let mut used = vec![false; num_points];

    for t in triangles {
        for &v in t {
            used[v] = true;
        }
        for (a, b) in [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
            *edges.entry((a.min(b), a.max(b))).or_insert(0) += 1;
        }
    }

    if let Some(missing) = used.iter().position(|&u| !u) {
        return Err(MeshError::Triangulation(format!(
            "point {missing} is absent from the triangulation"
        )));
    }

    let mut boundary = 0usize;
    for (&(a, b), &count) in &edges {
        match count {
            1 => boundary += 1,
            2 => {}
            _ => {
                return Err(MeshError::Triangulation(format!(
                    "edge ({a}, {b}) shared by {count} triangles"
                )))
            }
        }
    }

    if triangles.len() + boundary != 2 * num_points - 2 {
        return Err(MeshError::Triangulation(format!(
            "{} triangles and {boundary} boundary edges over {num_points} \
             points violate Euler's formula",
            triangles.len()
        )));
    }

    Ok(())
}

/// A triangle large enough to enclose every input point.
fn super_triangle(points: &[[f64; 2]]) -> ([f64; 2], [f64; 2], [f64; 2]) {
    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    for p in points {
        for c in 0..2 {
            min[c] = min[c].min(p[c]);
            max[c] = max[c].max(p[c]);
        }
    }

    let dx = max[0] - min[0];
    let dy = max[1] - min[1];
    let d = dx.max(dy).max(1.0) * 4.0;
    let mid_x = (min[0] + max[0]) / 2.0;
    let mid_y = (min[1] + max[1]) / 2.0;

    (
        [mid_x - d, mid_y - d],
        [mid_x + d, mid_y - d],
        [mid_x, mid_y + d],
    )
}

/// Insert one point, carving the cavity of invalidated triangles and
/// re-filling it with triangles fanning out from the new point.
fn insert_point(all: &[[f64; 2]], triangles: &mut Vec<Triangle>, point_idx: usize) {
    let p = all[point_idx];

    let bad: Vec<usize> = triangles
        .iter()
        .enumerate()
        .filter(|(_, t)| in_circumcircle(p, t))
        .map(|(i, _)| i)
        .collect();

    // Boundary of the cavity: edges belonging to exactly one bad triangle.
    let mut polygon: Vec<(usize, usize)> = Vec::new();
    for &ti in &bad {
        let t = &triangles[ti];
        for (e0, e1) in [(0, 1), (1, 2), (2, 0)] {
            let edge = (t.vertices[e0], t.vertices[e1]);
            let shared = bad
                .iter()
                .any(|&other| other != ti && has_edge(&triangles[other], edge));
            if !shared {
                polygon.push(edge);
            }
        }
    }

    // Remove in descending index order so earlier indices stay valid.
    for &ti in bad.iter().rev() {
        triangles.swap_remove(ti);
    }

    for (v0, v1) in polygon {
        triangles.push(make_triangle(all, v0, v1, point_idx));
    }
}

fn has_edge(triangle: &Triangle, edge: (usize, usize)) -> bool {
    let v = triangle.vertices;
    for (e0, e1) in [(0, 1), (1, 2), (2, 0)] {
        if (v[e0], v[e1]) == edge || (v[e1], v[e0]) == edge {
            return true;
        }
    }
    false
}

fn in_circumcircle(p: [f64; 2], triangle: &Triangle) -> bool {
    let dx = p[0] - triangle.circumcentre[0];
    let dy = p[1] - triangle.circumcentre[1];
    dx * dx + dy * dy < triangle.circumradius_sq
}

fn make_triangle(all: &[[f64; 2]], i0: usize, i1: usize, i2: usize) -> Triangle {
    let p0 = all[i0];
    let p1 = all[i1];
    let p2 = all[i2];

    let d = 2.0 * (p0[0] * (p1[1] - p2[1]) + p1[0] * (p2[1] - p0[1]) + p2[0] * (p0[1] - p1[1]));

    if d.abs() < 1e-12 {
        // Collinear vertices: an infinite circumcircle marks the triangle
        // invalid for every later insertion, so it gets carved away.
        return Triangle {
            vertices: [i0, i1, i2],
            circumcentre: [0.0, 0.0],
            circumradius_sq: f64::INFINITY,
        };
    }

    let sq0 = p0[0] * p0[0] + p0[1] * p0[1];
    let sq1 = p1[0] * p1[0] + p1[1] * p1[1];
    let sq2 = p2[0] * p2[0] + p2[1] * p2[1];

    let ux = (sq0 * (p1[1] - p2[1]) + sq1 * (p2[1] - p0[1]) + sq2 * (p0[1] - p1[1])) / d;
    let uy = (sq0 * (p2[0] - p1[0]) + sq1 * (p0[0] - p2[0]) + sq2 * (p1[0] - p0[0])) / d;

    let rx = p0[0] - ux;
    let ry = p0[1] - uy;

    Triangle {
        vertices: [i0, i1, i2],
        circumcentre: [ux, uy],
        circumradius_sq: rx * rx + ry * ry,
    }
}
