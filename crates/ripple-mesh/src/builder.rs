//! Mesh construction over the cavity domain.
//!
//! For a target point count $N$ the builder places $n^2$ samples on the
//! cavity boundary ($n = \lfloor\sqrt{N}\rfloor$) and an $n \times n$
//! Cartesian lattice over $[-1,1]^2$ restricted to the open unit disk, then
//! Delaunay-triangulates the combined set. Point generation is fully
//! deterministic: rebuilding with the same inputs yields the same points in
//! the same order.

use crate::delaunay;
use crate::error::MeshError;
use crate::geometry::CavityGeometry;

/// A triangulated discretisation of the cavity region.
///
/// Immutable once built; all solver stages read it shared.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Sample points: boundary ring first, then interior lattice points.
    pub points: Vec<[f64; 2]>,
    /// Triangles as index triples into `points`.
    pub triangles: Vec<[usize; 3]>,
}

impl Mesh {
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// The three vertex coordinates of triangle `index`.
    pub fn triangle_vertices(&self, index: usize) -> [[f64; 2]; 3] {
        let [i, j, k] = self.triangles[index];
        [self.points[i], self.points[j], self.points[k]]
    }
}

/// Build a mesh for the given geometry and target point count.
///
/// # Errors
/// [`MeshError::DegenerateMesh`] when the target count gives fewer than 2
/// points per lattice side; [`MeshError::Triangulation`] when the point set
/// cannot be triangulated.
pub fn build_mesh(geometry: &dyn CavityGeometry, target_points: usize) -> Result<Mesh, MeshError> {
    let side = (target_points as f64).sqrt().floor() as usize;
    if side < 2 {
        return Err(MeshError::DegenerateMesh {
            requested: target_points,
            side,
        });
    }

    let n_boundary = side * side;
    let mut points = Vec::with_capacity(n_boundary + side * side);

    // Boundary samples, equally spaced in angle over the half-open [0, 2π).
    for i in 0..n_boundary {
        let theta = std::f64::consts::TAU * i as f64 / n_boundary as f64;
        let r = geometry.boundary(theta);
        points.push([r * theta.cos(), r * theta.sin()]);
    }

    // Interior lattice over [-1, 1]^2, keeping points strictly inside the
    // unit disk.
    for row in 0..side {
        let x = -1.0 + 2.0 * row as f64 / (side - 1) as f64;
        for col in 0..side {
            let y = -1.0 + 2.0 * col as f64 / (side - 1) as f64;
            if (x * x + y * y).sqrt() < 1.0 {
                points.push([x, y]);
            }
        }
    }

    let triangles = delaunay::triangulate(&points)?;

    Ok(Mesh { points, triangles })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::HomogeneousCircle;

    #[test]
    fn test_build_unit_circle() {
        let cavity = HomogeneousCircle::new(1.0, 2.0, 1.0);
        let mesh = build_mesh(&cavity, 100).unwrap();

        // 10x10 = 100 boundary points plus the lattice points inside the disk.
        assert!(mesh.num_points() > 100);
        assert!(mesh.num_triangles() > mesh.num_points());
    }

    #[test]
    fn test_interior_points_inside_disk() {
        let cavity = HomogeneousCircle::new(1.0, 2.0, 1.0);
        let mesh = build_mesh(&cavity, 100).unwrap();

        for p in &mesh.points[100..] {
            assert!((p[0] * p[0] + p[1] * p[1]).sqrt() < 1.0);
        }
    }

    #[test]
    fn test_boundary_points_on_circle() {
        let cavity = HomogeneousCircle::new(1.0, 2.0, 1.0);
        let mesh = build_mesh(&cavity, 25).unwrap();

        for p in &mesh.points[..25] {
            let r = (p[0] * p[0] + p[1] * p[1]).sqrt();
            assert!((r - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_no_duplicate_boundary_seam() {
        let cavity = HomogeneousCircle::new(1.0, 2.0, 1.0);
        let mesh = build_mesh(&cavity, 25).unwrap();

        // theta runs over [0, 2π): the first and last boundary samples must
        // be distinct points.
        let first = mesh.points[0];
        let last = mesh.points[24];
        assert!((first[0] - last[0]).abs() + (first[1] - last[1]).abs() > 1e-6);
    }

    #[test]
    fn test_mesh_partitions_the_cavity() {
        // The boundary ring is strictly convex, so every ring point is a
        // hull vertex and Euler's formula pins the triangle count exactly.
        // The triangles must also tile the inscribed boundary polygon with
        // no overlap, so their areas sum to its shoelace area.
        let cavity = HomogeneousCircle::new(1.0, 2.0, 1.0);

        for target in [25, 100, 200, 400, 900] {
            let mesh = build_mesh(&cavity, target).unwrap();
            let side = (target as f64).sqrt().floor() as usize;
            let n_boundary = side * side;

            assert_eq!(
                mesh.num_triangles(),
                2 * mesh.num_points() - 2 - n_boundary,
                "triangle count off at N={target}"
            );

            let mut polygon_area = 0.0;
            for i in 0..n_boundary {
                let p = mesh.points[i];
                let q = mesh.points[(i + 1) % n_boundary];
                polygon_area += p[0] * q[1] - q[0] * p[1];
            }
            polygon_area = polygon_area.abs() / 2.0;

            let total: f64 = (0..mesh.num_triangles())
                .map(|t| {
                    let [a, b, c] = mesh.triangle_vertices(t);
                    0.5 * ((b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])).abs()
                })
                .sum();

            assert!(
                (total - polygon_area).abs() < 1e-9,
                "triangle areas sum to {total} but the boundary polygon \
                 encloses {polygon_area} at N={target}"
            );
        }
    }

    #[test]
    fn test_degenerate_target_count() {
        let cavity = HomogeneousCircle::new(1.0, 2.0, 1.0);
        assert!(matches!(
            build_mesh(&cavity, 3),
            Err(MeshError::DegenerateMesh { .. })
        ));
        assert!(matches!(
            build_mesh(&cavity, 0),
            Err(MeshError::DegenerateMesh { .. })
        ));
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let cavity = HomogeneousCircle::new(1.0, 2.0, 1.0);
        let a = build_mesh(&cavity, 200).unwrap();
        let b = build_mesh(&cavity, 200).unwrap();

        assert_eq!(a.num_points(), b.num_points());
        assert_eq!(a.num_triangles(), b.num_triangles());
        assert_eq!(a.triangles, b.triangles);
    }
}
