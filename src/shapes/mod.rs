//! Closed volumes used as clip and partition regions.

use crate::aabb::Aabb;
use crate::errors::{GeometryError, GeometryResult};
use crate::float_types::Real;
use crate::mesh::triangle::Triangle;
use nalgebra::Point3;

mod extruded;

pub use extruded::ExtrudedLoop;

/// A closed region of space.
///
/// Implementors answer point containment; the ones with a boundary rule also
/// produce a closed triangle mesh of that boundary, wound outward.
pub trait Volume {
    /// Closed containment test: boundary points count as inside.
    fn contains(&self, point: &Point3<Real>) -> bool;

    /// Outward-wound boundary triangles. `compute_normals` fills flat
    /// per-vertex normals; otherwise normals are left absent.
    fn triangulate(&self, compute_normals: bool) -> GeometryResult<Vec<Triangle>> {
        let _ = compute_normals;
        Err(GeometryError::UnsupportedVolume(self.name().to_string()))
    }

    fn name(&self) -> &str {
        core::any::type_name::<Self>()
    }
}

/// Triangulate the boundary of `volume`.
pub fn triangulate<V: Volume + ?Sized>(
    volume: &V,
    compute_normals: bool,
) -> GeometryResult<Vec<Triangle>> {
    volume.triangulate(compute_normals)
}

/// Box faces as corner quads, counter-clockwise seen from outside.
/// Corner indices follow [`Aabb::corners`].
const BOX_FACES: [[usize; 4]; 6] = [
    [0, 2, 3, 1], // -Z
    [4, 5, 7, 6], // +Z
    [0, 1, 5, 4], // -Y
    [2, 6, 7, 3], // +Y
    [0, 4, 6, 2], // -X
    [1, 3, 7, 5], // +X
];

impl Volume for Aabb {
    fn contains(&self, point: &Point3<Real>) -> bool {
        Aabb::contains(self, point)
    }

    /// Twelve triangles, two per face, each face split along its `q0 → q2`
    /// diagonal.
    fn triangulate(&self, compute_normals: bool) -> GeometryResult<Vec<Triangle>> {
        let c = self.corners();
        let mut triangles = Vec::with_capacity(12);
        for [q0, q1, q2, q3] in BOX_FACES {
            triangles.push(Triangle::from_points(c[q0], c[q1], c[q2]));
            triangles.push(Triangle::from_points(c[q0], c[q2], c[q3]));
        }
        if compute_normals {
            triangles.iter_mut().for_each(Triangle::set_flat_normals);
        }
        Ok(triangles)
    }

    fn name(&self) -> &str {
        "Aabb"
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn box_faces_point_outward() {
        let aabb = Aabb::new(Point3::new(-1.0, -2.0, -3.0), Point3::new(1.0, 2.0, 3.0)).unwrap();
        let tris = triangulate(&aabb, true).unwrap();
        assert_eq!(tris.len(), 12);
        for t in &tris {
            let outward = t.centroid() - aabb.center();
            assert!(t.normal().dot(&outward) > 0.0);
            let n = t.normals.expect("normals requested");
            assert!((n[0].norm() - 1.0).abs() < 1e-12);
        }
        let area: Real = tris.iter().map(Triangle::area).sum();
        assert!((area - aabb.surface_area()).abs() < 1e-9);
    }

    #[test]
    fn normals_absent_unless_requested() {
        let aabb = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0)).unwrap();
        let tris = aabb.triangulate(false).unwrap();
        assert!(tris.iter().all(|t| t.normals.is_none()));
        assert_eq!(tris[0].unit_normal(), Some(-Vector3::z()));
    }

    struct Ball;

    impl Volume for Ball {
        fn contains(&self, point: &Point3<Real>) -> bool {
            point.coords.norm() <= 1.0
        }
    }

    #[test]
    fn custom_volume_without_rule_is_unsupported() {
        let err = triangulate(&Ball, false);
        assert!(matches!(err, Err(GeometryError::UnsupportedVolume(name)) if name.contains("Ball")));
    }
}
