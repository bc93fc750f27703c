//! Stateless vector helpers shared by the splitter, clipper and orientation pass.

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// Unnormalized right-hand-rule normal `(b - a) × (c - a)`.
#[inline]
pub fn triangle_normal(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Vector3<Real> {
    (b - a).cross(&(c - a))
}

/// Area of the triangle `a, b, c`.
#[inline]
pub fn triangle_area(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Real {
    0.5 * triangle_normal(a, b, c).norm()
}

/// **Mathematical Foundation: Perpendicular Distance to a Plane**
///
/// For the plane through `a, b, c` with normal `n = (b - a) × (c - a)`:
/// ```text
/// d(p) = n · (p - a) / |n|
/// ```
/// Positive when `p` lies on the side `n` points to. A degenerate plane
/// (collinear points) yields NaN; callers decide how to treat it.
pub fn signed_distance_to_plane(
    point: &Point3<Real>,
    a: &Point3<Real>,
    b: &Point3<Real>,
    c: &Point3<Real>,
) -> Real {
    let n = triangle_normal(a, b, c);
    n.dot(&(point - a)) / n.norm()
}

/// Arithmetic mean of `points`, or the origin for an empty slice.
pub fn centroid(points: &[Point3<Real>]) -> Point3<Real> {
    if points.is_empty() {
        return Point3::origin();
    }
    let sum: Vector3<Real> = points.iter().map(|p| p.coords).sum();
    Point3::from(sum / points.len() as Real)
}

/// Interpolation ratio of `p` between `a` (`0`) and `b` (`1`), measured with
/// Euclidean distances instead of a parametric line coordinate:
/// ```text
/// r = |p - a| / (|p - a| + |p - b|)
/// ```
/// Coincident endpoints give `0`.
pub fn distance_ratio(a: &Point3<Real>, b: &Point3<Real>, p: &Point3<Real>) -> Real {
    let da = (p - a).norm();
    let db = (p - b).norm();
    let total = da + db;
    if total <= Real::EPSILON {
        0.0
    } else {
        da / total
    }
}

#[inline]
pub fn lerp_point(a: &Point3<Real>, b: &Point3<Real>, t: Real) -> Point3<Real> {
    a + (b - a) * t
}
