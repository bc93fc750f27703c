//! Cut planes and the segment/plane, segment/triangle tests the splitter is built on.

use crate::errors::{GeometryError, GeometryResult};
use crate::float_types::{Real, tolerance};
use crate::mesh::triangle::Triangle;
use nalgebra::{Point3, Vector3};

// Plane classification constants
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// Oriented plane `n · p = w` with unit normal `n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal vector of the plane
    pub normal: Vector3<Real>,
    /// Distance from origin along normal
    pub w: Real,
}

impl Plane {
    /// Create a new plane from a (not necessarily unit) normal and offset.
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Self {
        let len = normal.norm();
        Plane {
            normal: normal / len,
            w: w / len,
        }
    }

    /// Plane through three points; the normal follows the right-hand rule
    /// `(p2 - p1) × (p3 - p1)`. Collinear points have no plane.
    pub fn from_points(
        p1: &Point3<Real>,
        p2: &Point3<Real>,
        p3: &Point3<Real>,
    ) -> GeometryResult<Self> {
        let normal = (p2 - p1).cross(&(p3 - p1));
        let len = normal.norm();
        if !len.is_finite() || len <= Real::EPSILON {
            return Err(GeometryError::DegenerateGeometry(format!(
                "points {p1}, {p2}, {p3} do not define a plane"
            )));
        }
        let normal = normal / len;
        Ok(Plane {
            normal,
            w: normal.dot(&p1.coords),
        })
    }

    /// Supporting plane of `triangle`, oriented by its winding.
    pub fn from_triangle(triangle: &Triangle) -> GeometryResult<Self> {
        let [a, b, c] = &triangle.positions;
        Self::from_points(a, b, c)
    }

    /// Axis-aligned plane `p[axis] = value`, normal along `+axis`.
    pub fn axis(axis: usize, value: Real) -> Self {
        let mut normal = Vector3::zeros();
        normal[axis] = 1.0;
        Plane { normal, w: value }
    }

    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    pub const fn offset(&self) -> Real {
        self.w
    }

    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    pub fn flipped(&self) -> Self {
        Plane {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Perpendicular signed distance, positive on the side the normal points to.
    #[inline]
    pub fn signed_distance(&self, point: &Point3<Real>) -> Real {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classify a point as FRONT, BACK or COPLANAR using the crate tolerance.
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let d = self.signed_distance(point);
        let eps = tolerance();
        if d > eps {
            FRONT
        } else if d < -eps {
            BACK
        } else {
            COPLANAR
        }
    }

    /// Fraction `t` along `a → b` where the segment crosses this plane.
    ///
    /// Only strict crossings count: both endpoints must lie off the plane on
    /// opposite sides. Crossings within `dead_zone` (a fraction of the segment)
    /// of either endpoint are ignored.
    pub fn segment_crossing(
        &self,
        a: &Point3<Real>,
        b: &Point3<Real>,
        dead_zone: Real,
    ) -> Option<Real> {
        let (ta, tb) = (self.orient_point(a), self.orient_point(b));
        if (ta | tb) != SPANNING {
            return None;
        }
        let da = self.signed_distance(a);
        let db = self.signed_distance(b);
        let t = da / (da - db);
        if !t.is_finite() || t <= dead_zone || t >= 1.0 - dead_zone {
            return None;
        }
        Some(t)
    }
}

/// Whether the segment `a → b` passes through the finite `triangle`, away from
/// the segment's dead-zone ends. Degenerate triangles are never hit.
pub fn segment_hits_triangle(
    a: &Point3<Real>,
    b: &Point3<Real>,
    triangle: &Triangle,
    dead_zone: Real,
) -> bool {
    let Ok(plane) = Plane::from_triangle(triangle) else {
        return false;
    };
    let Some(t) = plane.segment_crossing(a, b, dead_zone) else {
        return false;
    };
    let hit = a + (b - a) * t;
    point_in_triangle(&hit, triangle, &plane.normal)
}

/// Inclusive inside test for a point already lying in the triangle's plane.
fn point_in_triangle(p: &Point3<Real>, triangle: &Triangle, normal: &Vector3<Real>) -> bool {
    let eps = tolerance();
    let [a, b, c] = &triangle.positions;
    [(a, b), (b, c), (c, a)].iter().all(|(u, v)| {
        let edge = *v - *u;
        let len = edge.norm();
        // distance of p from the edge line, positive toward the interior
        (edge.cross(&(p - *u))).dot(normal) / len >= -eps
    })
}
