//! Exact splitting of a triangle by the plane of another triangle.
//!
//! A split never changes winding and never loses area: the pieces tile the
//! input triangle exactly (up to floating point). Every derived vertex carries
//! the interpolated normal, texture coordinate and color of the cut edge.

use crate::errors::{GeometryError, GeometryResult};
use crate::float_types::{DEFAULT_EDGE_TOLERANCE, Real};
use crate::mesh::plane::{Plane, segment_hits_triangle};
use crate::mesh::triangle::Triangle;
use nalgebra::Point3;

/// Fraction of an edge, from either endpoint, in which a crossing is ignored.
///
/// Valid values are finite and lie in `[0, 0.5)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct EdgeTolerance(Real);

impl EdgeTolerance {
    pub fn new(fraction: Real) -> GeometryResult<Self> {
        if !fraction.is_finite() || !(0.0..0.5).contains(&fraction) {
            return Err(GeometryError::InvalidArgument(format!(
                "edge tolerance must lie in [0, 0.5), got {fraction}"
            )));
        }
        Ok(Self(fraction))
    }

    pub const fn get(&self) -> Real {
        self.0
    }
}

impl Default for EdgeTolerance {
    fn default() -> Self {
        Self(DEFAULT_EDGE_TOLERANCE)
    }
}

/// Split `tri` by the plane through `cut`.
///
/// The two triangles must touch: an edge of `tri` has to pass through `cut`,
/// or an edge of `cut` through `tri`. The split itself is then made against the
/// infinite plane of `cut`, so the whole of `tri` is divided.
///
/// Returns two triangles when a single edge of `tri` is crossed (the opposite
/// corner lies on the plane), three when two edges are crossed, and `None` when
/// the triangles don't touch, `cut` is degenerate, or every crossing falls in
/// the dead zone.
pub fn split(tri: &Triangle, cut: &Triangle, tolerance: EdgeTolerance) -> Option<Vec<Triangle>> {
    if !triangles_touch(tri, cut, tolerance.get()) {
        return None;
    }
    let plane = Plane::from_triangle(cut).ok()?;
    split_by_plane(tri, &plane, tolerance)
}

/// Split every triangle of `triangles` by `cut`, keeping unsplit ones as they are.
pub fn split_all(triangles: &[Triangle], cut: &Triangle, tolerance: EdgeTolerance) -> Vec<Triangle> {
    let mut out = Vec::with_capacity(triangles.len());
    for tri in triangles {
        match split(tri, cut, tolerance) {
            Some(pieces) => out.extend(pieces),
            None => out.push(tri.clone()),
        }
    }
    out
}

/// Split `tri` by an infinite `plane`; see [`split`] for the result shape.
pub fn split_by_plane(
    tri: &Triangle,
    plane: &Plane,
    tolerance: EdgeTolerance,
) -> Option<Vec<Triangle>> {
    let p = &tri.positions;
    let crossed: [bool; 3] = core::array::from_fn(|i| {
        plane
            .segment_crossing(&p[i], &p[(i + 1) % 3], tolerance.get())
            .is_some()
    });

    match crossed.iter().filter(|c| **c).count() {
        1 => {
            // edge i → i+1 is crossed; the corner opposite it stays whole
            let edge = crossed.iter().position(|c| *c)?;
            let rot = tri.rotated((edge + 2) % 3);
            let point = crossing_point(plane, &rot.positions[1], &rot.positions[2]);
            Some(split_one_edge(&rot, &point).to_vec())
        },
        2 => {
            // the corner shared by both crossed edges is the tip
            let uncrossed = crossed.iter().position(|c| !*c)?;
            let rot = tri.rotated((uncrossed + 2) % 3);
            let p01 = crossing_point(plane, &rot.positions[0], &rot.positions[1]);
            let p02 = crossing_point(plane, &rot.positions[0], &rot.positions[2]);
            Some(split_two_edges(&rot, &p01, &p02).to_vec())
        },
        _ => None,
    }
}

/// **Single-edge split.**
///
/// Corner 0 is held fixed; edge 1 → 2 is cut at `point`. The two halves fan
/// around the new vertex:
/// ```text
/// (v0, v1, m), (v0, m, v2)
/// ```
pub fn split_one_edge(tri: &Triangle, point: &Point3<Real>) -> [Triangle; 2] {
    let [v0, v1, v2] = tri.vertices();
    let m = v1.interpolate_at(&v2, point);
    [
        Triangle::from_vertices([v0, v1, m]),
        Triangle::from_vertices([v0, m, v2]),
    ]
}

/// **Two-edge split.**
///
/// Corner 0 is the tip; edge 0 → 1 is cut at `p01` and edge 0 → 2 at `p02`.
/// Returns the tip triangle first, then the two triangles filling the
/// remaining quad, whose diagonal always runs from `p01` to `v2`:
/// ```text
/// (v0, a, b), (a, v1, v2), (a, v2, b)
/// ```
pub fn split_two_edges(tri: &Triangle, p01: &Point3<Real>, p02: &Point3<Real>) -> [Triangle; 3] {
    let [v0, v1, v2] = tri.vertices();
    let a = v0.interpolate_at(&v1, p01);
    let b = v0.interpolate_at(&v2, p02);
    [
        Triangle::from_vertices([v0, a, b]),
        Triangle::from_vertices([a, v1, v2]),
        Triangle::from_vertices([a, v2, b]),
    ]
}

/// Point where segment `a → b` meets `plane`. The caller guarantees the
/// endpoints lie on opposite sides.
pub(crate) fn crossing_point(plane: &Plane, a: &Point3<Real>, b: &Point3<Real>) -> Point3<Real> {
    let da = plane.signed_distance(a);
    let db = plane.signed_distance(b);
    a + (b - a) * (da / (da - db))
}

fn triangles_touch(tri: &Triangle, cut: &Triangle, dead_zone: Real) -> bool {
    fn edge_hits(from: &Triangle, into: &Triangle, dead_zone: Real) -> bool {
        let p = &from.positions;
        (0..3).any(|i| segment_hits_triangle(&p[i], &p[(i + 1) % 3], into, dead_zone))
    }
    edge_hits(tri, cut, dead_zone) || edge_hits(cut, tri, dead_zone)
}
