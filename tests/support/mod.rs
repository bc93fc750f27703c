//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use meshcut::{Aabb, Triangle, float_types::Real};
use nalgebra::Point3;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Helper to make a bare triangle from three `[x, y, z]` corners.
pub fn tri(a: [Real; 3], b: [Real; 3], c: [Real; 3]) -> Triangle {
    Triangle::from_points(
        Point3::new(a[0], a[1], a[2]),
        Point3::new(b[0], b[1], b[2]),
        Point3::new(c[0], c[1], c[2]),
    )
}

pub fn total_area(triangles: &[Triangle]) -> Real {
    triangles.iter().map(Triangle::area).sum()
}

pub fn aabb(mins: [Real; 3], maxs: [Real; 3]) -> Aabb {
    Aabb::new(Point3::from(mins), Point3::from(maxs)).expect("valid test box")
}

/// Closed, outward-wound surface of `aabb` with every triangle split into four
/// `levels` times, so the box has plenty of shared edges to walk.
pub fn tessellated_box(aabb: &Aabb, levels: usize) -> Vec<Triangle> {
    use meshcut::Volume;
    let mut out = aabb.triangulate(false).expect("boxes triangulate");
    for _ in 0..levels {
        out = out.iter().flat_map(subdivide).collect();
    }
    out
}

/// Midpoint subdivision into four triangles with the same winding.
fn subdivide(t: &Triangle) -> [Triangle; 4] {
    let [a, b, c] = t.positions;
    let ab = nalgebra::center(&a, &b);
    let bc = nalgebra::center(&b, &c);
    let ca = nalgebra::center(&c, &a);
    [
        Triangle::from_points(a, ab, ca),
        Triangle::from_points(ab, b, bc),
        Triangle::from_points(ca, bc, c),
        Triangle::from_points(ab, bc, ca),
    ]
}

/// Flat `cells` x `cells` unit grid at z = 0, two up-facing triangles per cell.
pub fn flat_grid(cells: usize) -> Vec<Triangle> {
    let mut out = Vec::with_capacity(cells * cells * 2);
    for j in 0..cells {
        for i in 0..cells {
            let (x, y) = (i as Real, j as Real);
            out.push(tri([x, y, 0.0], [x + 1.0, y, 0.0], [x + 1.0, y + 1.0, 0.0]));
            out.push(tri([x, y, 0.0], [x + 1.0, y + 1.0, 0.0], [x, y + 1.0, 0.0]));
        }
    }
    out
}
