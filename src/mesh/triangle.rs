//! `Triangle`: three positions plus optional, all-or-nothing per-vertex attributes.

use crate::aabb::Aabb;
use crate::float_types::Real;
use crate::math;
use crate::mesh::vertex::Vertex;
use nalgebra::{Point3, Vector2, Vector3, Vector4};

/// A triangle with optional per-vertex normal, texture coordinate and color.
///
/// Each attribute is either present for all three vertices or absent; the
/// `Option<[T; 3]>` layout makes a partially filled array unrepresentable.
/// Winding is the order of `positions`; [`Triangle::reverse`] flips it and keeps
/// every attribute array in lockstep.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub positions: [Point3<Real>; 3],
    pub normals: Option<[Vector3<Real>; 3]>,
    pub tex_coords: Option<[Vector2<Real>; 3]>,
    pub colors: Option<[Vector4<Real>; 3]>,
}

impl Triangle {
    pub const fn new(positions: [Point3<Real>; 3]) -> Self {
        Triangle {
            positions,
            normals: None,
            tex_coords: None,
            colors: None,
        }
    }

    pub fn from_points(a: Point3<Real>, b: Point3<Real>, c: Point3<Real>) -> Self {
        Self::new([a, b, c])
    }

    pub fn with_normals(mut self, normals: [Vector3<Real>; 3]) -> Self {
        self.normals = Some(normals);
        self
    }

    pub fn with_tex_coords(mut self, tex_coords: [Vector2<Real>; 3]) -> Self {
        self.tex_coords = Some(tex_coords);
        self
    }

    pub fn with_colors(mut self, colors: [Vector4<Real>; 3]) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Corner `i` (0..3) with its attributes.
    pub fn vertex(&self, i: usize) -> Vertex {
        Vertex {
            pos: self.positions[i],
            normal: self.normals.map(|n| n[i]),
            tex_coord: self.tex_coords.map(|t| t[i]),
            color: self.colors.map(|c| c[i]),
        }
    }

    pub fn vertices(&self) -> [Vertex; 3] {
        [self.vertex(0), self.vertex(1), self.vertex(2)]
    }

    /// Rebuild a triangle from three corners. An attribute is kept only when all
    /// three corners carry it.
    pub fn from_vertices(v: [Vertex; 3]) -> Self {
        fn all<T: Copy>(a: Option<T>, b: Option<T>, c: Option<T>) -> Option<[T; 3]> {
            Some([a?, b?, c?])
        }

        Triangle {
            positions: [v[0].pos, v[1].pos, v[2].pos],
            normals: all(v[0].normal, v[1].normal, v[2].normal),
            tex_coords: all(v[0].tex_coord, v[1].tex_coord, v[2].tex_coord),
            colors: all(v[0].color, v[1].color, v[2].color),
        }
    }

    /// Unnormalized face normal `(p1 - p0) × (p2 - p0)`.
    pub fn normal(&self) -> Vector3<Real> {
        let [a, b, c] = &self.positions;
        math::triangle_normal(a, b, c)
    }

    /// Unit face normal, or `None` for a zero-area (or non-finite) triangle.
    pub fn unit_normal(&self) -> Option<Vector3<Real>> {
        let n = self.normal();
        let len = n.norm();
        if len.is_finite() && len > Real::EPSILON {
            Some(n / len)
        } else {
            None
        }
    }

    pub fn area(&self) -> Real {
        let [a, b, c] = &self.positions;
        math::triangle_area(a, b, c)
    }

    pub fn is_degenerate(&self) -> bool {
        self.unit_normal().is_none()
    }

    pub fn centroid(&self) -> Point3<Real> {
        math::centroid(&self.positions)
    }

    pub fn bounding_box(&self) -> Aabb {
        let [a, b, c] = &self.positions;
        Aabb {
            mins: a.inf(b).inf(c),
            maxs: a.sup(b).sup(c),
        }
    }

    /// Reverse the winding in place by swapping corners 1 and 2 of every array.
    pub fn reverse(&mut self) {
        self.positions.swap(1, 2);
        if let Some(n) = self.normals.as_mut() {
            n.swap(1, 2);
        }
        if let Some(t) = self.tex_coords.as_mut() {
            t.swap(1, 2);
        }
        if let Some(c) = self.colors.as_mut() {
            c.swap(1, 2);
        }
    }

    pub fn reversed(&self) -> Self {
        let mut t = self.clone();
        t.reverse();
        t
    }

    /// Cyclic rotation so that corner `k` becomes corner 0. Winding is unchanged.
    pub fn rotated(&self, k: usize) -> Self {
        let v = self.vertices();
        Self::from_vertices([v[k % 3], v[(k + 1) % 3], v[(k + 2) % 3]])
    }

    pub fn translate(&mut self, offset: Vector3<Real>) {
        for p in &mut self.positions {
            *p += offset;
        }
    }

    /// Replace the normal array with the unit face normal on all three corners.
    /// Degenerate triangles get a zero normal.
    pub fn set_flat_normals(&mut self) {
        let n = self.unit_normal().unwrap_or_else(Vector3::zeros);
        self.normals = Some([n; 3]);
    }
}
