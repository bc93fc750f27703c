//! Struct and functions for working with the `Vertex`s a `Triangle` is made of.

use crate::float_types::Real;
use nalgebra::{Point3, Vector2, Vector3, Vector4};

mod interpolation_methods;

mod vertex_index;
pub use vertex_index::*;

/// One corner of a triangle: a position plus whichever attributes the owning
/// triangle carries.
#[derive(Debug, Clone, PartialEq, Copy)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Option<Vector3<Real>>,
    pub tex_coord: Option<Vector2<Real>>,
    pub color: Option<Vector4<Real>>,
}

impl Vertex {
    /// Create a bare [`Vertex`] with no attributes.
    #[inline]
    pub const fn new(pos: Point3<Real>) -> Self {
        Vertex {
            pos,
            normal: None,
            tex_coord: None,
            color: None,
        }
    }

    pub fn with_normal(mut self, normal: Vector3<Real>) -> Self {
        self.normal = Some(normal);
        self
    }

    pub fn with_tex_coord(mut self, tex_coord: Vector2<Real>) -> Self {
        self.tex_coord = Some(tex_coord);
        self
    }

    pub fn with_color(mut self, color: Vector4<Real>) -> Self {
        self.color = Some(color);
        self
    }

    /// **Mathematical Foundation: Distance Metrics**
    ///
    /// Compute Euclidean distance between vertex positions:
    /// ```text
    /// d(v₁, v₂) = |p₁ - p₂| = √((x₁-x₂)² + (y₁-y₂)² + (z₁-z₂)²)
    /// ```
    pub fn distance_to(&self, other: &Vertex) -> Real {
        (self.pos - other.pos).norm()
    }

    /// Squared Euclidean distance, for comparisons that don't need the root.
    pub fn distance_squared_to(&self, other: &Vertex) -> Real {
        (self.pos - other.pos).norm_squared()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct VertexEpsilon {
    pub position: <Point3<Real> as approx::AbsDiffEq>::Epsilon,
    pub attribute: Real,
}

fn option_abs_diff_eq<T: approx::AbsDiffEq<Epsilon = Real>>(
    a: &Option<T>,
    b: &Option<T>,
    epsilon: Real,
) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.abs_diff_eq(b, epsilon),
        (None, None) => true,
        _ => false,
    }
}

impl approx::AbsDiffEq for Vertex {
    type Epsilon = VertexEpsilon;

    fn default_epsilon() -> Self::Epsilon {
        Self::Epsilon {
            position: <Point3<Real> as approx::AbsDiffEq>::default_epsilon(),
            attribute: <Real as approx::AbsDiffEq>::default_epsilon(),
        }
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        approx::AbsDiffEq::abs_diff_eq(&self.pos, &other.pos, epsilon.position)
            && option_abs_diff_eq(&self.normal, &other.normal, epsilon.attribute)
            && option_abs_diff_eq(&self.tex_coord, &other.tex_coord, epsilon.attribute)
            && option_abs_diff_eq(&self.color, &other.color, epsilon.attribute)
    }
}

impl approx::RelativeEq for Vertex {
    fn default_max_relative() -> Self::Epsilon {
        Self::Epsilon {
            position: <Point3<Real> as approx::RelativeEq>::default_max_relative(),
            attribute: <Real as approx::RelativeEq>::default_max_relative(),
        }
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        fn option_relative_eq<T: approx::RelativeEq<Epsilon = Real>>(
            a: &Option<T>,
            b: &Option<T>,
            epsilon: Real,
            max_relative: Real,
        ) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => a.relative_eq(b, epsilon, max_relative),
                (None, None) => true,
                _ => false,
            }
        }

        approx::RelativeEq::relative_eq(
            &self.pos,
            &other.pos,
            epsilon.position,
            max_relative.position,
        ) && option_relative_eq(&self.normal, &other.normal, epsilon.attribute, max_relative.attribute)
            && option_relative_eq(
                &self.tex_coord,
                &other.tex_coord,
                epsilon.attribute,
                max_relative.attribute,
            )
            && option_relative_eq(&self.color, &other.color, epsilon.attribute, max_relative.attribute)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_vertex_new() {
        let pos = Point3::new(1.0, 2.0, 3.0);
        let v = Vertex::new(pos).with_normal(Vector3::y());
        assert_eq!(v.pos, pos);
        assert_eq!(v.normal, Some(Vector3::y()));
        assert_eq!(v.tex_coord, None);
        assert_eq!(v.color, None);
    }

    #[test]
    fn distance() {
        let v1 = Vertex::new(Point3::new(0.0, 0.0, 0.0));
        let v2 = Vertex::new(Point3::new(3.0, 4.0, 0.0));

        assert!(
            (v1.distance_to(&v2) - 5.0).abs() < 1e-10,
            "Distance should be 5.0 (3-4-5 triangle)"
        );
        assert!(
            (v1.distance_squared_to(&v2) - 25.0).abs() < 1e-10,
            "Squared distance should be 25.0"
        );
    }

    #[test]
    fn attribute_presence_matters_for_equality() {
        let bare = Vertex::new(Point3::origin());
        let coloured = bare.with_color(Vector4::new(1.0, 0.0, 0.0, 1.0));
        assert!(!approx::relative_eq!(bare, coloured));
        assert!(approx::relative_eq!(coloured, coloured));
    }
}
