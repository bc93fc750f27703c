use crate::{float_types::Real, mesh::vertex::Vertex};

fn lerp_option<T>(a: &Option<T>, b: &Option<T>, t: Real) -> Option<T>
where
    T: Copy + core::ops::Add<Output = T> + core::ops::Sub<Output = T> + core::ops::Mul<Real, Output = T>,
{
    match (a, b) {
        (Some(a), Some(b)) => Some(*a + (*b - *a) * t),
        _ => None,
    }
}

impl Vertex {
    /// **Mathematical Foundation: Linear Interpolation of Every Attribute**
    ///
    /// Compute the linear interpolation between `self` (`t = 0`) and `other` (`t = 1`):
    ///
    /// ## **Interpolation Formula**
    /// For parameter t ∈ [0,1] and any attribute `a` present on both ends:
    /// - **Position**: p(t) = p₀ + t·(p₁ - p₀)
    /// - **Normal / texcoord / color**: a(t) = a₀ + t·(a₁ - a₀)
    ///
    /// An attribute missing on either end is missing on the result, so a
    /// triangle rebuilt from interpolated vertices never carries a partial array.
    ///
    /// **Note**: Normals are linearly interpolated (not spherically) and are not
    /// renormalized; this keeps attribute continuity exact across a cut.
    pub fn interpolate(&self, other: &Vertex, t: Real) -> Vertex {
        Vertex {
            pos: self.pos + (other.pos - self.pos) * t,
            normal: lerp_option(&self.normal, &other.normal, t),
            tex_coord: lerp_option(&self.tex_coord, &other.tex_coord, t),
            color: lerp_option(&self.color, &other.color, t),
        }
    }

    /// Interpolate toward `other` so that the position lands on `point`, which
    /// is assumed to lie on the segment. The ratio comes from Euclidean distances
    /// (see [`crate::math::distance_ratio`]) and is applied to every attribute.
    pub fn interpolate_at(&self, other: &Vertex, point: &nalgebra::Point3<Real>) -> Vertex {
        let ratio = crate::math::distance_ratio(&self.pos, &other.pos, point);
        let mut v = self.interpolate(other, ratio);
        v.pos = *point;
        v
    }
}
