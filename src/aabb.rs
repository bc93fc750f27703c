use crate::errors::{GeometryError, GeometryResult};
use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// Axis-aligned box, `mins <= maxs` on every axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl Aabb {
    /// Build a box, rejecting non-finite corners and `mins > maxs` on any axis.
    pub fn new(mins: Point3<Real>, maxs: Point3<Real>) -> GeometryResult<Self> {
        if mins.iter().chain(maxs.iter()).any(|c| !c.is_finite()) {
            return Err(GeometryError::InvalidArgument(format!(
                "box corners must be finite, got {mins} / {maxs}"
            )));
        }
        if (0..3).any(|axis| mins[axis] > maxs[axis]) {
            return Err(GeometryError::InvalidArgument(format!(
                "box mins {mins} exceed maxs {maxs}"
            )));
        }
        Ok(Self { mins, maxs })
    }

    /// Tight bounds of `points`; `None` for an empty iterator.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3<Real>>,
    {
        let mut bounds: Option<Self> = None;
        for p in points {
            match bounds.as_mut() {
                None => {
                    bounds = Some(Self { mins: *p, maxs: *p });
                },
                Some(b) => {
                    b.mins = b.mins.inf(p);
                    b.maxs = b.maxs.sup(p);
                },
            }
        }
        bounds
    }

    #[inline]
    pub fn contains(&self, p: &Point3<Real>) -> bool {
        self.contains_with_margin(p, 0.0)
    }

    /// Closed containment test against the box grown by `margin` on every side.
    #[inline]
    pub fn contains_with_margin(&self, p: &Point3<Real>, margin: Real) -> bool {
        (0..3).all(|axis| p[axis] >= self.mins[axis] - margin && p[axis] <= self.maxs[axis] + margin)
    }

    pub fn merge(&self, other: &Self) -> Self {
        Self {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    #[inline]
    pub fn center(&self) -> Point3<Real> {
        nalgebra::center(&self.mins, &self.maxs)
    }

    #[inline]
    pub fn extents(&self) -> Vector3<Real> {
        self.maxs - self.mins
    }

    pub fn surface_area(&self) -> Real {
        let e = self.extents();
        2.0 * (e.x * e.y + e.y * e.z + e.z * e.x)
    }

    pub fn volume(&self) -> Real {
        let e = self.extents();
        e.x * e.y * e.z
    }

    /// The eight corners, bit 0 selecting x, bit 1 y, bit 2 z (`0` = min, `1` = max).
    pub fn corners(&self) -> [Point3<Real>; 8] {
        core::array::from_fn(|i| {
            Point3::new(
                if i & 1 == 0 { self.mins.x } else { self.maxs.x },
                if i & 2 == 0 { self.mins.y } else { self.maxs.y },
                if i & 4 == 0 { self.mins.z } else { self.maxs.z },
            )
        })
    }
}
