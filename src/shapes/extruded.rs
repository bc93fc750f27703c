use crate::errors::{GeometryError, GeometryResult};
use crate::float_types::{Real, TAU};
use crate::mesh::triangle::Triangle;
use crate::shapes::Volume;
use geo::{Contains, Coord, Intersects, LineString, Polygon};
use nalgebra::Point3;

/// A 2D polygon loop in the XY plane swept from `min_z` to `max_z`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrudedLoop {
    xs: Vec<Real>,
    ys: Vec<Real>,
    min_z: Real,
    max_z: Real,
    clockwise: bool,
    footprint: Polygon<Real>,
}

impl ExtrudedLoop {
    /// `xs[i], ys[i]` is loop point `i`; `clockwise` states the loop's
    /// orientation seen from +Z. The loop is implicitly closed.
    pub fn new(
        xs: Vec<Real>,
        ys: Vec<Real>,
        min_z: Real,
        max_z: Real,
        clockwise: bool,
    ) -> GeometryResult<Self> {
        if xs.len() != ys.len() {
            return Err(GeometryError::InvalidArgument(format!(
                "loop has {} x and {} y coordinates",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 3 {
            return Err(GeometryError::InvalidArgument(format!(
                "loop needs at least 3 points, got {}",
                xs.len()
            )));
        }
        if !xs.iter().chain(&ys).chain([&min_z, &max_z]).all(|v| v.is_finite()) {
            return Err(GeometryError::InvalidArgument(
                "loop coordinates must be finite".to_string(),
            ));
        }
        if min_z > max_z {
            return Err(GeometryError::InvalidArgument(format!(
                "min_z {min_z} exceeds max_z {max_z}"
            )));
        }

        let ring: Vec<Coord<Real>> = xs.iter().zip(&ys).map(|(&x, &y)| Coord { x, y }).collect();
        let footprint = Polygon::new(LineString::new(ring), vec![]);
        Ok(Self { xs, ys, min_z, max_z, clockwise, footprint })
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub const fn z_range(&self) -> (Real, Real) {
        (self.min_z, self.max_z)
    }

    pub const fn is_clockwise(&self) -> bool {
        self.clockwise
    }

    fn point(&self, i: usize, z: Real) -> Point3<Real> {
        Point3::new(self.xs[i], self.ys[i], z)
    }

    /// **Ear clipping by smallest interior angle**
    ///
    /// Repeatedly cuts off the vertex with the smallest interior angle until a
    /// single triangle remains. Reflex vertices measure `2π - θ`; a NaN angle
    /// (repeated or collinear points) ranks lowest, so such vertices go first.
    /// Ties keep the earliest vertex.
    ///
    /// Returns loop index triples in loop order. O(n²) and only sound for
    /// simple, reasonably convex loops.
    fn ear_clip(&self) -> Vec<[usize; 3]> {
        let mut ring: Vec<usize> = (0..self.len()).collect();
        let mut ears = Vec::with_capacity(self.len().saturating_sub(2));

        while ring.len() > 3 {
            let m = ring.len();
            let mut best = 0;
            let mut best_angle = Real::INFINITY;
            for k in 0..m {
                let angle = self.interior_angle(ring[(k + m - 1) % m], ring[k], ring[(k + 1) % m]);
                if angle < best_angle {
                    best = k;
                    best_angle = angle;
                }
            }
            ears.push([ring[(best + m - 1) % m], ring[best], ring[(best + 1) % m]]);
            ring.remove(best);
        }
        ears.push([ring[0], ring[1], ring[2]]);
        ears
    }

    fn interior_angle(&self, prev: usize, cur: usize, next: usize) -> Real {
        let (px, py) = (self.xs[prev] - self.xs[cur], self.ys[prev] - self.ys[cur]);
        let (nx, ny) = (self.xs[next] - self.xs[cur], self.ys[next] - self.ys[cur]);
        let cos = (px * nx + py * ny) / ((px * px + py * py).sqrt() * (nx * nx + ny * ny).sqrt());
        let angle = cos.clamp(-1.0, 1.0).acos();
        if angle.is_nan() {
            return Real::NEG_INFINITY;
        }
        // turn direction of prev → cur → next; convex turns follow the loop
        let turn = -px * ny + py * nx;
        let reflex = if self.clockwise { turn > 0.0 } else { turn < 0.0 };
        if reflex { TAU - angle } else { angle }
    }
}

impl Volume for ExtrudedLoop {
    fn contains(&self, point: &Point3<Real>) -> bool {
        if point.z < self.min_z || point.z > self.max_z {
            return false;
        }
        let p = geo::Point::new(point.x, point.y);
        self.footprint.contains(&p) || self.footprint.intersects(&p)
    }

    /// Bottom cap facing -Z, top cap facing +Z, then two triangles per loop
    /// edge: `2 * (n - 2) + 2 * n` triangles in total.
    fn triangulate(&self, compute_normals: bool) -> GeometryResult<Vec<Triangle>> {
        let n = self.len();
        let ears = self.ear_clip();
        let mut triangles = Vec::with_capacity(2 * (n - 2) + 2 * n);

        let bottom: Vec<Triangle> = ears
            .iter()
            .map(|&[a, b, c]| {
                let t = Triangle::from_points(
                    self.point(a, self.min_z),
                    self.point(b, self.min_z),
                    self.point(c, self.min_z),
                );
                // a counter-clockwise ear faces +Z
                if self.clockwise { t } else { t.reversed() }
            })
            .collect();
        let top: Vec<Triangle> = bottom
            .iter()
            .map(|t| {
                let mut mirrored = t.reversed();
                for p in &mut mirrored.positions {
                    p.z = self.max_z;
                }
                mirrored
            })
            .collect();
        triangles.extend(bottom);
        triangles.extend(top);

        for i in 0..n {
            let j = (i + 1) % n;
            let (ib, jb) = (self.point(i, self.min_z), self.point(j, self.min_z));
            let (it, jt) = (self.point(i, self.max_z), self.point(j, self.max_z));
            let first = Triangle::from_points(ib, jb, jt);
            let second = Triangle::from_points(ib, jt, it);
            if self.clockwise {
                triangles.push(first.reversed());
                triangles.push(second.reversed());
            } else {
                triangles.push(first);
                triangles.push(second);
            }
        }

        if compute_normals {
            triangles.iter_mut().for_each(Triangle::set_flat_normals);
        }
        Ok(triangles)
    }

    fn name(&self) -> &str {
        "ExtrudedLoop"
    }
}
