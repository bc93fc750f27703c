//! Clipping a triangle list against an axis-aligned box.

use crate::aabb::Aabb;
use crate::float_types::Real;
use crate::mesh::split::{split_one_edge, split_two_edges};
use crate::mesh::triangle::Triangle;
use nalgebra::Point3;

/// One of the six faces of a box, with its outward direction.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BoxPlane {
    axis: usize,
    bound: Real,
    /// `true` for the `maxs` face (outside is `p[axis] > bound`).
    upper: bool,
}

impl BoxPlane {
    /// Signed distance beyond the face; positive means outside.
    #[inline]
    fn outside_distance(&self, p: &Point3<Real>) -> Real {
        if self.upper {
            p[self.axis] - self.bound
        } else {
            self.bound - p[self.axis]
        }
    }

    /// Point on segment `a → b` at the face, with the face coordinate written
    /// exactly so no residue is left beyond the box.
    fn snapped_crossing(&self, a: &Point3<Real>, b: &Point3<Real>) -> Point3<Real> {
        let da = self.outside_distance(a);
        let db = self.outside_distance(b);
        let mut p = a + (b - a) * (da / (da - db));
        p[self.axis] = self.bound;
        p
    }
}

/// The face most violated by any corner of `tri`, or `None` when all corners
/// are inside the closed box.
fn most_violated_plane(tri: &Triangle, aabb: &Aabb) -> Option<BoxPlane> {
    let mut worst: Option<(BoxPlane, Real)> = None;
    for p in &tri.positions {
        for axis in 0..3 {
            let candidates = [
                (BoxPlane { axis, bound: aabb.mins[axis], upper: false }, aabb.mins[axis] - p[axis]),
                (BoxPlane { axis, bound: aabb.maxs[axis], upper: true }, p[axis] - aabb.maxs[axis]),
            ];
            for (plane, penetration) in candidates {
                if penetration > 0.0 && worst.is_none_or(|(_, w)| penetration > w) {
                    worst = Some((plane, penetration));
                }
            }
        }
    }
    worst.map(|(plane, _)| plane)
}

/// Clip `triangles` to `aabb`.
///
/// Triangles fully inside are kept unchanged, triangles with no area inside are
/// dropped, and straddling triangles are cut down to their inside portion.
/// Each pass cuts against the single most violated face; new vertices are
/// placed exactly on that face and the kept pieces are queued again until no
/// corner lies outside. A piece never violates a face it was already cut
/// against, so every input triangle is revisited at most six times per lineage.
///
/// Triangles with a non-finite corner have no meaningful inside portion and
/// are dropped.
pub fn clip(triangles: &[Triangle], aabb: &Aabb) -> Vec<Triangle> {
    let mut out = Vec::with_capacity(triangles.len());
    let mut stack: Vec<Triangle> = Vec::new();
    let mut dropped = 0usize;
    let mut non_finite = 0usize;

    for tri in triangles {
        if !tri.positions.iter().flat_map(|p| p.iter()).all(|c| c.is_finite()) {
            non_finite += 1;
            continue;
        }
        stack.push(tri.clone());
        while let Some(piece) = stack.pop() {
            let Some(plane) = most_violated_plane(&piece, aabb) else {
                out.push(piece);
                continue;
            };
            let kept = clip_against(&piece, &plane);
            if kept.is_empty() {
                dropped += 1;
                tracing::trace!(axis = plane.axis, upper = plane.upper, "dropped piece outside box");
            }
            // reversed so pieces leave the stack in emission order
            stack.extend(kept.into_iter().rev());
        }
    }

    if non_finite > 0 {
        tracing::warn!(non_finite, "dropped triangles with non-finite corners");
    }
    tracing::debug!(input = triangles.len(), output = out.len(), dropped, "clipped to box");
    out
}

/// Cut `tri` against one face and return the pieces on the inner side.
fn clip_against(tri: &Triangle, plane: &BoxPlane) -> Vec<Triangle> {
    let d: [Real; 3] = core::array::from_fn(|i| plane.outside_distance(&tri.positions[i]));
    let inside: Vec<usize> = (0..3).filter(|&i| d[i] < 0.0).collect();
    let outside: Vec<usize> = (0..3).filter(|&i| d[i] > 0.0).collect();

    match (inside.as_slice(), outside.as_slice()) {
        // nothing strictly inside: at most an edge or a corner touches the box
        ([], _) => Vec::new(),
        ([tip], [_, _]) => {
            let rot = tri.rotated(*tip);
            let p = &rot.positions;
            let p01 = plane.snapped_crossing(&p[0], &p[1]);
            let p02 = plane.snapped_crossing(&p[0], &p[2]);
            let [tip_piece, _, _] = split_two_edges(&rot, &p01, &p02);
            vec![tip_piece]
        },
        ([_, _], [out]) => {
            let rot = tri.rotated(*out);
            let p = &rot.positions;
            let p01 = plane.snapped_crossing(&p[0], &p[1]);
            let p02 = plane.snapped_crossing(&p[0], &p[2]);
            let [_, near, far] = split_two_edges(&rot, &p01, &p02);
            vec![near, far]
        },
        ([inner], [_]) => {
            // the third corner lies exactly on the face: cut the opposite edge only
            let Some(on) = (0..3).find(|&i| d[i] == 0.0) else {
                return Vec::new();
            };
            let rot = tri.rotated(on);
            let p = &rot.positions;
            let m = plane.snapped_crossing(&p[1], &p[2]);
            let [first, second] = split_one_edge(&rot, &m);
            if rot.positions[1] == tri.positions[*inner] {
                vec![first]
            } else {
                vec![second]
            }
        },
        _ => Vec::new(),
    }
}
