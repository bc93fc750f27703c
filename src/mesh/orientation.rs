//! Consistent winding across connected mesh components.
//!
//! Triangles are tracked by their index in the input slice (an arena handle),
//! never by value: two geometrically equal triangles stay distinct.
//! Adjacency is defined by shared vertex *labels*, so coincident corners must be
//! welded first. [`correct_orientation`] does that with the vertex index;
//! [`correct_orientation_indexed`] takes caller-supplied labels.

use crate::errors::{GeometryError, GeometryResult};
use crate::float_types::{Real, tolerance};
use crate::math;
use crate::mesh::manifold::{directed_edges, has_repeated_label, undirected};
use crate::mesh::triangle::Triangle;
use crate::mesh::vertex::VertexIndex;
use hashbrown::HashMap;
use nalgebra::Point3;
use std::collections::VecDeque;

/// What an orientation pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrientationReport {
    /// Connected components visited
    pub components: usize,
    /// Triangles whose winding was reversed
    pub flipped: usize,
    /// Degenerate triangles that did not take part in the direction vote
    pub abstained: usize,
}

/// Weld `triangles` with the default tolerance, then make the winding of every
/// connected component consistent and facing away from `reference_point`.
pub fn correct_orientation(
    triangles: &mut [Triangle],
    reference_point: &Point3<Real>,
) -> GeometryResult<OrientationReport> {
    let (_, labels) = VertexIndex::build(triangles, tolerance())?;
    correct_orientation_indexed(triangles, &labels, reference_point)
}

/// **Flood-Fill Winding Propagation**
///
/// `labels` holds one welded vertex-label triple per triangle. For every
/// connected component (shared undirected edge = adjacent):
///
/// 1. The seed, the lowest unvisited index, is flipped if `reference_point`
///    lies in front of it, so the reference starts behind the seed.
/// 2. Breadth-first expansion: a neighbour walking a shared edge in the same
///    direction as the current triangle is flipped, one walking it in the
///    opposite direction is already consistent.
/// 3. Majority vote: a triangle is "away" if its normal points away from the
///    reference point. If fewer than half of the voting triangles are away, the
///    whole component is flipped. Degenerate triangles abstain.
///
/// Adjacency comes from an edge map built once, so the pass is linear in the
/// number of triangles apart from hashing. On a non-manifold edge the first
/// neighbour reached decides; later ones are oriented from their own other edges
/// when possible.
pub fn correct_orientation_indexed(
    triangles: &mut [Triangle],
    labels: &[[usize; 3]],
    reference_point: &Point3<Real>,
) -> GeometryResult<OrientationReport> {
    if labels.len() != triangles.len() {
        return Err(GeometryError::InvalidArgument(format!(
            "{} label triples for {} triangles",
            labels.len(),
            triangles.len()
        )));
    }
    if !reference_point.iter().all(|c| c.is_finite()) {
        return Err(GeometryError::InvalidArgument(format!(
            "reference point {reference_point} is not finite"
        )));
    }

    let mut edge_map: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
    for (i, l) in labels.iter().enumerate() {
        if has_repeated_label(l) {
            continue;
        }
        for (a, b) in directed_edges(l) {
            edge_map.entry(undirected(a, b)).or_default().push(i);
        }
    }
    let non_manifold = edge_map.values().filter(|tris| tris.len() > 2).count();
    if non_manifold > 0 {
        tracing::warn!(non_manifold, "non-manifold edges; winding may be ambiguous");
    }

    let n = triangles.len();
    let mut flip = vec![false; n];
    let mut visited = vec![false; n];
    let mut report = OrientationReport::default();
    let mut queue = VecDeque::new();

    for seed in 0..n {
        if visited[seed] {
            continue;
        }
        report.components += 1;
        visited[seed] = true;

        let [a, b, c] = &triangles[seed].positions;
        if math::signed_distance_to_plane(reference_point, a, b, c) > 0.0 {
            flip[seed] = true;
        }

        let mut component = vec![seed];
        queue.push_back(seed);
        while let Some(current) = queue.pop_front() {
            // collapsed triangles stay alone
            if has_repeated_label(&labels[current]) {
                continue;
            }
            for (a, b) in directed_edges(&effective(&labels[current], flip[current])) {
                let Some(neighbours) = edge_map.get(&undirected(a, b)) else {
                    continue;
                };
                for &nb in neighbours {
                    if visited[nb] {
                        continue;
                    }
                    visited[nb] = true;
                    flip[nb] = directed_edges(&labels[nb]).contains(&(a, b));
                    component.push(nb);
                    queue.push_back(nb);
                }
            }
        }

        let (mut away, mut voters) = (0usize, 0usize);
        for &t in &component {
            let tri = &triangles[t];
            let Some(normal) = tri.unit_normal() else {
                report.abstained += 1;
                continue;
            };
            let normal = if flip[t] { -normal } else { normal };
            voters += 1;
            if normal.dot(&(tri.centroid() - *reference_point)) > 0.0 {
                away += 1;
            }
        }
        if away * 2 < voters {
            for &t in &component {
                flip[t] = !flip[t];
            }
        }
    }

    for (tri, _) in triangles.iter_mut().zip(&flip).filter(|(_, f)| **f) {
        tri.reverse();
        report.flipped += 1;
    }

    if report.abstained > 0 {
        tracing::warn!(
            abstained = report.abstained,
            "degenerate triangles skipped the orientation vote"
        );
    }
    tracing::debug!(
        triangles = n,
        components = report.components,
        flipped = report.flipped,
        "corrected orientation"
    );
    Ok(report)
}

/// Label order after an optional reversal (corners 1 and 2 swapped, matching
/// [`Triangle::reverse`]).
#[inline]
fn effective(labels: &[usize; 3], flipped: bool) -> [usize; 3] {
    if flipped {
        [labels[0], labels[2], labels[1]]
    } else {
        *labels
    }
}
