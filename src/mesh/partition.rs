//! Splitting a triangle set into the parts inside and outside a volume.

use crate::errors::GeometryResult;
use crate::mesh::split::{EdgeTolerance, split_all};
use crate::mesh::triangle::Triangle;
use crate::shapes::Volume;

/// Divide `triangles` by the boundary of `volume` using the default edge
/// tolerance. Returns `(inside, outside)`.
pub fn partition<V: Volume + ?Sized>(
    triangles: &[Triangle],
    volume: &V,
    compute_normals: bool,
) -> GeometryResult<(Vec<Triangle>, Vec<Triangle>)> {
    partition_with_tolerance(triangles, volume, compute_normals, EdgeTolerance::default())
}

/// **Sequential boundary cutting**
///
/// Each boundary triangle of `volume` is applied in turn as a cutter to the
/// pieces produced by the previous cuts. Afterwards every piece lies on one
/// side of the boundary and is classified by whether its centroid is contained
/// in the volume.
///
/// `compute_normals` is forwarded to the volume's triangulation; the pieces keep
/// the attributes interpolated from their source triangles.
pub fn partition_with_tolerance<V: Volume + ?Sized>(
    triangles: &[Triangle],
    volume: &V,
    compute_normals: bool,
    tolerance: EdgeTolerance,
) -> GeometryResult<(Vec<Triangle>, Vec<Triangle>)> {
    let boundary = volume.triangulate(compute_normals)?;

    let mut pieces = triangles.to_vec();
    for cutter in &boundary {
        pieces = split_all(&pieces, cutter, tolerance);
    }

    let (inside, outside): (Vec<Triangle>, Vec<Triangle>) =
        pieces.into_iter().partition(|t| volume.contains(&t.centroid()));

    tracing::debug!(
        input = triangles.len(),
        cutters = boundary.len(),
        inside = inside.len(),
        outside = outside.len(),
        volume = volume.name(),
        "partitioned"
    );
    Ok((inside, outside))
}
