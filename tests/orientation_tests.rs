mod support;

use meshcut::mesh::manifold::{analyze_edges, has_consistent_winding};
use meshcut::{
    Aabb, GeometryError, Real, Triangle, VertexIndex, correct_orientation, correct_orientation_indexed,
};
use nalgebra::{Point3, Vector3};
use support::{aabb, flat_grid, tessellated_box};

fn faces_outward(triangles: &[Triangle], center: &Point3<Real>) -> bool {
    triangles
        .iter()
        .all(|t| t.normal().dot(&(t.centroid() - *center)) > 0.0)
}

fn scramble(triangles: &mut [Triangle]) {
    for (i, t) in triangles.iter_mut().enumerate() {
        if i % 3 == 0 || i % 7 == 0 {
            t.reverse();
        }
    }
}

#[test]
fn scrambled_box_is_repaired() {
    let bounds = aabb([0.0, 0.0, 0.0], [2.0, 1.0, 3.0]);
    let mut surface = tessellated_box(&bounds, 2);
    scramble(&mut surface);

    let report = correct_orientation(&mut surface, &bounds.center()).unwrap();
    assert_eq!(report.components, 1);
    assert_eq!(report.abstained, 0);
    assert!(faces_outward(&surface, &bounds.center()));

    let (_, labels) = VertexIndex::build(&surface, 1e-9).unwrap();
    assert!(analyze_edges(&labels).is_closed_manifold());
}

#[test]
fn inverted_box_is_turned_outward() {
    let bounds = aabb([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]);
    let mut surface: Vec<Triangle> =
        tessellated_box(&bounds, 1).iter().map(Triangle::reversed).collect();
    let report = correct_orientation(&mut surface, &Point3::origin()).unwrap();
    assert_eq!(report.flipped, surface.len());
    assert!(faces_outward(&surface, &Point3::origin()));
}

#[test]
fn consistent_outward_box_is_left_alone() {
    let bounds = aabb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
    let original = tessellated_box(&bounds, 1);
    let mut surface = original.clone();
    let report = correct_orientation(&mut surface, &bounds.center()).unwrap();
    assert_eq!(report.flipped, 0);
    assert_eq!(surface, original);
}

#[test]
fn disjoint_boxes_are_separate_components() {
    let left = aabb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
    let right = aabb([5.0, 0.0, 0.0], [6.0, 1.0, 1.0]);
    let mut surface = tessellated_box(&left, 1);
    surface.extend(tessellated_box(&right, 1).iter().map(Triangle::reversed));
    scramble(&mut surface);

    // a reference between the boxes is outside both; every face of each box
    // still has to end up consistent with its neighbours
    let reference = Point3::new(3.0, 0.5, 0.5);
    let report = correct_orientation(&mut surface, &reference).unwrap();
    assert_eq!(report.components, 2);

    let (_, labels) = VertexIndex::build(&surface, 1e-9).unwrap();
    assert!(has_consistent_winding(&labels));
}

#[test]
fn degenerate_triangles_abstain_from_the_vote() {
    let bounds = aabb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
    let mut surface = tessellated_box(&bounds, 1);
    // a zero-area triangle hanging off an existing edge
    let [a, b, _] = surface[0].positions;
    surface.push(Triangle::from_points(a, b, nalgebra::center(&a, &b)));
    scramble(&mut surface);

    let report = correct_orientation(&mut surface, &bounds.center()).unwrap();
    assert_eq!(report.abstained, 1);
    let last = surface.len() - 1;
    assert!(faces_outward(&surface[..last], &bounds.center()));
}

#[test]
fn indexed_variant_uses_caller_labels() {
    let bounds = aabb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
    let mut surface = tessellated_box(&bounds, 0);
    scramble(&mut surface);
    let (_, labels) = VertexIndex::build(&surface, 0.0).unwrap();
    correct_orientation_indexed(&mut surface, &labels, &bounds.center()).unwrap();
    assert!(faces_outward(&surface, &bounds.center()));
}

#[test]
fn invalid_inputs_are_rejected() {
    let bounds = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0)).unwrap();
    let mut surface = tessellated_box(&bounds, 0);
    let err = correct_orientation_indexed(&mut surface, &[], &Point3::origin());
    assert!(matches!(err, Err(GeometryError::InvalidArgument(_))));

    let err = correct_orientation(&mut surface, &Point3::from(Vector3::repeat(Real::INFINITY)));
    assert!(matches!(err, Err(GeometryError::InvalidArgument(_))));
}

#[test]
fn large_flat_grid_is_oriented_away_from_reference() {
    let mut grid = flat_grid(40);
    scramble(&mut grid);

    let reference = Point3::new(20.0, 20.0, 5.0);
    let report = correct_orientation(&mut grid, &reference).unwrap();
    assert_eq!(report.components, 1);
    assert_eq!(report.abstained, 0);
    assert!(grid.iter().all(|t| t.normal().z < 0.0));

    let (_, labels) = VertexIndex::build(&grid, 1e-9).unwrap();
    assert!(has_consistent_winding(&labels));
}
