mod support;

use approx::assert_relative_eq;
use meshcut::{EdgeTolerance, ExtrudedLoop, Volume, partition, partition_with_tolerance};
use support::{aabb, tessellated_box, total_area, tri};

/// Unit-wide strip at z = 0.5 reaching from x = -1 to x = 1.
fn strip() -> Vec<meshcut::Triangle> {
    vec![
        tri([-1.0, 0.5, 0.5], [1.0, 0.5, 0.5], [1.0, 1.5, 0.5]),
        tri([-1.0, 0.5, 0.5], [1.0, 1.5, 0.5], [-1.0, 1.5, 0.5]),
    ]
}

#[test]
fn strip_across_box_face() {
    let bounds = aabb([0.0, 0.0, 0.0], [2.0, 2.0, 1.0]);
    let (inside, outside) = partition(&strip(), &bounds, false).unwrap();

    assert_relative_eq!(total_area(&inside), 1.0, epsilon = 1e-9);
    assert_relative_eq!(total_area(&outside), 1.0, epsilon = 1e-9);
    for t in &inside {
        assert!(bounds.contains(&t.centroid()));
    }
    for t in &outside {
        assert!(!bounds.contains(&t.centroid()));
    }
}

#[test]
fn strip_across_extruded_square() {
    let square = ExtrudedLoop::new(
        vec![0.0, 2.0, 2.0, 0.0],
        vec![0.0, 0.0, 2.0, 2.0],
        0.0,
        1.0,
        false,
    )
    .unwrap();
    let (inside, outside) = partition(&strip(), &square, true).unwrap();
    assert_relative_eq!(total_area(&inside), 1.0, epsilon = 1e-9);
    assert_relative_eq!(total_area(&outside), 1.0, epsilon = 1e-9);
    assert!(inside.iter().all(|t| square.contains(&t.centroid())));
}

#[test]
fn partition_conserves_area() {
    let surface = tessellated_box(&aabb([-1.0, -1.0, -1.0], [1.0, 1.0, 1.0]), 1);
    let volume = aabb([0.0, -0.5, -2.0], [3.0, 0.5, 2.0]);
    let (inside, outside) =
        partition_with_tolerance(&surface, &volume, false, EdgeTolerance::new(1e-3).unwrap())
            .unwrap();
    assert!(!inside.is_empty());
    assert!(!outside.is_empty());
    assert_relative_eq!(
        total_area(&inside) + total_area(&outside),
        total_area(&surface),
        epsilon = 1e-9
    );
}

#[test]
fn fully_contained_set_is_untouched() {
    let surface = tessellated_box(&aabb([0.25, 0.25, 0.25], [0.75, 0.75, 0.75]), 1);
    let bounds = aabb([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
    let (inside, outside) = partition(&surface, &bounds, false).unwrap();
    assert_eq!(inside, surface);
    assert!(outside.is_empty());
}
