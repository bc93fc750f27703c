//! `Group` and `MeshModel`: named triangle sets and the operations that
//! transform them.

use crate::aabb::Aabb;
use crate::errors::GeometryResult;
use crate::float_types::{Real, Tolerances};
use crate::shapes::Volume;
use nalgebra::{Point3, Vector4};
use std::fmt::Debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub mod clip;
pub mod manifold;
pub mod orientation;
pub mod partition;
pub mod plane;
pub mod split;
pub mod triangle;
pub mod vertex;

pub use orientation::OrientationReport;
pub use split::EdgeTolerance;
pub use triangle::Triangle;
use vertex::VertexIndex;

/// A named set of triangles sharing one optional material.
#[derive(Clone, Debug)]
pub struct Group<S: Clone + Send + Sync + Debug> {
    pub name: String,
    pub triangles: Vec<Triangle>,
    /// Material or other per-group data
    pub material: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Group<S> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_triangles(name, Vec::new())
    }

    pub fn from_triangles(name: impl Into<String>, triangles: Vec<Triangle>) -> Self {
        Group {
            name: name.into(),
            triangles,
            material: None,
        }
    }

    pub fn with_material(mut self, material: S) -> Self {
        self.material = Some(material);
        self
    }

    /// Same name and material, different triangles.
    fn derive(&self, name: String, triangles: Vec<Triangle>) -> Self {
        Group {
            name,
            triangles,
            material: self.material.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// `None` for an empty group.
    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(self.triangles.iter().flat_map(|t| t.positions.iter()))
    }

    pub fn surface_area(&self) -> Real {
        self.triangles.iter().map(Triangle::area).sum()
    }

    /// Area-weighted mean of the triangle centroids. When every triangle is
    /// degenerate the plain mean of all corners is used instead; `None` for an
    /// empty group.
    pub fn centroid(&self) -> Option<Point3<Real>> {
        if self.triangles.is_empty() {
            return None;
        }
        let area = self.surface_area();
        if area > 0.0 {
            let weighted = self
                .triangles
                .iter()
                .fold(nalgebra::Vector3::zeros(), |acc, t| acc + t.centroid().coords * t.area());
            return Some(Point3::from(weighted / area));
        }
        let corners: Vec<Point3<Real>> =
            self.triangles.iter().flat_map(|t| t.positions).collect();
        Some(crate::math::centroid(&corners))
    }

    /// The part of this group inside `aabb`.
    pub fn clip(&self, aabb: &Aabb) -> Self {
        self.derive(self.name.clone(), clip::clip(&self.triangles, aabb))
    }

    /// Every triangle touching `cut` split by its plane.
    pub fn split(&self, cut: &Triangle, tolerance: EdgeTolerance) -> Self {
        self.derive(self.name.clone(), split::split_all(&self.triangles, cut, tolerance))
    }

    /// `(inside, outside)` relative to `volume`. The inside group keeps the
    /// name, the outside one is suffixed with `_outside`.
    pub fn partition<V: Volume + ?Sized>(
        &self,
        volume: &V,
        compute_normals: bool,
    ) -> GeometryResult<(Self, Self)> {
        self.partition_with(volume, compute_normals, &Tolerances::default())
    }

    /// [`Group::partition`] cutting with `tolerances.edge_tolerance`.
    pub fn partition_with<V: Volume + ?Sized>(
        &self,
        volume: &V,
        compute_normals: bool,
        tolerances: &Tolerances,
    ) -> GeometryResult<(Self, Self)> {
        tolerances.validate()?;
        let edge = EdgeTolerance::new(tolerances.edge_tolerance)?;
        let (inside, outside) =
            partition::partition_with_tolerance(&self.triangles, volume, compute_normals, edge)?;
        Ok((
            self.derive(self.name.clone(), inside),
            self.derive(format!("{}_outside", self.name), outside),
        ))
    }

    /// Give every corner of every triangle the same RGBA color.
    pub fn colorize(&mut self, color: Vector4<Real>) {
        for t in &mut self.triangles {
            t.colors = Some([color; 3]);
        }
    }

    /// Make the winding consistent with the group centroid as reference point,
    /// so closed components face outward.
    pub fn correct_orientation(&mut self) -> GeometryResult<OrientationReport> {
        self.correct_orientation_with(&Tolerances::default())
    }

    /// [`Group::correct_orientation`] welding within `tolerances.weld_epsilon`.
    pub fn correct_orientation_with(
        &mut self,
        tolerances: &Tolerances,
    ) -> GeometryResult<OrientationReport> {
        tolerances.validate()?;
        let Some(reference) = self.centroid() else {
            return Ok(OrientationReport::default());
        };
        let (_, labels) = VertexIndex::build(&self.triangles, tolerances.weld_epsilon)?;
        orientation::correct_orientation_indexed(&mut self.triangles, &labels, &reference)
    }

    /// Weld the corners of this group; see [`VertexIndex::build`].
    pub fn index_vertices(&self, epsilon: Real) -> GeometryResult<(VertexIndex, Vec<[usize; 3]>)> {
        VertexIndex::build(&self.triangles, epsilon)
    }
}

/// An ordered collection of groups.
#[derive(Clone, Debug)]
pub struct MeshModel<S: Clone + Send + Sync + Debug> {
    groups: Vec<Group<S>>,
}

impl<S: Clone + Send + Sync + Debug> Default for MeshModel<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Send + Sync + Debug> MeshModel<S> {
    pub const fn new() -> Self {
        MeshModel { groups: Vec::new() }
    }

    pub fn push(&mut self, group: Group<S>) {
        self.groups.push(group);
    }

    pub fn groups(&self) -> &[Group<S>] {
        &self.groups
    }

    /// First group called `name`.
    pub fn group(&self, name: &str) -> Option<&Group<S>> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn triangle_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Union of the group boxes; `None` when no group has triangles.
    pub fn bounding_box(&self) -> Option<Aabb> {
        self.groups
            .iter()
            .filter_map(Group::bounding_box)
            .reduce(|a, b| a.merge(&b))
    }

    pub fn colorize(&mut self, color: Vector4<Real>) {
        for g in &mut self.groups {
            g.colorize(color);
        }
    }

    /// Clip every group to `aabb`. Groups left empty are kept.
    #[cfg(not(feature = "parallel"))]
    pub fn clip(&self, aabb: &Aabb) -> Self {
        MeshModel {
            groups: self.groups.iter().map(|g| g.clip(aabb)).collect(),
        }
    }

    #[cfg(feature = "parallel")]
    pub fn clip(&self, aabb: &Aabb) -> Self {
        MeshModel {
            groups: self.groups.par_iter().map(|g| g.clip(aabb)).collect(),
        }
    }

    /// [`Group::correct_orientation`] on every group, reports in group order.
    pub fn correct_orientation(&mut self) -> GeometryResult<Vec<OrientationReport>> {
        self.correct_orientation_with(&Tolerances::default())
    }

    #[cfg(not(feature = "parallel"))]
    pub fn correct_orientation_with(
        &mut self,
        tolerances: &Tolerances,
    ) -> GeometryResult<Vec<OrientationReport>> {
        self.groups
            .iter_mut()
            .map(|g| g.correct_orientation_with(tolerances))
            .collect()
    }

    #[cfg(feature = "parallel")]
    pub fn correct_orientation_with(
        &mut self,
        tolerances: &Tolerances,
    ) -> GeometryResult<Vec<OrientationReport>> {
        self.groups
            .par_iter_mut()
            .map(|g| g.correct_orientation_with(tolerances))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn quad(z: Real) -> Vec<Triangle> {
        vec![
            Triangle::from_points(
                Point3::new(0.0, 0.0, z),
                Point3::new(2.0, 0.0, z),
                Point3::new(2.0, 2.0, z),
            ),
            Triangle::from_points(
                Point3::new(0.0, 0.0, z),
                Point3::new(2.0, 2.0, z),
                Point3::new(0.0, 2.0, z),
            ),
        ]
    }

    #[test]
    fn centroid_is_area_weighted() {
        let mut tris = quad(0.0);
        // a sliver far away must not pull the centroid
        tris.push(Triangle::from_points(
            Point3::new(100.0, 0.0, 0.0),
            Point3::new(101.0, 0.0, 0.0),
            Point3::new(102.0, 0.0, 0.0),
        ));
        let group: Group<()> = Group::from_triangles("floor", tris);
        let c = group.centroid().unwrap();
        assert!((c - Point3::new(1.0, 1.0, 0.0)).norm() < 1e-12);
        assert!(Group::<()>::new("empty").centroid().is_none());
    }

    #[test]
    fn partition_names_outside_group() {
        let group = Group::from_triangles("floor", quad(0.5)).with_material("oak");
        let aabb = Aabb::new(Point3::origin(), Point3::new(1.0, 3.0, 1.0)).unwrap();
        let (inside, outside) = group.partition(&aabb, false).unwrap();
        assert_eq!(inside.name, "floor");
        assert_eq!(outside.name, "floor_outside");
        assert_eq!(outside.material, Some("oak"));
        let total = inside.surface_area() + outside.surface_area();
        assert!((total - group.surface_area()).abs() < 1e-9);
    }

    #[test]
    fn model_aggregates_groups() {
        let mut model: MeshModel<()> = MeshModel::new();
        model.push(Group::from_triangles("low", quad(0.0)));
        model.push(Group::from_triangles("high", quad(3.0)));
        model.push(Group::new("empty"));
        assert_eq!(model.triangle_count(), 4);

        let bb = model.bounding_box().unwrap();
        assert_eq!(bb.maxs, Point3::new(2.0, 2.0, 3.0));

        model.colorize(Vector4::new(1.0, 0.0, 0.0, 1.0));
        assert!(model.groups()[0].triangles.iter().all(|t| t.colors.is_some()));

        let clipped = model.clip(&Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0)).unwrap());
        assert_eq!(clipped.groups().len(), 3);
        assert!(clipped.group("high").unwrap().is_empty());
        assert!((clipped.group("low").unwrap().surface_area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn orientation_runs_per_group() {
        let mut model: MeshModel<()> = MeshModel::new();
        let mut tris = quad(0.0);
        tris[1].reverse();
        model.push(Group::from_triangles("a", tris));
        let reports = model.correct_orientation().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].components, 1);
        let t = &model.groups()[0].triangles;
        assert!(t[0].normal().dot(&t[1].normal()) > 0.0);
    }

    #[test]
    fn invalid_tolerances_are_rejected_before_work() {
        let mut group: Group<()> = Group::from_triangles("a", quad(0.0));
        let bad_weld = Tolerances {
            weld_epsilon: -1.0,
            ..Tolerances::default()
        };
        assert!(group.correct_orientation_with(&bad_weld).is_err());
        assert!(Group::<()>::new("empty").correct_orientation_with(&bad_weld).is_err());

        let bad_edge = Tolerances {
            edge_tolerance: 0.5,
            ..Tolerances::default()
        };
        let aabb = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0)).unwrap();
        assert!(group.partition_with(&aabb, false, &bad_edge).is_err());
        assert_eq!(group.triangles, quad(0.0));
    }
}
