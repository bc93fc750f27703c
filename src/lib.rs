//! Triangle mesh post-processing: vertex welding, exact triangle splitting,
//! clipping against axis-aligned boxes, winding repair and partitioning by
//! closed volumes.
//!
//! The building blocks work on plain triangle lists ([`Triangle`]); [`Group`]
//! and [`MeshModel`] wrap them into named, material-carrying sets.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to process the groups of a [`MeshModel`] concurrently

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod aabb;
pub mod errors;
pub mod float_types;
pub mod math;
pub mod mesh;
pub mod shapes;

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use aabb::Aabb;
pub use errors::{GeometryError, GeometryResult};
pub use float_types::{Real, Tolerances};
pub use mesh::clip::clip;
pub use mesh::orientation::{OrientationReport, correct_orientation, correct_orientation_indexed};
pub use mesh::partition::{partition, partition_with_tolerance};
pub use mesh::split::{EdgeTolerance, split};
pub use mesh::triangle::Triangle;
pub use mesh::vertex::{IndexedVertex, Vertex, VertexIndex};
pub use mesh::{Group, MeshModel};
pub use shapes::{ExtrudedLoop, Volume, triangulate};
