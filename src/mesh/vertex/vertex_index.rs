use nalgebra::Point3;
use rstar::RTree;
use rstar::primitives::GeomWithData;

use crate::{
    errors::GeometryResult,
    float_types::{Real, validate_epsilon},
    mesh::triangle::Triangle,
};

/// Welded position tagged with its label.
type LabelledPoint = GeomWithData<[Real; 3], usize>;

/// A unique, welded position and its dense label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedVertex {
    label: usize,
    pos: Point3<Real>,
}

impl IndexedVertex {
    pub const fn label(&self) -> usize {
        self.label
    }

    pub const fn pos(&self) -> Point3<Real> {
        self.pos
    }
}

/// **Spatial Vertex Index: Epsilon Welding with an R-tree**
///
/// Every queried position is matched against the nearest position already
/// indexed. Within `epsilon` (Euclidean) the existing label is reused;
/// otherwise the position is indexed under the next label. Labels are dense,
/// start at `0` and follow the order in which unique points are discovered.
///
/// Matching is against the first point of each cluster, so a chain of points
/// each within `epsilon` of the next does not collapse into one vertex.
///
/// Positions with a non-finite coordinate never weld: each one gets a fresh
/// label and stays out of the tree.
pub struct VertexIndex {
    tree: RTree<LabelledPoint>,
    vertices: Vec<IndexedVertex>,
    epsilon: Real,
}

impl core::fmt::Debug for VertexIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VertexIndex")
            .field("vertices", &self.vertices.len())
            .field("epsilon", &self.epsilon)
            .finish()
    }
}

impl VertexIndex {
    /// An empty index welding within `epsilon`; negative, NaN or infinite
    /// values are rejected.
    pub fn new(epsilon: Real) -> GeometryResult<Self> {
        validate_epsilon(epsilon)?;
        Ok(Self {
            tree: RTree::new(),
            vertices: Vec::new(),
            epsilon,
        })
    }

    /// Weld every corner of `triangles`, in input order, and return the index
    /// together with one label triple per triangle.
    pub fn build(
        triangles: &[Triangle],
        epsilon: Real,
    ) -> GeometryResult<(Self, Vec<[usize; 3]>)> {
        let mut index = Self::new(epsilon)?;
        let labels = triangles
            .iter()
            .map(|t| {
                [
                    index.insert(&t.positions[0]),
                    index.insert(&t.positions[1]),
                    index.insert(&t.positions[2]),
                ]
            })
            .collect();

        tracing::debug!(
            corners = triangles.len() * 3,
            unique = index.len(),
            epsilon,
            "indexed vertices"
        );
        Ok((index, labels))
    }

    /// Label of `pos`, indexing it first if nothing lies within `epsilon`.
    pub fn insert(&mut self, pos: &Point3<Real>) -> usize {
        if let Some((label, distance)) = self.nearest(pos) {
            if distance <= self.epsilon {
                return label;
            }
        }
        let label = self.vertices.len();
        if is_finite(pos) {
            self.tree.insert(GeomWithData::new([pos.x, pos.y, pos.z], label));
        }
        self.vertices.push(IndexedVertex { label, pos: *pos });
        label
    }

    /// Closest indexed vertex and its Euclidean distance. `None` for an empty
    /// index or a non-finite query.
    pub fn nearest(&self, pos: &Point3<Real>) -> Option<(usize, Real)> {
        if !is_finite(pos) {
            return None;
        }
        let hit = self.tree.nearest_neighbor(&[pos.x, pos.y, pos.z])?;
        let [x, y, z] = *hit.geom();
        Some((hit.data, (Point3::new(x, y, z) - pos).norm()))
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub const fn epsilon(&self) -> Real {
        self.epsilon
    }

    /// All unique vertices, ordered by label.
    pub fn vertices(&self) -> &[IndexedVertex] {
        &self.vertices
    }

    pub fn position(&self, label: usize) -> Option<Point3<Real>> {
        self.vertices.get(label).map(|v| v.pos)
    }

    /// Flatten label triples into a `u32` index buffer.
    pub fn to_index_buffer(labels: &[[usize; 3]]) -> Vec<u32> {
        labels
            .iter()
            .flat_map(|tri| tri.iter().map(|&l| l as u32))
            .collect()
    }

    /// Copies of `triangles` with every corner moved onto its welded position.
    /// Attributes are left as they were. Triangles whose labels point outside the
    /// index keep their original positions.
    pub fn welded_triangles(&self, triangles: &[Triangle], labels: &[[usize; 3]]) -> Vec<Triangle> {
        triangles
            .iter()
            .zip(labels)
            .map(|(t, tri_labels)| {
                let mut welded = t.clone();
                for (pos, &label) in welded.positions.iter_mut().zip(tri_labels) {
                    if let Some(p) = self.position(label) {
                        *pos = p;
                    }
                }
                welded
            })
            .collect()
    }
}

#[inline]
fn is_finite(pos: &Point3<Real>) -> bool {
    pos.iter().all(|c| c.is_finite())
}
