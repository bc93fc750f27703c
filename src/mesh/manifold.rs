use hashbrown::HashMap;

/// Edge-level topology of a labelled triangle set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeTopology {
    /// Undirected edges used by exactly one triangle
    pub boundary_edges: usize,
    /// Undirected edges shared by more than two triangles
    pub non_manifold_edges: usize,
    /// No directed edge is traversed twice, i.e. every shared edge is walked in
    /// opposite directions by its two triangles
    pub consistent_orientation: bool,
}

impl EdgeTopology {
    /// Every edge appears exactly twice, once in each direction.
    pub const fn is_closed_manifold(&self) -> bool {
        self.boundary_edges == 0 && self.non_manifold_edges == 0 && self.consistent_orientation
    }
}

/// Iterate the three directed edges of a label triple in winding order.
#[inline]
pub(crate) fn directed_edges(labels: &[usize; 3]) -> [(usize, usize); 3] {
    [(labels[0], labels[1]), (labels[1], labels[2]), (labels[2], labels[0])]
}

/// Order-independent key for an edge.
#[inline]
pub(crate) const fn undirected(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

/// Classify the edges of `labels` (one label triple per triangle, as produced by
/// the vertex index). Triangles with a repeated label are ignored.
pub fn analyze_edges(labels: &[[usize; 3]]) -> EdgeTopology {
    let mut directed: HashMap<(usize, usize), u32> = HashMap::new();
    let mut undirected_counts: HashMap<(usize, usize), u32> = HashMap::new();

    for tri in labels.iter().filter(|l| !has_repeated_label(l)) {
        for (a, b) in directed_edges(tri) {
            *directed.entry((a, b)).or_insert(0) += 1;
            *undirected_counts.entry(undirected(a, b)).or_insert(0) += 1;
        }
    }

    EdgeTopology {
        boundary_edges: undirected_counts.values().filter(|&&c| c == 1).count(),
        non_manifold_edges: undirected_counts.values().filter(|&&c| c > 2).count(),
        consistent_orientation: directed.values().all(|&c| c == 1),
    }
}

/// Shorthand for [`analyze_edges`]`(labels).consistent_orientation`.
pub fn has_consistent_winding(labels: &[[usize; 3]]) -> bool {
    analyze_edges(labels).consistent_orientation
}

#[inline]
pub(crate) const fn has_repeated_label(l: &[usize; 3]) -> bool {
    l[0] == l[1] || l[1] == l[2] || l[2] == l[0]
}

#[cfg(test)]
mod test {
    use super::*;

    // closed tetrahedron, outward winding
    const TETRA: [[usize; 3]; 4] = [[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];

    #[test]
    fn closed_tetrahedron() {
        let topo = analyze_edges(&TETRA);
        assert!(topo.is_closed_manifold(), "{topo:?}");
    }

    #[test]
    fn flipped_face_breaks_consistency() {
        let mut labels = TETRA;
        labels[1] = [0, 3, 1];
        assert!(!has_consistent_winding(&labels));
    }

    #[test]
    fn open_and_non_manifold_edges() {
        let topo = analyze_edges(&[[0, 1, 2], [1, 0, 3], [0, 1, 4]]);
        assert_eq!(topo.non_manifold_edges, 1);
        assert_eq!(topo.boundary_edges, 6);
        assert!(!topo.is_closed_manifold());
    }

    #[test]
    fn repeated_labels_are_ignored() {
        let topo = analyze_edges(&[[0, 0, 1]]);
        assert_eq!(topo.boundary_edges, 0);
    }
}
