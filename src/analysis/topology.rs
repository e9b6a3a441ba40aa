use std::collections::HashMap;

/// Per-edge usage counts for a triangle soup.
///
/// Each undirected edge `(lo, hi)` records how many faces traverse it in
/// each direction: `forward` counts `lo -> hi`, `backward` counts `hi -> lo`.
#[derive(Debug, Default)]
pub struct EdgeTopology {
    edges: HashMap<(u32, u32), EdgeUse>,
}

#[derive(Debug, Default, Clone, Copy)]
struct EdgeUse {
    forward: u32,
    backward: u32,
}

impl EdgeUse {
    fn total(self) -> u32 {
        self.forward + self.backward
    }
}

impl EdgeTopology {
    /// Build edge usage counts from triangle faces.
    pub fn build(faces: &[[u32; 3]]) -> Self {
        let mut edges: HashMap<(u32, u32), EdgeUse> = HashMap::with_capacity(faces.len() * 3 / 2);

        for &[a, b, c] in faces {
            for (from, to) in [(a, b), (b, c), (c, a)] {
                if from == to {
                    continue;
                }
                let entry = edges.entry((from.min(to), from.max(to))).or_default();
                if from < to {
                    entry.forward += 1;
                } else {
                    entry.backward += 1;
                }
            }
        }

        Self { edges }
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges used by exactly one face.
    pub fn boundary_edge_count(&self) -> usize {
        self.edges.values().filter(|e| e.total() == 1).count()
    }

    /// Edges used by more than two faces.
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edges.values().filter(|e| e.total() > 2).count()
    }

    /// Two-face edges traversed in the same direction by both faces.
    pub fn inconsistent_edge_count(&self) -> usize {
        self.edges
            .values()
            .filter(|e| e.total() == 2 && e.forward != 1)
            .count()
    }

    /// Every two-face edge is traversed once in each direction.
    pub fn is_winding_consistent(&self) -> bool {
        self.inconsistent_edge_count() == 0
    }

    /// Every edge is shared by exactly two consistently oriented faces.
    pub fn is_watertight(&self) -> bool {
        !self.edges.is_empty()
            && self
                .edges
                .values()
                .all(|e| e.forward == 1 && e.backward == 1)
    }
}
