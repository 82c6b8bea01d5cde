use crate::registry::EdgeId;

///
/// Trail
///
/// Relation edges on the current traversal path. Edges are pushed before
/// descending and popped on the way back, so sibling branches never see
/// each other's edges. Seeded edges sit below the first mark and are never
/// popped.
///

#[derive(Debug, Default)]
pub(super) struct Trail {
    edges: Vec<EdgeId>,
}

impl Trail {
    pub(super) fn seeded(edges: &[EdgeId]) -> Self {
        Self {
            edges: edges.to_vec(),
        }
    }

    pub(super) fn contains(&self, edge: EdgeId) -> bool {
        self.edges.contains(&edge)
    }

    /// Current height, to restore with `truncate`.
    pub(super) fn mark(&self) -> usize {
        self.edges.len()
    }

    pub(super) fn push(&mut self, edge: EdgeId) {
        self.edges.push(edge);
    }

    pub(super) fn truncate(&mut self, mark: usize) {
        self.edges.truncate(mark);
    }
}
