//! Per-graph structural index built once per search.

use molgraph_common::Graph;
use std::collections::HashSet;

/// Neighbor sets and degrees of one side of a match, precomputed so the
/// hot loop never walks adjacency lists for membership tests.
#[derive(Debug, Clone)]
pub(crate) struct GraphIndex {
    neighbors: Vec<HashSet<usize>>,
}

impl GraphIndex {
    pub(crate) fn build<V, E>(graph: &Graph<V, E>) -> Self {
        let mut neighbors = vec![HashSet::new(); graph.node_count()];
        for v in 0..graph.node_count() {
            for (w, _) in graph.neighbors(v) {
                neighbors[v].insert(w);
            }
        }
        GraphIndex { neighbors }
    }

    pub(crate) fn neighbors(&self, v: usize) -> &HashSet<usize> {
        &self.neighbors[v]
    }

    pub(crate) fn degree(&self, v: usize) -> usize {
        self.neighbors[v].len()
    }
}
