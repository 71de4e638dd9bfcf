//! Working representation shared by the clique routines.

use molgraph_common::Graph;
use std::collections::HashSet;

/// Per-vertex neighbor sets, built once per call. Attribute types are
/// irrelevant here; only adjacency matters.
pub(crate) fn adjacency_sets<V, E>(graph: &Graph<V, E>) -> Vec<HashSet<usize>> {
    let mut adjacency = vec![HashSet::new(); graph.node_count()];
    for v in 0..graph.node_count() {
        for (w, _) in graph.neighbors(v) {
            adjacency[v].insert(w);
        }
    }
    adjacency
}
