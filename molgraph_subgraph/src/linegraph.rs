//! Line graph construction for edge-induced matching.

use itertools::Itertools;
use molgraph_common::Graph;

/// Build the line graph of `g`: one vertex per edge (the attribute is the
/// original edge index), and one edge per pair of incident edges (the
/// attribute is the shared original vertex). With no parallel edges two
/// incident edges share exactly one vertex, so the construction is
/// unambiguous.
pub fn line_graph<V, E>(g: &Graph<V, E>) -> Graph<usize, usize> {
    let mut lines: Graph<usize, usize> = Graph::new();
    for e in 0..g.edge_count() {
        lines.add_node(e);
    }
    for v in 0..g.node_count() {
        for (e1, e2) in g
            .neighbors(v)
            .map(|(_, e)| e)
            .collect::<Vec<_>>()
            .into_iter()
            .tuple_combinations()
        {
            lines.add_edge(e1, e2, v);
        }
    }
    lines
}
