//! Cheap necessary conditions checked before any backtracking starts.

use crate::matcher::MatchKind;
use molgraph_common::Graph;

/// Vertex-count, edge-count and circuit-rank ordering. A query with more
/// vertices, edges or independent cycles than the target can never embed,
/// and exact matching requires equality on all three; failing here
/// short-circuits the search to an empty result.
pub(crate) fn structure_compatible<V1, E1, V2, E2>(
    target: &Graph<V1, E1>,
    query: &Graph<V2, E2>,
    kind: MatchKind,
) -> bool {
    match kind {
        MatchKind::Isomorphism => {
            target.node_count() == query.node_count()
                && target.edge_count() == query.edge_count()
                && target.circuit_rank() == query.circuit_rank()
        }
        MatchKind::Monomorphism | MatchKind::NodeInduced => {
            target.node_count() >= query.node_count()
                && target.edge_count() >= query.edge_count()
                && target.circuit_rank() >= query.circuit_rank()
        }
    }
}
