//! Modular product ("compatibility") graphs for MCS search.
//!
//! A vertex of the product is a compatible pair of elements, one from each
//! input graph: node pairs for MCIS, edge pairs for MCES. Product edges
//! join pairs that can coexist in one common substructure; a boolean label
//! marks the pairs that are adjacent in both inputs, which is what the
//! connection-constrained clique search keys on. Cliques of the product
//! are exactly the common-substructure candidates.

use molgraph_clique::EdgeLabels;
use molgraph_common::Graph;

pub(crate) struct ProductGraph {
    pub(crate) graph: Graph<(usize, usize), ()>,
    pub(crate) labels: EdgeLabels,
}

/// Pairwise-distance gate for the topological MCS constraint: matched
/// elements must sit at comparable distances in both graphs, within a
/// diameter cutoff.
pub(crate) struct TopoGate {
    dist1: Vec<Vec<usize>>,
    dist2: Vec<Vec<usize>>,
    diameter: usize,
    tolerance: usize,
}

impl TopoGate {
    pub(crate) fn new<V1, E1, V2, E2>(
        g1: &Graph<V1, E1>,
        g2: &Graph<V2, E2>,
        diameter: usize,
        tolerance: usize,
    ) -> Self {
        TopoGate {
            dist1: (0..g1.node_count()).map(|v| g1.bfs_distances(v)).collect(),
            dist2: (0..g2.node_count()).map(|v| g2.bfs_distances(v)).collect(),
            diameter,
            tolerance,
        }
    }

    fn admits(&self, u1: usize, v1: usize, u2: usize, v2: usize) -> bool {
        let d1 = self.dist1[u1][v1];
        let d2 = self.dist2[u2][v2];
        d1 != usize::MAX
            && d2 != usize::MAX
            && d1 <= self.diameter
            && d2 <= self.diameter
            && d1.abs_diff(d2) <= self.tolerance
    }
}

/// Node product for MCIS. Vertices are compatible node pairs; two pairs are
/// joined when they use distinct nodes on both sides and are either
/// adjacent in both graphs (with compatible edges; labeled `true`) or
/// adjacent in neither (labeled `false`). One-sided adjacency would break
/// the induced-subgraph property, so those pairs conflict.
pub(crate) fn node_product<V1, E1, V2, E2, VM, EM>(
    g1: &Graph<V1, E1>,
    g2: &Graph<V2, E2>,
    vmatch: VM,
    ematch: EM,
    topo: Option<&TopoGate>,
) -> ProductGraph
where
    VM: Fn(usize, usize) -> bool,
    EM: Fn(usize, usize) -> bool,
{
    let mut graph: Graph<(usize, usize), ()> = Graph::new();
    for u1 in 0..g1.node_count() {
        for u2 in 0..g2.node_count() {
            if vmatch(u1, u2) {
                graph.add_node((u1, u2));
            }
        }
    }

    let mut labels = EdgeLabels::new();
    let n = graph.node_count();
    for a in 0..n {
        for b in (a + 1)..n {
            let (u1, u2) = *graph.node(a);
            let (v1, v2) = *graph.node(b);
            if u1 == v1 || u2 == v2 {
                continue;
            }
            let connected = match (g1.edge_between(u1, v1), g2.edge_between(u2, v2)) {
                (Some(e1), Some(e2)) => {
                    if !ematch(e1, e2) {
                        continue;
                    }
                    true
                }
                (None, None) => false,
                _ => continue,
            };
            if let Some(gate) = topo {
                if !gate.admits(u1, v1, u2, v2) {
                    continue;
                }
            }
            graph.add_edge(a, b, ());
            labels.set(a, b, connected);
        }
    }
    ProductGraph { graph, labels }
}

/// Edge product for MCES. Vertices are compatible edge pairs (edge
/// predicates plus endpoint compatibility in some orientation); two pairs
/// are joined when the implied node mapping is consistent: either the two
/// edges share an endpoint in both graphs (with compatible shared and
/// outer endpoints; labeled `true`) or in neither (labeled `false`).
pub(crate) fn edge_product<V1, E1, V2, E2, VM, EM>(
    g1: &Graph<V1, E1>,
    g2: &Graph<V2, E2>,
    vmatch: VM,
    ematch: EM,
    topo: Option<&TopoGate>,
) -> ProductGraph
where
    VM: Fn(usize, usize) -> bool,
    EM: Fn(usize, usize) -> bool,
{
    let mut graph: Graph<(usize, usize), ()> = Graph::new();
    for e1 in 0..g1.edge_count() {
        for e2 in 0..g2.edge_count() {
            if !ematch(e1, e2) {
                continue;
            }
            let (u1, v1) = g1.endpoints(e1);
            let (u2, v2) = g2.endpoints(e2);
            let ends_compatible = (vmatch(u1, u2) && vmatch(v1, v2))
                || (vmatch(u1, v2) && vmatch(v1, u2));
            if ends_compatible {
                graph.add_node((e1, e2));
            }
        }
    }

    let mut labels = EdgeLabels::new();
    let n = graph.node_count();
    for a in 0..n {
        for b in (a + 1)..n {
            let (e1, e2) = *graph.node(a);
            let (f1, f2) = *graph.node(b);
            if e1 == f1 || e2 == f2 {
                continue;
            }
            let s1 = shared_vertex(g1, e1, f1);
            let s2 = shared_vertex(g2, e2, f2);
            let connected = match (s1, s2) {
                (Some(shared1), Some(shared2)) => {
                    // Sharing pins the orientation: shared maps to shared
                    // and the outer endpoints must line up pairwise.
                    let outer_e1 = g1.edge(e1).other(shared1);
                    let outer_f1 = g1.edge(f1).other(shared1);
                    let outer_e2 = g2.edge(e2).other(shared2);
                    let outer_f2 = g2.edge(f2).other(shared2);
                    if !vmatch(shared1, shared2)
                        || !vmatch(outer_e1, outer_e2)
                        || !vmatch(outer_f1, outer_f2)
                    {
                        continue;
                    }
                    true
                }
                (None, None) => false,
                _ => continue,
            };
            if let Some(gate) = topo {
                if !gate.admits(e1, f1, e2, f2) {
                    continue;
                }
            }
            graph.add_edge(a, b, ());
            labels.set(a, b, connected);
        }
    }
    ProductGraph { graph, labels }
}

fn shared_vertex<V, E>(g: &Graph<V, E>, e: usize, f: usize) -> Option<usize> {
    let (a, b) = g.endpoints(e);
    let (c, d) = g.endpoints(f);
    if a == c || a == d {
        Some(a)
    } else if b == c || b == d {
        Some(b)
    } else {
        None
    }
}
