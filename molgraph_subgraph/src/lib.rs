//! Backtracking subgraph matching between attributed graphs.
//!
//! The matcher is a VF2-style state machine over a partial vertex mapping,
//! driven as an explicit-stack lazy iterator: every [`MatchIter::next`]
//! resumes the search exactly where the previous call left off, so callers
//! pull as many (or as few) mappings as they need. Compatibility between
//! vertices and edges is delegated to caller-supplied predicates; the
//! [`compat`] module generates the standard memoized predicate families for
//! molecular graphs.
//!
//! Three vertex-mapping flavors share the state machine and differ only in
//! their acceptance rules ([`MatchKind`]); edge-induced matching runs the
//! same machinery over line graphs and recovers the vertex mapping with
//! [`emap_to_nmap`].

pub mod compat;

mod emap;
mod graph_index;
mod linegraph;
mod matcher;
mod prefilter;
mod state;
mod utils;

pub use emap::emap_to_nmap;
pub use linegraph::line_graph;
pub use matcher::{AtomMapping, MatchIter, MatchKind};

use molgraph_common::{Graph, MatchOptions};
use tracing::debug;

/// Lazily enumerate exact isomorphisms from `query` onto `target`.
///
/// Both graphs must have the same vertex and edge counts; otherwise the
/// iterator is empty from the start.
pub fn isomorphisms<'a, V1, E1, V2, E2, VM, EM>(
    target: &'a Graph<V1, E1>,
    query: &'a Graph<V2, E2>,
    vmatch: VM,
    ematch: EM,
    options: &MatchOptions,
) -> MatchIter<'a, V1, E1, V2, E2, VM, EM>
where
    VM: Fn(usize, usize) -> bool,
    EM: Fn(usize, usize) -> bool,
{
    MatchIter::new(target, query, MatchKind::Isomorphism, vmatch, ematch, options)
}

/// Lazily enumerate substructure monomorphisms: injective mappings of all
/// of `query` into `target` where every query edge maps onto a target edge.
/// Extra target edges among mapped vertices are allowed.
pub fn monomorphisms<'a, V1, E1, V2, E2, VM, EM>(
    target: &'a Graph<V1, E1>,
    query: &'a Graph<V2, E2>,
    vmatch: VM,
    ematch: EM,
    options: &MatchOptions,
) -> MatchIter<'a, V1, E1, V2, E2, VM, EM>
where
    VM: Fn(usize, usize) -> bool,
    EM: Fn(usize, usize) -> bool,
{
    MatchIter::new(
        target,
        query,
        MatchKind::Monomorphism,
        vmatch,
        ematch,
        options,
    )
}

/// Lazily enumerate node-induced substructure isomorphisms: like
/// [`monomorphisms`], but the induced subgraph on the mapped target
/// vertices must carry exactly the edges the query prescribes.
pub fn node_induced_matches<'a, V1, E1, V2, E2, VM, EM>(
    target: &'a Graph<V1, E1>,
    query: &'a Graph<V2, E2>,
    vmatch: VM,
    ematch: EM,
    options: &MatchOptions,
) -> MatchIter<'a, V1, E1, V2, E2, VM, EM>
where
    VM: Fn(usize, usize) -> bool,
    EM: Fn(usize, usize) -> bool,
{
    MatchIter::new(
        target,
        query,
        MatchKind::NodeInduced,
        vmatch,
        ematch,
        options,
    )
}

/// Enumerate edge-induced substructure matches as edge mappings
/// (query edge index -> target edge index).
///
/// The search runs over the line graphs of both inputs; every line-graph
/// mapping is converted back through [`emap_to_nmap`] and kept only when
/// the recovered vertex mapping is a consistent injective morphism, which
/// screens out the spurious line-graph correspondences around triangles.
pub fn edge_induced_matches<V1, E1, V2, E2, VM, EM>(
    target: &Graph<V1, E1>,
    query: &Graph<V2, E2>,
    vmatch: VM,
    ematch: EM,
    options: &MatchOptions,
) -> Vec<AtomMapping>
where
    VM: Fn(usize, usize) -> bool,
    EM: Fn(usize, usize) -> bool,
{
    if query.edge_count() == 0 || target.edge_count() < query.edge_count() {
        return Vec::new();
    }

    let target_lines = line_graph(target);
    let query_lines = line_graph(query);

    let line_vmatch = |te: usize, qe: usize| {
        if !ematch(te, qe) {
            return false;
        }
        let (tu, tv) = target.endpoints(te);
        let (qu, qv) = query.endpoints(qe);
        (vmatch(tu, qu) && vmatch(tv, qv)) || (vmatch(tu, qv) && vmatch(tv, qu))
    };
    // Adjacent line-graph vertices share an original vertex; require the
    // shared endpoints to be compatible as well.
    let line_ematch = |lte: usize, lqe: usize| {
        vmatch(target_lines.edge(lte).attr, query_lines.edge(lqe).attr)
    };

    let matches: Vec<AtomMapping> = MatchIter::new(
        &target_lines,
        &query_lines,
        MatchKind::NodeInduced,
        line_vmatch,
        line_ematch,
        options,
    )
    .filter(|edge_mapping| {
        emap_to_nmap(edge_mapping, target, query)
            .map(|nmap| emap::nmap_is_consistent(&nmap, edge_mapping, target, query))
            .unwrap_or(false)
    })
    .collect();

    debug!(count = matches.len(), "edge-induced match enumeration done");
    matches
}
