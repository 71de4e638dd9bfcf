//! Bron-Kerbosch maximal clique enumeration with pivoting.

use crate::engine::adjacency_sets;
use molgraph_common::Graph;
use std::cmp::Reverse;
use std::collections::HashSet;
use tracing::debug;

/// Enumerate every inclusion-maximal clique of `graph`, each exactly once.
///
/// Candidate and exclusion sets are kept as ascending vertex lists, so the
/// output order is deterministic for a fixed graph (but otherwise an
/// implementation detail; callers should treat the result as a set). An
/// edgeless graph on `n` vertices yields `n` singleton cliques; a null
/// graph yields nothing.
pub fn all_maximal_cliques<V, E>(graph: &Graph<V, E>) -> Vec<Vec<usize>> {
    let adjacency = adjacency_sets(graph);
    let n = adjacency.len();
    let mut cliques = Vec::new();
    if n == 0 {
        return cliques;
    }

    let mut current = Vec::new();
    expand(
        &adjacency,
        &mut current,
        (0..n).collect(),
        Vec::new(),
        &mut cliques,
    );
    debug!(count = cliques.len(), "maximal clique enumeration finished");
    cliques
}

fn expand(
    adjacency: &[HashSet<usize>],
    current: &mut Vec<usize>,
    mut candidates: Vec<usize>,
    mut excluded: Vec<usize>,
    cliques: &mut Vec<Vec<usize>>,
) {
    if candidates.is_empty() && excluded.is_empty() {
        cliques.push(current.clone());
        return;
    }

    // Pivot from P u X maximizing |P n N(pivot)|; branching is then limited
    // to P \ N(pivot). Ties resolve to the smallest vertex id.
    let pivot = candidates
        .iter()
        .chain(excluded.iter())
        .copied()
        .max_by_key(|&u| {
            let coverage = candidates
                .iter()
                .filter(|&&v| adjacency[u].contains(&v))
                .count();
            (coverage, Reverse(u))
        })
        .expect("pivot exists when P u X is non-empty");

    let branch: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&v| !adjacency[pivot].contains(&v))
        .collect();

    for v in branch {
        let next_candidates: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&w| adjacency[v].contains(&w))
            .collect();
        let next_excluded: Vec<usize> = excluded
            .iter()
            .copied()
            .filter(|&w| adjacency[v].contains(&w))
            .collect();

        current.push(v);
        expand(adjacency, current, next_candidates, next_excluded, cliques);
        current.pop();

        candidates.retain(|&w| w != v);
        excluded.push(v);
    }
}
