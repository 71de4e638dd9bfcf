//! Connection-constrained clique search.
//!
//! A boolean label per edge marks whether that edge is a valid extension
//! for clique growth. A candidate vertex may only join the growing clique
//! when at least one already-included member reaches it through a
//! `true`-labeled edge, so every reported clique induces a connected
//! subgraph of the `true`-labeled edge subset. Pairs absent from the label
//! map count as `false`.
//!
//! Because a valid clique's labeled subgraph is connected, the clique can
//! be grown from any of its members. Seeding every search at the clique's
//! smallest member (with smaller vertices moved to an exclusion set) makes
//! each maximal clique discoverable exactly once; maximality is checked
//! against both the remaining and the excluded connectable extenders.

use crate::config::CliqueOptions;
use crate::engine::adjacency_sets;
use crate::maximum::CliqueResult;
use molgraph_common::{Graph, SearchStatus};
use std::collections::{HashMap, HashSet};
use std::time::Instant;
use tracing::debug;

/// Boolean edge labels keyed by normalized vertex pairs.
#[derive(Debug, Clone, Default)]
pub struct EdgeLabels {
    map: HashMap<(usize, usize), bool>,
}

impl EdgeLabels {
    /// An empty label map: every edge counts as non-connecting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Label the edge `u -- v`.
    pub fn set(&mut self, u: usize, v: usize, connects: bool) {
        self.map.insert(Self::key(u, v), connects);
    }

    /// Whether `u -- v` is a valid clique extension edge. Absent pairs are
    /// not connectable.
    pub fn connects(&self, u: usize, v: usize) -> bool {
        self.map.get(&Self::key(u, v)).copied().unwrap_or(false)
    }

    fn key(u: usize, v: usize) -> (usize, usize) {
        if u <= v { (u, v) } else { (v, u) }
    }
}

/// Enumerate every maximal connection-constrained clique, each exactly once.
///
/// Contracts mirror [`crate::all_maximal_cliques`]; when every edge of the
/// graph is labeled `true` the two coincide.
pub fn all_maximal_conn_cliques<V, E>(graph: &Graph<V, E>, labels: &EdgeLabels) -> Vec<Vec<usize>> {
    let adjacency = adjacency_sets(graph);
    let n = adjacency.len();
    let mut cliques = Vec::new();

    for seed in 0..n {
        let candidates: Vec<usize> = sorted(&adjacency[seed], |w| w > seed);
        let excluded: Vec<usize> = sorted(&adjacency[seed], |w| w < seed);
        let mut current = vec![seed];
        expand_conn(
            &adjacency,
            labels,
            &mut current,
            candidates,
            excluded,
            &mut cliques,
        );
    }
    debug!(count = cliques.len(), "conn clique enumeration finished");
    cliques
}

fn sorted(set: &HashSet<usize>, keep: impl Fn(usize) -> bool) -> Vec<usize> {
    let mut out: Vec<usize> = set.iter().copied().filter(|&w| keep(w)).collect();
    out.sort_unstable();
    out
}

fn expand_conn(
    adjacency: &[HashSet<usize>],
    labels: &EdgeLabels,
    current: &mut Vec<usize>,
    mut candidates: Vec<usize>,
    mut excluded: Vec<usize>,
    cliques: &mut Vec<Vec<usize>>,
) {
    let connectable = |w: usize, members: &[usize]| members.iter().any(|&v| labels.connects(v, w));

    let branch: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&w| connectable(w, current))
        .collect();
    let blocked = excluded.iter().any(|&w| connectable(w, current));

    if branch.is_empty() {
        // No remaining extension. Report unless an excluded vertex could
        // still extend the clique (then a superset was reported elsewhere).
        if !blocked {
            cliques.push(current.clone());
        }
        return;
    }

    for v in branch {
        if !candidates.contains(&v) {
            continue;
        }
        let next_candidates: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&w| w != v && adjacency[v].contains(&w))
            .collect();
        let next_excluded: Vec<usize> = excluded
            .iter()
            .copied()
            .filter(|&w| adjacency[v].contains(&w))
            .collect();

        current.push(v);
        expand_conn(
            adjacency,
            labels,
            current,
            next_candidates,
            next_excluded,
            cliques,
        );
        current.pop();

        candidates.retain(|&w| w != v);
        excluded.push(v);
    }
}

/// Find a maximum connection-constrained clique.
///
/// Growth is gated exactly as in [`all_maximal_conn_cliques`]; the bound is
/// `|current| + |candidates|` rather than a coloring bound, because adding
/// a candidate can unlock connectivity for others, so only the plain count
/// is a sound upper limit.
pub fn maximum_conn_clique<V, E>(
    graph: &Graph<V, E>,
    labels: &EdgeLabels,
    options: &CliqueOptions,
) -> CliqueResult {
    let adjacency = adjacency_sets(graph);
    let n = adjacency.len();
    if n == 0 {
        return CliqueResult {
            clique: Vec::new(),
            status: SearchStatus::Exhaustive,
        };
    }

    let mut search = MaxConnSearch {
        adjacency: &adjacency,
        labels,
        best: Vec::new(),
        status: SearchStatus::Exhaustive,
        deadline: options.deadline(),
        targetsize: options.targetsize,
    };

    'seeds: for seed in 0..n {
        let candidates: Vec<usize> = sorted(&adjacency[seed], |w| w > seed);
        let mut current = vec![seed];
        if search.expand(&mut current, candidates) {
            break 'seeds;
        }
    }

    debug!(
        size = search.best.len(),
        status = ?search.status,
        "maximum conn clique search finished"
    );
    CliqueResult {
        clique: search.best,
        status: search.status,
    }
}

struct MaxConnSearch<'a> {
    adjacency: &'a [HashSet<usize>],
    labels: &'a EdgeLabels,
    best: Vec<usize>,
    status: SearchStatus,
    deadline: Option<Instant>,
    targetsize: Option<usize>,
}

impl MaxConnSearch<'_> {
    /// Returns true when the search should stop unwinding entirely.
    fn expand(&mut self, current: &mut Vec<usize>, mut candidates: Vec<usize>) -> bool {
        if self.expired() {
            self.status = SearchStatus::TimedOut;
            return true;
        }
        if current.len() > self.best.len() {
            self.best = current.clone();
            debug!(size = self.best.len(), "new best conn clique");
            if self.target_reached() {
                self.status = SearchStatus::TargetReached;
                return true;
            }
        }
        if current.len() + candidates.len() <= self.best.len() {
            return false;
        }

        let branch: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&w| current.iter().any(|&v| self.labels.connects(v, w)))
            .collect();

        for v in branch {
            if !candidates.contains(&v) {
                continue;
            }
            if current.len() + candidates.len() <= self.best.len() {
                return false;
            }
            let next: Vec<usize> = candidates
                .iter()
                .copied()
                .filter(|&w| w != v && self.adjacency[v].contains(&w))
                .collect();
            current.push(v);
            let stop = self.expand(current, next);
            current.pop();
            if stop {
                return true;
            }
            candidates.retain(|&w| w != v);
        }
        false
    }

    fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    fn target_reached(&self) -> bool {
        self.targetsize.is_some_and(|t| self.best.len() >= t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{complete, is_clique};
    use std::collections::BTreeSet;

    fn k5_labels(edges: &[(usize, usize)]) -> EdgeLabels {
        let mut labels = EdgeLabels::new();
        for &(u, v) in edges {
            labels.set(u, v, true);
        }
        labels
    }

    fn as_sets(cliques: &[Vec<usize>]) -> BTreeSet<BTreeSet<usize>> {
        cliques
            .iter()
            .map(|c| c.iter().copied().collect())
            .collect()
    }

    #[test]
    fn all_false_labels_yield_singletons() {
        let g = complete(5);
        let cliques = all_maximal_conn_cliques(&g, &EdgeLabels::new());
        assert_eq!(cliques.len(), 5);
        assert!(cliques.iter().all(|c| c.len() == 1));

        let best = maximum_conn_clique(&g, &EdgeLabels::new(), &CliqueOptions::new());
        assert_eq!(best.len(), 1);
    }

    #[test]
    fn sparse_true_labels_split_the_clique() {
        // Labeled extension edges 0-1, 1-2 and 3-4 inside K5.
        let g = complete(5);
        let labels = k5_labels(&[(0, 1), (1, 2), (3, 4)]);

        let cliques = all_maximal_conn_cliques(&g, &labels);
        assert_eq!(
            as_sets(&cliques),
            BTreeSet::from([BTreeSet::from([0, 1, 2]), BTreeSet::from([3, 4])])
        );

        let best = maximum_conn_clique(&g, &labels, &CliqueOptions::new());
        assert_eq!(best.len(), 3);
        assert!(is_clique(&g, &best.clique));
        assert!(best.status.is_exhaustive());
    }

    #[test]
    fn all_true_labels_match_unconstrained_search() {
        let g = complete(5);
        let mut labels = EdgeLabels::new();
        for u in 0..5 {
            for v in (u + 1)..5 {
                labels.set(u, v, true);
            }
        }

        let cliques = all_maximal_conn_cliques(&g, &labels);
        assert_eq!(cliques.len(), 1);
        assert_eq!(cliques[0].len(), 5);

        let best = maximum_conn_clique(&g, &labels, &CliqueOptions::new());
        assert_eq!(best.len(), 5);
    }

    #[test]
    fn labels_are_symmetric() {
        let mut labels = EdgeLabels::new();
        labels.set(2, 1, true);
        assert!(labels.connects(1, 2));
        assert!(labels.connects(2, 1));
        assert!(!labels.connects(0, 1));
    }

    #[test]
    fn reported_cliques_have_connected_label_subgraph() {
        let g = complete(6);
        let labels = k5_labels(&[(0, 1), (2, 3), (3, 4), (4, 5)]);
        for clique in all_maximal_conn_cliques(&g, &labels) {
            // Walk the labeled subgraph restricted to the clique.
            let mut seen = BTreeSet::from([clique[0]]);
            let mut frontier = vec![clique[0]];
            while let Some(v) = frontier.pop() {
                for &w in &clique {
                    if !seen.contains(&w) && labels.connects(v, w) {
                        seen.insert(w);
                        frontier.push(w);
                    }
                }
            }
            assert_eq!(seen.len(), clique.len(), "clique {:?} not connected", clique);
        }
    }
}
