//! Branch-and-bound maximum clique with a greedy coloring upper bound.

use crate::config::CliqueOptions;
use crate::engine::adjacency_sets;
use molgraph_common::{Graph, SearchStatus};
use std::collections::HashSet;
use std::time::Instant;
use tracing::debug;

/// Outcome of a bounded clique search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliqueResult {
    /// The best clique found, as vertex indices in discovery order.
    pub clique: Vec<usize>,
    /// Whether the search space was fully explored.
    pub status: SearchStatus,
}

impl CliqueResult {
    /// Size of the reported clique.
    pub fn len(&self) -> usize {
        self.clique.len()
    }

    /// Whether the reported clique is empty.
    pub fn is_empty(&self) -> bool {
        self.clique.is_empty()
    }
}

/// Find a maximum clique of `graph`.
///
/// Vertices are seeded in descending degree order; at each node the
/// candidate set is greedily colored and candidates are expanded in reverse
/// color order, pruning once `|current| + color <= |best|`. Ties between
/// equally sized maximum cliques resolve to the first one encountered under
/// this fixed ordering, so the result is deterministic for a given graph.
///
/// An edgeless graph yields a single-vertex clique, a null graph the empty
/// clique; both are `Exhaustive`.
pub fn maximum_clique<V, E>(graph: &Graph<V, E>, options: &CliqueOptions) -> CliqueResult {
    let adjacency = adjacency_sets(graph);
    let n = adjacency.len();
    if n == 0 {
        return CliqueResult {
            clique: Vec::new(),
            status: SearchStatus::Exhaustive,
        };
    }

    let mut roots: Vec<usize> = (0..n).collect();
    roots.sort_by(|&a, &b| adjacency[b].len().cmp(&adjacency[a].len()).then(a.cmp(&b)));

    let mut search = MaxCliqueSearch {
        adjacency: &adjacency,
        best: Vec::new(),
        status: SearchStatus::Exhaustive,
        deadline: options.deadline(),
        targetsize: options.targetsize,
    };
    search.expand(&mut Vec::new(), roots);

    debug!(
        size = search.best.len(),
        status = ?search.status,
        "maximum clique search finished"
    );
    CliqueResult {
        clique: search.best,
        status: search.status,
    }
}

struct MaxCliqueSearch<'a> {
    adjacency: &'a [HashSet<usize>],
    best: Vec<usize>,
    status: SearchStatus,
    deadline: Option<Instant>,
    targetsize: Option<usize>,
}

impl MaxCliqueSearch<'_> {
    /// Returns true when the search should stop unwinding entirely.
    fn expand(&mut self, current: &mut Vec<usize>, candidates: Vec<usize>) -> bool {
        if self.expired() {
            self.status = SearchStatus::TimedOut;
            return true;
        }
        if candidates.is_empty() {
            if current.len() > self.best.len() {
                self.best = current.clone();
                debug!(size = self.best.len(), "new best clique");
                if self.target_reached() {
                    self.status = SearchStatus::TargetReached;
                    return true;
                }
            }
            return false;
        }

        let (ordered, bounds) = self.greedy_color(&candidates);
        for i in (0..ordered.len()).rev() {
            // Colors ascend along `ordered`, so once one position fails the
            // bound every earlier one does too.
            if current.len() + bounds[i] <= self.best.len() {
                return false;
            }
            let v = ordered[i];
            let next: Vec<usize> = ordered[..i]
                .iter()
                .copied()
                .filter(|&w| self.adjacency[v].contains(&w))
                .collect();
            current.push(v);
            let stop = self.expand(current, next);
            current.pop();
            if stop {
                return true;
            }
        }
        false
    }

    /// Greedy coloring of the candidate set. Returns the candidates ordered
    /// by ascending color class together with the 1-based color of each
    /// position; the color is an upper bound on the largest clique inside
    /// the candidates up to that position.
    fn greedy_color(&self, candidates: &[usize]) -> (Vec<usize>, Vec<usize>) {
        let mut classes: Vec<Vec<usize>> = Vec::new();
        for &v in candidates {
            let slot = classes
                .iter_mut()
                .find(|class| class.iter().all(|&w| !self.adjacency[v].contains(&w)));
            match slot {
                Some(class) => class.push(v),
                None => classes.push(vec![v]),
            }
        }

        let mut ordered = Vec::with_capacity(candidates.len());
        let mut bounds = Vec::with_capacity(candidates.len());
        for (index, class) in classes.iter().enumerate() {
            for &v in class {
                ordered.push(v);
                bounds.push(index + 1);
            }
        }
        (ordered, bounds)
    }

    fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    fn target_reached(&self) -> bool {
        self.targetsize.is_some_and(|t| self.best.len() >= t)
    }
}
