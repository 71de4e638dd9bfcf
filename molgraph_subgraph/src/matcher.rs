//! The backtracking match iterator.
//!
//! The search is a state machine over the partial mapping: while the
//! frontier has viable candidates it keeps extending; when a query vertex
//! runs out of candidates it backtracks; covering the whole query order is
//! a success, which yields one mapping and resumes on the next pull; an
//! empty frame stack means the space is exhausted. Backtracking is an
//! explicit frame stack rather than recursion so that timeout abort and
//! yield/resume are plain control flow.

use crate::graph_index::GraphIndex;
use crate::prefilter::structure_compatible;
use crate::state::State;
use crate::utils::intersect_sets;
use indexmap::IndexMap;
use molgraph_common::{Graph, MatchOptions};
use std::collections::{HashMap, HashSet};
use std::time::Instant;
use tracing::{debug, info, trace};

/// A query -> target vertex mapping in commit order.
pub type AtomMapping = IndexMap<usize, usize>;

/// Which acceptance rule the state machine applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Bijection covering both graphs, degree-preserving in both directions.
    Isomorphism,
    /// Injection of the whole query; extra target edges are allowed.
    Monomorphism,
    /// Injection of the whole query; the induced target subgraph must have
    /// exactly the query's edges.
    NodeInduced,
}

struct Frame {
    candidates: Vec<usize>,
    cursor: usize,
}

/// Lazy sequence of mappings from one backtracking search.
///
/// Once exhausted the iterator stays empty; restarting requires a fresh
/// search. Expiry of the wall-clock budget ends the sequence early without
/// an error; mappings yielded before expiry remain valid.
pub struct MatchIter<'a, V1, E1, V2, E2, VM, EM> {
    target: &'a Graph<V1, E1>,
    query: &'a Graph<V2, E2>,
    target_index: GraphIndex,
    query_index: GraphIndex,
    kind: MatchKind,
    vmatch: VM,
    ematch: EM,
    order: Vec<usize>,
    state: State,
    stack: Vec<Frame>,
    mandatory: HashMap<usize, usize>,
    mandatory_rev: HashMap<usize, usize>,
    forbidden: HashSet<(usize, usize)>,
    deadline: Option<Instant>,
    started: bool,
    done: bool,
}

impl<'a, V1, E1, V2, E2, VM, EM> MatchIter<'a, V1, E1, V2, E2, VM, EM>
where
    VM: Fn(usize, usize) -> bool,
    EM: Fn(usize, usize) -> bool,
{
    pub(crate) fn new(
        target: &'a Graph<V1, E1>,
        query: &'a Graph<V2, E2>,
        kind: MatchKind,
        vmatch: VM,
        ematch: EM,
        options: &MatchOptions,
    ) -> Self {
        let feasible = structure_compatible(target, query, kind);
        if !feasible {
            debug!(?kind, "pre-filters reject the pair, search skipped");
        }
        info!(
            target_nodes = target.node_count(),
            query_nodes = query.node_count(),
            ?kind,
            "starting subgraph search"
        );

        let mandatory_rev = options
            .mandatory
            .iter()
            .map(|(&q, &t)| (t, q))
            .collect();

        MatchIter {
            target_index: GraphIndex::build(target),
            query_index: GraphIndex::build(query),
            target,
            query,
            kind,
            vmatch,
            ematch,
            order: query_order(query),
            state: State::new(query.node_count(), target.node_count()),
            stack: Vec::new(),
            mandatory: options.mandatory.clone(),
            mandatory_rev,
            forbidden: options.forbidden.clone(),
            deadline: options.timeout.map(|t| Instant::now() + t),
            started: false,
            done: !feasible,
        }
    }

    fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// All acceptance checks for the tentative pair `(q, t)`.
    fn feasible_pair(&self, q: usize, t: usize) -> bool {
        if self.state.target_mapped(t) {
            return false;
        }
        if let Some(&required) = self.mandatory.get(&q) {
            if required != t {
                return false;
            }
        }
        if let Some(&owner) = self.mandatory_rev.get(&t) {
            if owner != q {
                return false;
            }
        }
        if self.forbidden.contains(&(q, t)) {
            return false;
        }

        let query_degree = self.query_index.degree(q);
        let target_degree = self.target_index.degree(t);
        let degree_ok = match self.kind {
            MatchKind::Isomorphism => target_degree == query_degree,
            _ => target_degree >= query_degree,
        };
        if !degree_ok {
            return false;
        }

        if !(self.vmatch)(t, q) {
            return false;
        }

        // Every already-mapped query neighbor must be mirrored by a
        // compatible target edge.
        for (qn, qe) in self.query.neighbors(q) {
            if let Some(tn) = self.state.query_image(qn) {
                let Some(te) = self.target.edge_between(t, tn) else {
                    return false;
                };
                if !(self.ematch)(te, qe) {
                    return false;
                }
            }
        }

        // For induced flavors, target edges into the mapped region must be
        // prescribed by the query as well.
        if self.kind != MatchKind::Monomorphism {
            for (tn, _) in self.target.neighbors(t) {
                if let Some(qn) = self.state.target_preimage(tn) {
                    if !self.query.has_edge(q, qn) {
                        return false;
                    }
                }
            }
        }

        self.lookahead(q, t)
    }

    /// One-step look-ahead over the unmapped neighbors of the pair, split
    /// into frontier (adjacent to the mapped region) and fresh vertices.
    fn lookahead(&self, q: usize, t: usize) -> bool {
        let (mut query_frontier, mut query_fresh) = (0usize, 0usize);
        for (qn, _) in self.query.neighbors(q) {
            if !self.state.query_mapped(qn) {
                if self.state.query_marked(qn) {
                    query_frontier += 1;
                } else {
                    query_fresh += 1;
                }
            }
        }
        let (mut target_frontier, mut target_fresh) = (0usize, 0usize);
        for (tn, _) in self.target.neighbors(t) {
            if !self.state.target_mapped(tn) {
                if self.state.target_marked(tn) {
                    target_frontier += 1;
                } else {
                    target_fresh += 1;
                }
            }
        }

        match self.kind {
            MatchKind::Isomorphism => {
                target_frontier == query_frontier && target_fresh == query_fresh
            }
            MatchKind::NodeInduced => {
                target_frontier >= query_frontier && target_fresh >= query_fresh
            }
            // A fresh query neighbor may still land on a frontier target
            // vertex when extra target edges are allowed.
            MatchKind::Monomorphism => {
                target_frontier >= query_frontier
                    && target_frontier + target_fresh >= query_frontier + query_fresh
            }
        }
    }

    /// Candidate target vertices for the query vertex `q`, restricted to
    /// the intersection of the neighborhoods of its mapped neighbors'
    /// images. The first vertex of each query component sees every unmapped
    /// target vertex; that is unavoidable.
    fn candidates_for(&self, q: usize) -> Vec<usize> {
        let mapped_images: Vec<usize> = self
            .query
            .neighbors(q)
            .filter_map(|(qn, _)| self.state.query_image(qn))
            .collect();

        let mut candidates: Vec<usize> = if mapped_images.is_empty() {
            (0..self.target.node_count())
                .filter(|&t| !self.state.target_mapped(t))
                .collect()
        } else {
            let neighborhoods: Vec<&HashSet<usize>> = mapped_images
                .iter()
                .map(|&t| self.target_index.neighbors(t))
                .collect();
            intersect_sets(neighborhoods)
                .into_iter()
                .filter(|&t| !self.state.target_mapped(t))
                .collect()
        };
        candidates.sort_unstable();

        trace!(query = q, count = candidates.len(), "candidate set");
        candidates
    }
}

impl<V1, E1, V2, E2, VM, EM> Iterator for MatchIter<'_, V1, E1, V2, E2, VM, EM>
where
    VM: Fn(usize, usize) -> bool,
    EM: Fn(usize, usize) -> bool,
{
    type Item = AtomMapping;

    fn next(&mut self) -> Option<AtomMapping> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            if self.order.is_empty() {
                // Vacuous match: an empty query maps into anything (the
                // exact flavor already required an empty target).
                self.done = true;
                return Some(AtomMapping::new());
            }
            let first = self.candidates_for(self.order[0]);
            self.stack.push(Frame {
                candidates: first,
                cursor: 0,
            });
        }

        loop {
            if self.expired() {
                debug!("search budget expired, ending mapping sequence");
                self.done = true;
                return None;
            }

            let depth = self.state.len();
            let candidate = match self.stack.last_mut() {
                None => {
                    self.done = true;
                    return None;
                }
                Some(frame) if frame.cursor < frame.candidates.len() => {
                    frame.cursor += 1;
                    Some(frame.candidates[frame.cursor - 1])
                }
                Some(_) => None,
            };

            let Some(t) = candidate else {
                // No viable candidate left at this depth: backtrack.
                self.stack.pop();
                if let Some((q, t)) = self.state.last_pair() {
                    self.state
                        .unmap(q, t, &self.query_index, &self.target_index);
                }
                if self.stack.is_empty() {
                    self.done = true;
                    debug!("search space exhausted");
                    return None;
                }
                continue;
            };

            let q = self.order[depth];
            if !self.feasible_pair(q, t) {
                continue;
            }

            trace!(query = q, candidate = t, depth, "commit pair");
            self.state
                .map(q, t, &self.query_index, &self.target_index);

            if self.state.len() == self.order.len() {
                // Success. Pop the final pair right away so the next pull
                // resumes from the same frame's remaining candidates.
                let mapping = self.state.mapping();
                self.state
                    .unmap(q, t, &self.query_index, &self.target_index);
                return Some(mapping);
            }

            let next_candidates = self.candidates_for(self.order[self.state.len()]);
            self.stack.push(Frame {
                candidates: next_candidates,
                cursor: 0,
            });
        }
    }
}

/// Fixed query visit order: most-constrained-first. The first vertex is the
/// highest-degree one; each following pick maximizes the number of already
/// ordered neighbors (most constrained candidate set), then degree, with
/// vertex id as the final tie-break.
fn query_order<V, E>(query: &Graph<V, E>) -> Vec<usize> {
    let n = query.node_count();
    let mut order = Vec::with_capacity(n);
    let mut placed = vec![false; n];

    while order.len() < n {
        let mut best: Option<(usize, (usize, usize))> = None;
        for v in 0..n {
            if placed[v] {
                continue;
            }
            let anchored = query.neighbors(v).filter(|&(w, _)| placed[w]).count();
            let key = (anchored, query.degree(v));
            let better = match best {
                None => true,
                Some((_, best_key)) => key > best_key,
            };
            if better {
                best = Some((v, key));
            }
        }
        let (v, _) = best.expect("an unplaced vertex exists");
        placed[v] = true;
        order.push(v);
    }
    order
}
