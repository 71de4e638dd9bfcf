//! Partial mapping state of one backtracking search.
//!
//! Forward and backward maps are sentinel vectors (`usize::MAX` means
//! unmapped); committed pairs are kept in commit order for undo and result
//! extraction. Each side also carries frontier marks: a vertex is marked
//! when it is adjacent to at least one mapped vertex, stamped with the
//! depth that introduced it so backtracking can clear exactly its own
//! marks. The look-ahead prune reads these marks.

use crate::graph_index::GraphIndex;
use crate::matcher::AtomMapping;

const UNMAPPED: usize = usize::MAX;

pub(crate) struct State {
    query_map: Vec<usize>,
    target_map: Vec<usize>,
    pairs: Vec<(usize, usize)>,
    query_marks: Vec<usize>,
    target_marks: Vec<usize>,
}

impl State {
    pub(crate) fn new(query_nodes: usize, target_nodes: usize) -> Self {
        State {
            query_map: vec![UNMAPPED; query_nodes],
            target_map: vec![UNMAPPED; target_nodes],
            pairs: Vec::with_capacity(query_nodes),
            query_marks: vec![0; query_nodes],
            target_marks: vec![0; target_nodes],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.pairs.len()
    }

    pub(crate) fn query_image(&self, q: usize) -> Option<usize> {
        (self.query_map[q] != UNMAPPED).then_some(self.query_map[q])
    }

    pub(crate) fn target_preimage(&self, t: usize) -> Option<usize> {
        (self.target_map[t] != UNMAPPED).then_some(self.target_map[t])
    }

    pub(crate) fn query_mapped(&self, q: usize) -> bool {
        self.query_map[q] != UNMAPPED
    }

    pub(crate) fn target_mapped(&self, t: usize) -> bool {
        self.target_map[t] != UNMAPPED
    }

    pub(crate) fn query_marked(&self, q: usize) -> bool {
        self.query_marks[q] != 0
    }

    pub(crate) fn target_marked(&self, t: usize) -> bool {
        self.target_marks[t] != 0
    }

    pub(crate) fn last_pair(&self) -> Option<(usize, usize)> {
        self.pairs.last().copied()
    }

    /// Commit the pair `(q, t)` and stamp newly reachable frontier vertices.
    #[contracts::debug_requires(!self.query_mapped(q) && !self.target_mapped(t))]
    #[contracts::debug_ensures(self.query_mapped(q) && self.target_mapped(t))]
    pub(crate) fn map(
        &mut self,
        q: usize,
        t: usize,
        query_index: &GraphIndex,
        target_index: &GraphIndex,
    ) {
        self.pairs.push((q, t));
        self.query_map[q] = t;
        self.target_map[t] = q;

        let depth = self.pairs.len();
        for &qn in query_index.neighbors(q) {
            if self.query_marks[qn] == 0 {
                self.query_marks[qn] = depth;
            }
        }
        for &tn in target_index.neighbors(t) {
            if self.target_marks[tn] == 0 {
                self.target_marks[tn] = depth;
            }
        }
    }

    /// Undo the most recent commit, which must be `(q, t)`.
    #[contracts::debug_requires(self.last_pair() == Some((q, t)))]
    #[contracts::debug_ensures(!self.query_mapped(q) && !self.target_mapped(t))]
    pub(crate) fn unmap(
        &mut self,
        q: usize,
        t: usize,
        query_index: &GraphIndex,
        target_index: &GraphIndex,
    ) {
        let depth = self.pairs.len();
        for &qn in query_index.neighbors(q) {
            if self.query_marks[qn] == depth {
                self.query_marks[qn] = 0;
            }
        }
        for &tn in target_index.neighbors(t) {
            if self.target_marks[tn] == depth {
                self.target_marks[tn] = 0;
            }
        }

        self.pairs.pop();
        self.query_map[q] = UNMAPPED;
        self.target_map[t] = UNMAPPED;
    }

    /// The committed pairs as a query -> target mapping, in commit order.
    pub(crate) fn mapping(&self) -> AtomMapping {
        self.pairs.iter().copied().collect()
    }
}
