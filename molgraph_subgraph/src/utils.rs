//! Utility functions for the subgraph matcher.

use std::collections::HashSet;

/// Computes the intersection of a list of borrowed sets.
pub(crate) fn intersect_sets(mut items: Vec<&HashSet<usize>>) -> HashSet<usize> {
    let Some(first) = items.pop() else {
        return HashSet::new();
    };
    items
        .iter()
        .fold(first.clone(), |acc, hs| acc.intersection(hs).copied().collect())
}
