//! Conversion of edge mappings back to vertex mappings.

use indexmap::IndexMap;
use molgraph_common::{Graph, MolGraphError};
use std::collections::{BTreeMap, BTreeSet};

/// Convert an edge mapping (query edge -> target edge) into a vertex
/// mapping (query vertex -> target vertex).
///
/// Each query vertex collects, per incident mapped edge, the pair of target
/// endpoints that edge allows. Vertices touched by two or more mapped edges
/// are pinned by intersecting those pairs; vertices with a single incident
/// mapped edge are ambiguous between its two endpoints and are resolved
/// afterwards by discarding endpoints already claimed, smallest first.
///
/// Errors with a precondition violation when the query has more vertices
/// than the target, or when the supplied edge mapping is internally
/// inconsistent (no unique endpoint assignment exists).
pub fn emap_to_nmap<V1, E1, V2, E2>(
    emap: &IndexMap<usize, usize>,
    target: &Graph<V1, E1>,
    query: &Graph<V2, E2>,
) -> Result<IndexMap<usize, usize>, MolGraphError> {
    if query.node_count() > target.node_count() {
        return Err(MolGraphError::Precondition(format!(
            "cannot map {} query vertices into {} target vertices",
            query.node_count(),
            target.node_count()
        )));
    }

    let mut choices: BTreeMap<usize, Vec<BTreeSet<usize>>> = BTreeMap::new();
    for (&qe, &te) in emap {
        let (qu, qv) = query.endpoints(qe);
        let (tu, tv) = target.endpoints(te);
        let endpoints = BTreeSet::from([tu, tv]);
        choices.entry(qu).or_default().push(endpoints.clone());
        choices.entry(qv).or_default().push(endpoints);
    }

    let mut resolved: IndexMap<usize, usize> = IndexMap::new();
    let mut claimed: BTreeSet<usize> = BTreeSet::new();
    let mut ambiguous: Vec<(usize, BTreeSet<usize>)> = Vec::new();

    for (q, sets) in &choices {
        if sets.len() < 2 {
            ambiguous.push((*q, sets[0].clone()));
            continue;
        }
        let mut iter = sets.iter();
        let mut intersection = iter.next().cloned().unwrap_or_default();
        for set in iter {
            intersection.retain(|t| set.contains(t));
        }
        if intersection.len() != 1 {
            return Err(MolGraphError::Precondition(format!(
                "edge mapping implies no unique target for query vertex {}",
                q
            )));
        }
        let only = *intersection.iter().next().expect("singleton");
        resolved.insert(*q, only);
        claimed.insert(only);
    }

    for (q, endpoints) in ambiguous {
        let pick = endpoints.iter().copied().find(|t| !claimed.contains(t));
        let Some(t) = pick else {
            return Err(MolGraphError::Precondition(format!(
                "edge mapping leaves no target endpoint for query vertex {}",
                q
            )));
        };
        resolved.insert(q, t);
        claimed.insert(t);
    }

    resolved.sort_keys();
    Ok(resolved)
}

/// Whether a recovered vertex mapping is an injective morphism consistent
/// with the edge mapping it came from: every mapped query edge must land
/// exactly on its target edge's endpoints.
pub(crate) fn nmap_is_consistent<V1, E1, V2, E2>(
    nmap: &IndexMap<usize, usize>,
    emap: &IndexMap<usize, usize>,
    target: &Graph<V1, E1>,
    query: &Graph<V2, E2>,
) -> bool {
    let images: BTreeSet<usize> = nmap.values().copied().collect();
    if images.len() != nmap.len() {
        return false;
    }
    emap.iter().all(|(&qe, &te)| {
        let (qu, qv) = query.endpoints(qe);
        let (tu, tv) = target.endpoints(te);
        match (nmap.get(&qu), nmap.get(&qv)) {
            (Some(&a), Some(&b)) => (a == tu && b == tv) || (a == tv && b == tu),
            _ => false,
        }
    })
}
