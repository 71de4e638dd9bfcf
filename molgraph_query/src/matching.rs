//! Exact and substructure matching entry points for molecular graphs.

use molgraph_common::{MatchOptions, MolGraphError, Molecule, QueryMolecule};
use molgraph_subgraph::compat::{PlainMatchers, QueryMatchers, SubQueryResolver};
use molgraph_subgraph::{AtomMapping, isomorphisms, monomorphisms};
use std::rc::Rc;

/// Lazily enumerate exact isomorphisms between two plain molecules using
/// the standard descriptor-equality predicates.
pub fn exact_matches<'a>(
    target: &'a Molecule,
    query: &'a Molecule,
    options: &MatchOptions,
) -> impl Iterator<Item = AtomMapping> + 'a {
    let matchers = Rc::new(PlainMatchers::new(target, query));
    let vm = {
        let m = Rc::clone(&matchers);
        move |t: usize, q: usize| m.vmatch(t, q)
    };
    let em = move |te: usize, qe: usize| matchers.ematch(te, qe);
    isomorphisms(target, query, vm, em, options)
}

/// Whether the two molecules are exactly isomorphic under the standard
/// predicates.
pub fn has_exact_match(target: &Molecule, query: &Molecule, options: &MatchOptions) -> bool {
    exact_matches(target, query, options).next().is_some()
}

/// Lazily enumerate substructure matches of `query` inside `target` using
/// the standard descriptor-equality predicates.
pub fn substruct_matches<'a>(
    target: &'a Molecule,
    query: &'a Molecule,
    options: &MatchOptions,
) -> impl Iterator<Item = AtomMapping> + 'a {
    let matchers = Rc::new(PlainMatchers::new(target, query));
    let vm = {
        let m = Rc::clone(&matchers);
        move |t: usize, q: usize| m.vmatch(t, q)
    };
    let em = move |te: usize, qe: usize| matchers.ematch(te, qe);
    monomorphisms(target, query, vm, em, options)
}

/// Whether `query` occurs as a substructure of `target`.
pub fn has_substruct_match(target: &Molecule, query: &Molecule, options: &MatchOptions) -> bool {
    substruct_matches(target, query, options).next().is_some()
}

/// Lazily enumerate substructure matches of a formula-based query inside a
/// plain molecule. Recursive sub-queries are resolved through `resolver`
/// before the search starts, so invalid queries fail here, not mid-search.
pub fn query_substruct_matches<'a>(
    target: &'a Molecule,
    query: &'a QueryMolecule,
    resolver: Rc<dyn SubQueryResolver + 'a>,
    options: &MatchOptions,
) -> Result<impl Iterator<Item = AtomMapping> + 'a, MolGraphError> {
    let matchers = Rc::new(QueryMatchers::new(target, query, resolver)?);
    let vm = {
        let m = Rc::clone(&matchers);
        move |t: usize, q: usize| m.vmatch(t, q)
    };
    let em = move |te: usize, qe: usize| matchers.ematch(te, qe);
    Ok(monomorphisms(target, query, vm, em, options))
}

/// Whether the formula-based `query` occurs as a substructure of `target`.
pub fn has_query_match(
    target: &Molecule,
    query: &QueryMolecule,
    resolver: Rc<dyn SubQueryResolver + '_>,
    options: &MatchOptions,
) -> Result<bool, MolGraphError> {
    Ok(query_substruct_matches(target, query, resolver, options)?
        .next()
        .is_some())
}
