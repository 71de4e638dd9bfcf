//! High-level matching and maximum common substructure API.
//!
//! This crate wires the generic engines together for molecular graphs:
//! exact and substructure matching with the standard predicate generators
//! ([`has_exact_match`], [`has_substruct_match`] and the underlying lazy
//! iterators), and MCS search by reduction to maximum clique over a
//! modular product graph ([`disconnected_mcis`], [`connected_mces`],
//! [`tcmcis`], ...). Custom predicates go through the re-exported engine
//! entry points directly.

mod matching;
mod mcs;
mod product;

pub use matching::{
    exact_matches, has_exact_match, has_query_match, has_substruct_match, query_substruct_matches,
    substruct_matches,
};
pub use mcs::{
    McsResult, connected_mces, connected_mcis, disconnected_mces, disconnected_mcis,
    find_mces_with, find_mcis_with, tcmces, tcmces_size, tcmces_tanimoto, tcmcis, tcmcis_size,
    tcmcis_tanimoto,
};

pub use molgraph_clique::{
    CliqueOptions, EdgeLabels, all_maximal_cliques, all_maximal_conn_cliques, maximum_clique,
    maximum_conn_clique,
};
pub use molgraph_common::{
    Atom, Bond, Graph, MatchOptions, McsOptions, MolGraphError, Molecule, QueryAtom, QueryBond,
    QueryMolecule, SearchStatus,
};
pub use molgraph_subgraph::{
    AtomMapping, MatchIter, MatchKind, compat, edge_induced_matches, emap_to_nmap, isomorphisms,
    line_graph, monomorphisms, node_induced_matches,
};
