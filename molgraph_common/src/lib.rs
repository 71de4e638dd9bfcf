//! Shared data model and configuration for the molgraph workspace.
//!
//! This crate carries everything the engine crates (`molgraph_clique`,
//! `molgraph_subgraph`, `molgraph_query`) agree on but none of them owns:
//! the attributed graph representation, the molecular descriptor records,
//! SMARTS-style query formula trees, search options, result status flags
//! and the error taxonomy. It contains no search code.

mod config;
mod error;
mod graph;
mod molecule;
mod query;
mod status;

pub use config::{MatchOptions, McsOptions, DEFAULT_MATCH_TIMEOUT, DEFAULT_MCS_TIMEOUT};
pub use error::MolGraphError;
pub use graph::{Edge, Graph};
pub use molecule::{Atom, Bond, Molecule};
pub use query::{QueryAtom, QueryBond, QueryMolecule};
pub use status::SearchStatus;
