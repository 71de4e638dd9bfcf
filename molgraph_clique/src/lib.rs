//! Clique search over undirected graphs.
//!
//! Two families of routines:
//! - plain: [`maximum_clique`] (branch-and-bound with a greedy coloring
//!   bound) and [`all_maximal_cliques`] (Bron-Kerbosch with pivoting);
//! - connection-constrained: [`maximum_conn_clique`] and
//!   [`all_maximal_conn_cliques`], where a candidate may only extend the
//!   growing clique through a `true`-labeled edge into it, so the reported
//!   clique induces a connected subgraph of the labeled edge subset.
//!
//! The MCS search in `molgraph_query` reduces common-substructure finding
//! to these routines over a product graph; the connection-constrained
//! variants are what make "the common fragment must be contiguous" hold.
//!
//! All routines are pure functions over finite graphs. Null and edgeless
//! graphs are valid inputs with trivial results, never errors.

mod config;
mod connected;
mod engine;
mod enumerate;
mod maximum;

#[cfg(test)]
mod testutil;

pub use config::CliqueOptions;
pub use connected::{EdgeLabels, all_maximal_conn_cliques, maximum_conn_clique};
pub use enumerate::all_maximal_cliques;
pub use maximum::{CliqueResult, maximum_clique};
