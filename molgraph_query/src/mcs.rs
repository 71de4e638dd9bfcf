//! Maximum common substructure search by clique reduction.
//!
//! MCIS reduces to maximum clique over the node product, MCES over the
//! edge product (see [`crate::product`]). `connected = true` routes
//! through the connection-constrained clique engine so the reported
//! fragment is contiguous; `topological = true` (the tc variants) gates
//! product edges on comparable pairwise distances, which prunes
//! correspondences between elements that are close in one molecule and far
//! apart in the other.

use crate::product::{ProductGraph, TopoGate, edge_product, node_product};
use molgraph_clique::{CliqueOptions, maximum_clique, maximum_conn_clique};
use molgraph_common::{Graph, McsOptions, Molecule, SearchStatus};
use molgraph_subgraph::compat::PlainMatchers;
use molgraph_subgraph::line_graph;
use serde::Serialize;
use tracing::info;

/// Result of an MCS search: the common-substructure mapping plus how the
/// search ended. The mapping holds node pairs for MCIS and edge pairs for
/// MCES, `(index in g1, index in g2)` either way.
///
/// Only an [`SearchStatus::Exhaustive`] status proves the mapping maximum;
/// size- and time-capped results are valid common substructures that may
/// be smaller than the optimum.
#[derive(Debug, Clone, Serialize)]
pub struct McsResult {
    /// Matched element pairs.
    pub mapping: Vec<(usize, usize)>,
    /// How the underlying clique search ended.
    pub status: SearchStatus,
}

impl McsResult {
    /// Number of matched element pairs.
    pub fn size(&self) -> usize {
        self.mapping.len()
    }
}

fn clique_options(options: &McsOptions) -> CliqueOptions {
    CliqueOptions {
        timeout: options.timeout,
        targetsize: options.targetsize,
    }
}

fn solve(product: &ProductGraph, options: &McsOptions) -> McsResult {
    let result = if options.connected {
        maximum_conn_clique(&product.graph, &product.labels, &clique_options(options))
    } else {
        maximum_clique(&product.graph, &clique_options(options))
    };
    let mapping: Vec<(usize, usize)> = result
        .clique
        .iter()
        .map(|&i| *product.graph.node(i))
        .collect();
    McsResult {
        mapping,
        status: result.status,
    }
}

/// Maximum common induced (node) substructure with caller-supplied
/// predicates. All option flags are honored as given.
pub fn find_mcis_with<V1, E1, V2, E2, VM, EM>(
    g1: &Graph<V1, E1>,
    g2: &Graph<V2, E2>,
    vmatch: VM,
    ematch: EM,
    options: &McsOptions,
) -> McsResult
where
    VM: Fn(usize, usize) -> bool,
    EM: Fn(usize, usize) -> bool,
{
    let gate = options
        .topological
        .then(|| TopoGate::new(g1, g2, options.diameter, options.tolerance));
    let product = node_product(g1, g2, vmatch, ematch, gate.as_ref());
    info!(
        product_nodes = product.graph.node_count(),
        product_edges = product.graph.edge_count(),
        connected = options.connected,
        topological = options.topological,
        "mcis product graph built"
    );
    solve(&product, options)
}

/// Maximum common edge substructure with caller-supplied predicates. All
/// option flags are honored as given. Topological distances are measured
/// between edges, i.e. on the line graphs.
pub fn find_mces_with<V1, E1, V2, E2, VM, EM>(
    g1: &Graph<V1, E1>,
    g2: &Graph<V2, E2>,
    vmatch: VM,
    ematch: EM,
    options: &McsOptions,
) -> McsResult
where
    VM: Fn(usize, usize) -> bool,
    EM: Fn(usize, usize) -> bool,
{
    let gate = options.topological.then(|| {
        let lines1 = line_graph(g1);
        let lines2 = line_graph(g2);
        TopoGate::new(&lines1, &lines2, options.diameter, options.tolerance)
    });
    let product = edge_product(g1, g2, vmatch, ematch, gate.as_ref());
    info!(
        product_nodes = product.graph.node_count(),
        product_edges = product.graph.edge_count(),
        connected = options.connected,
        topological = options.topological,
        "mces product graph built"
    );
    solve(&product, options)
}

fn plain_mcis(g1: &Molecule, g2: &Molecule, options: &McsOptions) -> McsResult {
    let matchers = PlainMatchers::new(g1, g2);
    find_mcis_with(
        g1,
        g2,
        |a, b| matchers.vmatch(a, b),
        |e, f| matchers.ematch(e, f),
        options,
    )
}

fn plain_mces(g1: &Molecule, g2: &Molecule, options: &McsOptions) -> McsResult {
    let matchers = PlainMatchers::new(g1, g2);
    find_mces_with(
        g1,
        g2,
        |a, b| matchers.vmatch(a, b),
        |e, f| matchers.ematch(e, f),
        options,
    )
}

/// MCIS without the connectivity constraint: the common substructure may be
/// a disconnected union of fragments.
pub fn disconnected_mcis(g1: &Molecule, g2: &Molecule, options: &McsOptions) -> McsResult {
    let options = options.clone().connected(false).topological(false);
    plain_mcis(g1, g2, &options)
}

/// MCES without the connectivity constraint.
pub fn disconnected_mces(g1: &Molecule, g2: &Molecule, options: &McsOptions) -> McsResult {
    let options = options.clone().connected(false).topological(false);
    plain_mces(g1, g2, &options)
}

/// MCIS constrained to a single connected common fragment.
pub fn connected_mcis(g1: &Molecule, g2: &Molecule, options: &McsOptions) -> McsResult {
    let options = options.clone().connected(true).topological(false);
    plain_mcis(g1, g2, &options)
}

/// MCES constrained to a single connected common fragment.
pub fn connected_mces(g1: &Molecule, g2: &Molecule, options: &McsOptions) -> McsResult {
    let options = options.clone().connected(true).topological(false);
    plain_mces(g1, g2, &options)
}

/// Topologically constrained MCIS (Kawabata): matched atoms must sit at
/// comparable graph distances in both molecules.
pub fn tcmcis(g1: &Molecule, g2: &Molecule, options: &McsOptions) -> McsResult {
    let options = options.clone().connected(false).topological(true);
    plain_mcis(g1, g2, &options)
}

/// Topologically constrained MCES.
pub fn tcmces(g1: &Molecule, g2: &Molecule, options: &McsOptions) -> McsResult {
    let options = options.clone().connected(false).topological(true);
    plain_mces(g1, g2, &options)
}

/// Size of the topologically constrained MCIS.
pub fn tcmcis_size(g1: &Molecule, g2: &Molecule, options: &McsOptions) -> usize {
    tcmcis(g1, g2, options).size()
}

/// Size of the topologically constrained MCES.
pub fn tcmces_size(g1: &Molecule, g2: &Molecule, options: &McsOptions) -> usize {
    tcmces(g1, g2, options).size()
}

/// Tanimoto similarity over atom counts:
/// `|mcs| / (|g1| + |g2| - |mcs|)`, from the topologically constrained
/// MCIS. Empty inputs score 0.
pub fn tcmcis_tanimoto(g1: &Molecule, g2: &Molecule, options: &McsOptions) -> f64 {
    let size = tcmcis(g1, g2, options).size() as f64;
    let denominator = (g1.node_count() + g2.node_count()) as f64 - size;
    if denominator == 0.0 { 0.0 } else { size / denominator }
}

/// Tanimoto similarity over bond counts, from the topologically
/// constrained MCES. Empty inputs score 0.
pub fn tcmces_tanimoto(g1: &Molecule, g2: &Molecule, options: &McsOptions) -> f64 {
    let size = tcmces(g1, g2, options).size() as f64;
    let denominator = (g1.edge_count() + g2.edge_count()) as f64 - size;
    if denominator == 0.0 { 0.0 } else { size / denominator }
}
