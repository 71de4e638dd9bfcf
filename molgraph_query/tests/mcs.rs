//! End-to-end MCS behavior over small molecules.

use molgraph_query::{
    Atom, Bond, McsOptions, McsResult, Molecule, SearchStatus, connected_mces, connected_mcis,
    disconnected_mces, disconnected_mcis, tcmces, tcmces_size, tcmces_tanimoto, tcmcis,
    tcmcis_tanimoto,
};
use std::collections::BTreeSet;
use std::sync::OnceLock;
use std::time::Duration;

fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn carbon_chain(n: usize) -> Molecule {
    let mut mol = Molecule::new();
    for i in 0..n {
        let hydrogens = if i == 0 || i + 1 == n { 3 } else { 2 };
        mol.add_node(Atom::new("C").with_hydrogens(hydrogens));
    }
    for i in 1..n {
        mol.add_edge(i - 1, i, Bond::single());
    }
    mol
}

/// 2-butene-like chain: single, double, single bonds.
fn crossed_chain() -> Molecule {
    let mut mol = Molecule::new();
    for _ in 0..4 {
        mol.add_node(Atom::new("C"));
    }
    mol.add_edge(0, 1, Bond::single());
    mol.add_edge(1, 2, Bond::double());
    mol.add_edge(2, 3, Bond::single());
    mol
}

/// Two disjoint C-C fragments in one graph.
fn disjoint_ethanes() -> Molecule {
    let mut mol = Molecule::new();
    for _ in 0..4 {
        mol.add_node(Atom::new("C"));
    }
    mol.add_edge(0, 1, Bond::single());
    mol.add_edge(2, 3, Bond::single());
    mol
}

/// Whether a mapped vertex set induces one connected fragment in `mol`.
fn image_is_connected(mol: &Molecule, nodes: &BTreeSet<usize>) -> bool {
    let Some(&start) = nodes.iter().next() else {
        return true;
    };
    let mut seen = BTreeSet::from([start]);
    let mut stack = vec![start];
    while let Some(v) = stack.pop() {
        for (w, _) in mol.neighbors(v) {
            if nodes.contains(&w) && seen.insert(w) {
                stack.push(w);
            }
        }
    }
    seen.len() == nodes.len()
}

#[test]
fn identical_molecules_share_everything() {
    init_test_logger();
    let butane = carbon_chain(4);
    let options = McsOptions::default();

    let mcis = disconnected_mcis(&butane, &butane, &options);
    assert_eq!(mcis.size(), 4);
    assert!(mcis.status.is_exhaustive());

    let mces = disconnected_mces(&butane, &butane, &options);
    assert_eq!(mces.size(), 3);
    assert!(mces.status.is_exhaustive());
}

#[test]
fn chain_against_shorter_chain() {
    init_test_logger();
    let butane = carbon_chain(4);
    let propane = carbon_chain(3);
    let options = McsOptions::default();

    assert_eq!(disconnected_mcis(&butane, &propane, &options).size(), 3);
    assert_eq!(disconnected_mces(&butane, &propane, &options).size(), 2);
}

#[test]
fn disconnected_mces_may_beat_connected_mces() {
    init_test_logger();
    let chain = crossed_chain();
    let fragments = disjoint_ethanes();
    let options = McsOptions::default();

    // The two single bonds match as a disconnected pair...
    let loose = disconnected_mces(&chain, &fragments, &options);
    assert_eq!(loose.size(), 2);

    // ...but only one at a time as a connected fragment.
    let tight = connected_mces(&chain, &fragments, &options);
    assert_eq!(tight.size(), 1);
    assert!(loose.size() >= tight.size());
}

#[test]
fn connected_mcis_image_is_one_fragment() {
    init_test_logger();
    let chain = crossed_chain();
    let fragments = disjoint_ethanes();
    let options = McsOptions::default();

    let loose = disconnected_mcis(&chain, &fragments, &options);
    assert_eq!(loose.size(), 3);

    let tight = connected_mcis(&chain, &fragments, &options);
    assert_eq!(tight.size(), 2);

    let g1_image: BTreeSet<usize> = tight.mapping.iter().map(|&(a, _)| a).collect();
    let g2_image: BTreeSet<usize> = tight.mapping.iter().map(|&(_, b)| b).collect();
    assert!(image_is_connected(&chain, &g1_image));
    assert!(image_is_connected(&fragments, &g2_image));
}

#[test]
fn zero_timeout_is_flagged_not_an_error() {
    init_test_logger();
    let butane = carbon_chain(4);
    let options = McsOptions::default().with_timeout(Duration::ZERO);

    let result: McsResult = disconnected_mcis(&butane, &butane, &options);
    assert_eq!(result.status, SearchStatus::TimedOut);
    assert!(!result.status.is_exhaustive());
    assert!(result.size() <= 4);
}

#[test]
fn targetsize_caps_the_search() {
    init_test_logger();
    let butane = carbon_chain(4);
    let options = McsOptions::default().with_targetsize(2);

    let result = disconnected_mcis(&butane, &butane, &options);
    assert_eq!(result.status, SearchStatus::TargetReached);
    assert!(result.size() >= 2);
}

#[test]
fn topological_variants_recover_identical_molecules() {
    init_test_logger();
    let butane = carbon_chain(4);
    let options = McsOptions::default();

    assert_eq!(tcmcis(&butane, &butane, &options).size(), 4);
    assert_eq!(tcmces_size(&butane, &butane, &options), 3);
    assert!((tcmcis_tanimoto(&butane, &butane, &options) - 1.0).abs() < f64::EPSILON);
    assert!((tcmces_tanimoto(&butane, &butane, &options) - 1.0).abs() < f64::EPSILON);
}

#[test]
fn tight_diameter_prunes_distant_correspondences() {
    init_test_logger();
    let butane = carbon_chain(4);
    let mut options = McsOptions::default();
    options.diameter = 1;
    options.tolerance = 0;

    // The terminal bonds sit at line-graph distance 2, beyond the cutoff,
    // so they cannot both be kept.
    let result = tcmces(&butane, &butane, &options);
    assert_eq!(result.size(), 2);
}

#[test]
fn mapping_pairs_are_valid_indices() {
    let butane = carbon_chain(4);
    let propane = carbon_chain(3);
    let result = disconnected_mcis(&butane, &propane, &McsOptions::default());
    for &(a, b) in &result.mapping {
        assert!(a < butane.node_count());
        assert!(b < propane.node_count());
    }
}
