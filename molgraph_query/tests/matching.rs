//! End-to-end matching behavior over small molecules.

use molgraph_query::compat::{PlainMatchers, SubQueryResolver};
use molgraph_query::{
    Atom, AtomMapping, Bond, MatchOptions, MolGraphError, Molecule, QueryAtom, QueryMolecule,
    edge_induced_matches, emap_to_nmap, exact_matches, has_exact_match, has_query_match,
    has_substruct_match, substruct_matches,
};
use rstest::rstest;
use std::rc::Rc;
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

lazy_static::lazy_static! {
    static ref ETHANE: Molecule = carbon_chain(2);
    static ref PROPANE: Molecule = carbon_chain(3);
    static ref BUTANE: Molecule = carbon_chain(4);
    static ref ETHANOL: Molecule = {
        let mut mol = Molecule::new();
        let c0 = mol.add_node(Atom::new("C").with_hydrogens(3));
        let c1 = mol.add_node(Atom::new("C").with_hydrogens(2));
        let o = mol.add_node(Atom::new("O").with_hydrogens(1));
        mol.add_edge(c0, c1, Bond::single());
        mol.add_edge(c1, o, Bond::single());
        mol
    };
}

struct NoSubQueries;

impl SubQueryResolver for NoSubQueries {
    fn resolve(&self, source: &str) -> Result<QueryMolecule, MolGraphError> {
        Err(MolGraphError::InvalidQuery(format!(
            "no sub-queries registered, got {:?}",
            source
        )))
    }
}

#[rstest]
#[case::ethane(&ETHANE)]
#[case::propane(&PROPANE)]
#[case::butane(&BUTANE)]
#[case::ethanol(&ETHANOL)]
fn exact_match_is_reflexive(#[case] mol: &Molecule) {
    init_test_logger();
    assert!(has_exact_match(mol, mol, &MatchOptions::default()));
}

#[test]
fn exact_match_distinguishes_sizes_and_elements() {
    init_test_logger();
    assert!(!has_exact_match(&BUTANE, &PROPANE, &MatchOptions::default()));
    assert!(!has_exact_match(&PROPANE, &ETHANOL, &MatchOptions::default()));
}

#[test]
fn butane_self_isomorphisms_are_the_two_chain_walks() {
    let found: Vec<AtomMapping> =
        exact_matches(&BUTANE, &BUTANE, &MatchOptions::default()).collect();
    assert_eq!(found.len(), 2);
}

#[test]
fn substructure_search_is_monotonic() {
    init_test_logger();
    let options = MatchOptions::default();
    assert!(has_substruct_match(&BUTANE, &PROPANE, &options));
    // Any sub-part of a matching query matches as well.
    assert!(has_substruct_match(&BUTANE, &ETHANE, &options));
    // The containment does not reverse.
    assert!(!has_substruct_match(&PROPANE, &BUTANE, &options));
}

#[test]
fn ethane_occurs_once_per_bond_and_direction() {
    let found: Vec<AtomMapping> =
        substruct_matches(&BUTANE, &ETHANE, &MatchOptions::default()).collect();
    assert_eq!(found.len(), 6);
}

#[test]
fn heteroatoms_are_not_interchangeable() {
    init_test_logger();
    // Ethanol contains a C-C fragment but no C chain of length 3.
    assert!(has_substruct_match(&ETHANOL, &ETHANE, &MatchOptions::default()));
    assert!(!has_substruct_match(&ETHANOL, &PROPANE, &MatchOptions::default()));
}

#[test]
fn formula_queries_match_descriptors() {
    init_test_logger();
    let mut query = QueryMolecule::new();
    query.add_node(QueryAtom::Symbol("O".into()));

    let options = MatchOptions::default();
    assert!(has_query_match(&ETHANOL, &query, Rc::new(NoSubQueries), &options).unwrap());
    assert!(!has_query_match(&BUTANE, &query, Rc::new(NoSubQueries), &options).unwrap());
}

#[test]
fn edge_mapping_of_an_exact_match_recovers_an_isomorphism() {
    init_test_logger();
    let matchers = PlainMatchers::new(&BUTANE, &BUTANE);
    let edge_maps = edge_induced_matches(
        &BUTANE,
        &BUTANE,
        |t, q| matchers.vmatch(t, q),
        |te, qe| matchers.ematch(te, qe),
        &MatchOptions::default(),
    );
    // The 3-edge chain maps onto itself forwards and backwards.
    assert_eq!(edge_maps.len(), 2);

    for emap in &edge_maps {
        let nmap = emap_to_nmap(emap, &BUTANE, &BUTANE).unwrap();
        assert_eq!(nmap.len(), BUTANE.node_count());
        // The recovered vertex mapping is itself an isomorphism.
        for (&q1, &t1) in nmap.iter() {
            for (&q2, &t2) in nmap.iter() {
                if q1 != q2 {
                    assert_eq!(BUTANE.has_edge(q1, q2), BUTANE.has_edge(t1, t2));
                }
            }
        }
    }
}

#[test]
fn zero_timeout_ends_the_sequence_without_error() {
    let options = MatchOptions::default().with_timeout(Duration::ZERO);
    let found: Vec<AtomMapping> = substruct_matches(&BUTANE, &ETHANE, &options).collect();
    assert!(found.is_empty());
}
