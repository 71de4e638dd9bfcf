//! Match-count cases for the public search entry points.

use molgraph_common::{Graph, MatchOptions};
use molgraph_subgraph::{isomorphisms, monomorphisms, node_induced_matches};
use rstest::rstest;
use std::sync::OnceLock;

fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn path(n: usize) -> Graph<(), ()> {
    let mut g = Graph::new();
    for _ in 0..n {
        g.add_node(());
    }
    for v in 1..n {
        g.add_edge(v - 1, v, ());
    }
    g
}

fn cycle(n: usize) -> Graph<(), ()> {
    let mut g = path(n);
    g.add_edge(n - 1, 0, ());
    g
}

fn complete(n: usize) -> Graph<(), ()> {
    let mut g = Graph::new();
    for _ in 0..n {
        g.add_node(());
    }
    for u in 0..n {
        for v in (u + 1)..n {
            g.add_edge(u, v, ());
        }
    }
    g
}

fn accept(_: usize, _: usize) -> bool {
    true
}

#[rstest]
#[case::subpath_in_path(path(5), path(3), 6)]
#[case::subpath_in_cycle(cycle(6), path(3), 12)]
#[case::triangle_in_k4(complete(4), cycle(3), 24)]
#[case::too_large_query(path(3), path(5), 0)]
fn monomorphism_counts(
    #[case] target: Graph<(), ()>,
    #[case] query: Graph<(), ()>,
    #[case] expected: usize,
) {
    init_test_logger();
    let found = monomorphisms(&target, &query, accept, accept, &MatchOptions::default()).count();
    assert_eq!(found, expected);
}

#[rstest]
#[case::subpath_in_path(path(5), path(3), 6)]
#[case::path_in_k4_has_chords(complete(4), path(3), 0)]
#[case::triangle_in_k4(complete(4), cycle(3), 24)]
fn node_induced_counts(
    #[case] target: Graph<(), ()>,
    #[case] query: Graph<(), ()>,
    #[case] expected: usize,
) {
    init_test_logger();
    let found =
        node_induced_matches(&target, &query, accept, accept, &MatchOptions::default()).count();
    assert_eq!(found, expected);
}

#[rstest]
#[case::path_reversal(path(4), 2)]
#[case::cycle_dihedral(cycle(6), 12)]
#[case::complete_symmetric(complete(4), 24)]
fn self_isomorphism_counts(#[case] graph: Graph<(), ()>, #[case] expected: usize) {
    init_test_logger();
    let found = isomorphisms(&graph, &graph, accept, accept, &MatchOptions::default()).count();
    assert_eq!(found, expected);
}
