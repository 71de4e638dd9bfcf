//! Shared graph builders for the clique tests.

use molgraph_common::Graph;

pub fn edgeless(n: usize) -> Graph<(), ()> {
    let mut g = Graph::new();
    for _ in 0..n {
        g.add_node(());
    }
    g
}

pub fn path(n: usize) -> Graph<(), ()> {
    let mut g = edgeless(n);
    for v in 1..n {
        g.add_edge(v - 1, v, ());
    }
    g
}

pub fn complete(n: usize) -> Graph<(), ()> {
    let mut g = edgeless(n);
    for u in 0..n {
        for v in (u + 1)..n {
            g.add_edge(u, v, ());
        }
    }
    g
}

/// Hub vertex 0 plus an (n-1)-cycle around it.
pub fn wheel(n: usize) -> Graph<(), ()> {
    assert!(n >= 4);
    let mut g = edgeless(n);
    for v in 1..n {
        g.add_edge(0, v, ());
    }
    for v in 1..(n - 1) {
        g.add_edge(v, v + 1, ());
    }
    g.add_edge(n - 1, 1, ());
    g
}

pub fn is_clique(g: &Graph<(), ()>, members: &[usize]) -> bool {
    members
        .iter()
        .enumerate()
        .all(|(i, &u)| members[(i + 1)..].iter().all(|&v| g.has_edge(u, v)))
}
