//! End-to-end connectivity scenarios, exercised through the public
//! `Graph` API only (no internal sketch/registry access), the way the
//! teacher crate's `tests/` directory exercises wrapper types end to end.

use streamcc::Graph;

fn sizes(cc: &streamcc::ConnectedComponents) -> Vec<usize> {
    let mut v: Vec<usize> = cc.component_sets().iter().map(|s| s.len()).collect();
    v.sort_unstable();
    v
}

#[test]
fn empty_graph_ten_singletons() {
    let mut g = Graph::new(10, 0xC0FFEE, 4.0);
    g.run();
    let cc = g.connected_components();
    assert_eq!(cc.size(), 10);
    assert!(g.spanning_forest().edges().is_empty());
    for v in 0..10u32 {
        assert!(cc.is_connected(v, v));
    }
}

#[test]
fn single_edge_four_vertices() {
    let mut g = Graph::new(4, 0xC0FFEE, 4.0);
    g.apply(0, 1);
    g.run();
    let cc = g.connected_components();
    assert_eq!(sizes(&cc), vec![1, 1, 2]);
    assert!(cc.is_connected(0, 1));
    assert!(!cc.is_connected(0, 2));
    assert_eq!(g.spanning_forest().edges(), &[(0, 1)]);
}

#[test]
fn triangle_three_vertices() {
    let mut g = Graph::new(3, 0xC0FFEE, 4.0);
    g.apply(0, 1);
    g.apply(1, 2);
    g.apply(0, 2);
    g.run();
    let cc = g.connected_components();
    assert_eq!(cc.size(), 1);
    let forest = g.spanning_forest();
    assert_eq!(forest.edges().len(), 2);
    for &(u, v) in forest.edges() {
        assert!(u < 3 && v < 3);
    }
}

#[test]
fn insert_then_delete_cancels_to_singletons() {
    let mut g = Graph::new(3, 0xC0FFEE, 4.0);
    g.apply(0, 1);
    g.apply(0, 1);
    g.run();
    assert_eq!(g.connected_components().size(), 3);
}

#[test]
fn divisor_graph_n1000_three_components() {
    let n: u32 = 1000;
    let mut g = Graph::new(n as usize, 0xC0FFEE, 4.0);
    for i in 2..n {
        let mut k = i * 2;
        while k < n {
            g.apply(i, k);
            k += i;
        }
    }
    g.run();
    let cc = g.connected_components();
    assert_eq!(cc.size(), 3);
    assert_eq!(sizes(&cc), vec![1, 1, 998]);
    assert!(cc.is_connected(2, 999));
    assert!(!cc.is_connected(0, 2));
    assert!(!cc.is_connected(1, 2));
}

#[test]
fn two_disjoint_cliques_of_five() {
    let mut g = Graph::new(10, 0xC0FFEE, 4.0);
    for i in 0u32..5 {
        for j in (i + 1)..5 {
            g.apply(i, j);
        }
    }
    for i in 5u32..10 {
        for j in (i + 1)..10 {
            g.apply(i, j);
        }
    }
    g.run();
    let cc = g.connected_components();
    assert_eq!(sizes(&cc), vec![5, 5]);
    assert!(cc.is_connected(0, 4));
    assert!(cc.is_connected(5, 9));
    assert!(!cc.is_connected(4, 5));
}
