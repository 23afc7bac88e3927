use metadecomp_graph::{EdgeId, Graph, NodeId};

fn path(labels: &[&'static str]) -> (Graph<&'static str, ()>, Vec<NodeId>) {
    let mut g: Graph<&'static str, ()> = Graph::new();
    let ids: Vec<NodeId> = labels.iter().map(|l| g.add_node(*l)).collect();
    for w in ids.windows(2) {
        g.add_edge(w[0], w[1], ()).unwrap();
    }
    (g, ids)
}

#[test]
fn add_node_hands_out_sequential_handles() {
    let mut g: Graph<u8, ()> = Graph::new();
    let a = g.add_node(1);
    let b = g.add_node(2);
    assert_eq!(a.index(), 0);
    assert_eq!(b.index(), 1);
    assert_eq!(g.node(b), Some(&2));
    assert_eq!(g.node_count(), 2);
}

#[test]
fn add_edge_rejects_missing_endpoints() {
    let mut g: Graph<(), ()> = Graph::new();
    let a = g.add_node(());
    assert_eq!(g.add_edge(a, NodeId::new(7), ()), None);
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn successors_predecessors_and_neighbors() {
    let (g, ids) = path(&["a", "b", "c"]);
    assert_eq!(g.successors(ids[1]), vec![ids[2]]);
    assert_eq!(g.predecessors(ids[1]), vec![ids[0]]);
    assert_eq!(g.neighbors(ids[1]), vec![ids[2], ids[0]]);
    assert_eq!(g.degree(ids[1]), 2);
    assert_eq!(g.degree(ids[0]), 1);
}

#[test]
fn parallel_edges_are_kept() {
    let mut g: Graph<(), u32> = Graph::new();
    let a = g.add_node(());
    let b = g.add_node(());
    let e1 = g.add_edge(a, b, 1).unwrap();
    let e2 = g.add_edge(a, b, 2).unwrap();
    assert_ne!(e1, e2);
    assert_eq!(g.degree(a), 2);
    assert_eq!(g.neighbors(a), vec![b]);
    assert_eq!(g.find_edge(a, b), Some(e1));
    assert_eq!(g.find_edge(b, a), None);
}

#[test]
fn remove_node_drops_incident_edges_and_keeps_other_handles() {
    let (mut g, ids) = path(&["a", "b", "c"]);
    assert_eq!(g.remove_node(ids[1]), Some("b"));
    assert_eq!(g.node_count(), 2);
    assert_eq!(g.edge_count(), 0);
    assert!(!g.has_node(ids[1]));
    assert_eq!(g.node(ids[2]), Some(&"c"));
    assert_eq!(g.degree(ids[0]), 0);

    let d = g.add_node("d");
    assert_eq!(d.index(), 3);
    assert_eq!(g.node_ids(), vec![ids[0], ids[2], d]);
}

#[test]
fn remove_edge_updates_adjacency() {
    let (mut g, ids) = path(&["a", "b"]);
    let e = g.find_edge(ids[0], ids[1]).unwrap();
    assert_eq!(g.remove_edge(e), Some(()));
    assert_eq!(g.remove_edge(e), None);
    assert!(g.out_edges(ids[0]).is_empty());
    assert!(g.in_edges(ids[1]).is_empty());
}

#[test]
fn redirect_edge_moves_one_endpoint() {
    let (mut g, ids) = path(&["a", "b"]);
    let e = g.find_edge(ids[0], ids[1]).unwrap();
    let c = g.add_node("c");

    assert!(g.redirect_edge(e, ids[1], c));
    assert_eq!(g.endpoints(e), Some((ids[0], c)));
    assert_eq!(g.in_degree(ids[1]), 0);
    assert_eq!(g.in_edges(c), &[e]);

    assert!(g.redirect_edge(e, ids[0], ids[1]));
    assert_eq!(g.endpoints(e), Some((ids[1], c)));
    assert_eq!(g.out_edges(ids[1]), &[e]);
    assert_eq!(g.edge_count(), 1);

    assert!(!g.redirect_edge(e, ids[0], c));
    assert!(!g.redirect_edge(EdgeId::new(99), ids[1], c));
}

#[test]
fn opposite_returns_the_other_endpoint() {
    let (g, ids) = path(&["a", "b"]);
    let e = g.find_edge(ids[0], ids[1]).unwrap();
    assert_eq!(g.opposite(e, ids[0]), Some(ids[1]));
    assert_eq!(g.opposite(e, ids[1]), Some(ids[0]));
    assert_eq!(g.opposite(e, NodeId::new(5)), None);
}

#[test]
fn for_each_node_mut_updates_labels() {
    let mut g: Graph<u32, ()> = Graph::new();
    g.add_node(1);
    g.add_node(2);
    g.for_each_node_mut(|_, n| *n *= 10);
    let mut seen = Vec::new();
    g.for_each_node(|_, n| seen.push(*n));
    assert_eq!(seen, vec![10, 20]);
}
