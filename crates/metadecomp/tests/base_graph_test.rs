use metadecomp::{BaseGraph, Error, NetworkBuilder, NodeId};

/// `A -> R1 -> H`, `H -> R2 -> B`, `H -> R3 -> C`, plus an isolated species `Z`.
fn hub_network() -> (BaseGraph, NodeId, NodeId) {
    let mut b = NetworkBuilder::new();
    let a = b.species("A", None);
    let h = b.species("H", None);
    let bb = b.species("B", None);
    let c = b.species("C", None);
    let z = b.species("Z", None);
    let r1 = b.reaction("R1");
    let r2 = b.reaction("R2");
    let r3 = b.reaction("R3");
    b.consumes(r1, a).produces(r1, h);
    b.consumes(r2, h).produces(r2, bb);
    b.consumes(r3, h).produces(r3, c);
    (BaseGraph::new(b.build()), h, z)
}

#[test]
fn base_graph_classifies_nodes() {
    let (base, h, _) = hub_network();
    assert_eq!(base.species().len(), 5);
    assert_eq!(base.reactions().len(), 3);
    assert!(base.is_species(h));
    assert!(base.is_reaction(base.reactions()[0]));
    assert_eq!(base.label(h), "H");
    assert_eq!(base.working().node_count(), base.original().node_count());
    assert_eq!(base.working().edge_count(), base.original().edge_count());
}

#[test]
fn cloning_splits_a_hub_into_degree_one_copies() {
    let (mut base, h, _) = hub_network();
    let nodes_before = base.working().node_count();
    let edges_before = base.working().edge_count();
    assert_eq!(base.working().degree(h), 3);

    let report = base.clone_species(&[h]).unwrap();
    assert_eq!(report.cloned_species, 1);
    assert_eq!(report.created_nodes, 3);
    assert_eq!(report.removed_nodes, 1);

    assert_eq!(base.working().node_count(), nodes_before + 3 - 1);
    assert_eq!(base.working().edge_count(), edges_before);
    assert!(!base.working().has_node(h));

    let clones = base.working_of(h).to_vec();
    assert_eq!(clones.len(), 3);
    for c in clones {
        assert_eq!(base.working().degree(c), 1);
        assert_eq!(base.original_of(c), Some(h));
        assert_eq!(base.label(c), "H");
        assert!(base.is_species(c));
    }
    assert!(base.is_cloned(h));
    assert_eq!(base.species().len(), 5 - 1 + 3);
}

#[test]
fn recloning_is_rejected_without_touching_the_graph() {
    let (mut base, h, _) = hub_network();
    base.clone_species(&[h]).unwrap();
    let nodes = base.working().node_count();

    let a = base.original_species()[0];
    let err = base.clone_species(&[a, h]).unwrap_err();
    assert!(matches!(err, Error::AlreadyCloned { node } if node == h));
    assert_eq!(base.working().node_count(), nodes);
    assert!(!base.is_cloned(a));
}

#[test]
fn cloning_rejects_reactions_and_unknown_nodes() {
    let (mut base, _, _) = hub_network();
    let r = base.reactions()[0];
    assert!(matches!(
        base.clone_species(&[r]),
        Err(Error::NotASpecies { node }) if node == r
    ));
    let missing = NodeId::new(999);
    assert!(matches!(
        base.clone_species(&[missing]),
        Err(Error::UnknownNode { node }) if node == missing
    ));
}

#[test]
fn cloning_an_isolated_species_is_a_no_op() {
    let (mut base, _, z) = hub_network();
    let nodes = base.working().node_count();
    let report = base.clone_species(&[z]).unwrap();
    assert_eq!(report.cloned_species, 0);
    assert_eq!(base.working().node_count(), nodes);
    assert_eq!(base.working_of(z), &[z]);
    assert!(!base.is_cloned(z));
}

#[test]
fn original_species_ignore_cloning() {
    let (mut base, h, _) = hub_network();
    let before = base.original_species().to_vec();
    base.clone_species(&[h]).unwrap();
    assert_eq!(base.original_species(), before.as_slice());
    assert!(base.original_species().contains(&h));
    assert!(!base.species().contains(&h));
}

#[test]
fn degree_histogram_matches_brute_force() {
    let (mut base, h, _) = hub_network();
    // Histogram describes the original graph, so cloning must not change it.
    base.clone_species(&[h]).unwrap();

    assert_eq!(base.max_degree(), 3);
    let mut prev = usize::MAX;
    for d in 0..=base.max_degree() + 1 {
        let expected = base
            .original_species()
            .iter()
            .filter(|&&v| base.original().degree(v) >= d)
            .count();
        let got = base.number_of_species_with_degree_at_least(d);
        assert_eq!(got, expected, "degree {d}");
        assert!(got <= prev);
        prev = got;
    }
    assert_eq!(base.number_of_species_with_degree_at_least(100), 0);

    // Z has degree 0, A/B/C degree 1, H degree 3.
    assert_eq!(base.degree_histogram(), vec![1, 3, 0, 1]);
    assert_eq!(base.original_species_with_degree_at_least(2), vec![h]);
}

#[test]
fn neighbor_queries_split_by_role() {
    let (base, h, _) = hub_network();
    assert_eq!(base.reaction_neighbors(h).len(), 3);
    assert!(base.species_neighbors(h).is_empty());
    let r1 = base.reactions()[0];
    let labels: Vec<&str> = base
        .species_neighbors(r1)
        .into_iter()
        .map(|v| base.label(v))
        .collect();
    assert_eq!(labels, vec!["H", "A"]);
}
