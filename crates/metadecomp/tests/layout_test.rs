use metadecomp::graph::{Graph, NodeId};
use metadecomp::layout::{
    CrossingOptions, LayoutOptions, LayoutStyle, PlacementOptions, Point, barycenter,
    layout_layers, minimize_three_layer, minimize_two_layer, number_of_crossings,
    place_concentric, place_on_circle, place_parallel_lines, reorder_layer, total_crossings,
};
use std::f64::consts::TAU;

fn nodes(g: &mut Graph<(), ()>, n: usize) -> Vec<NodeId> {
    (0..n).map(|_| g.add_node(())).collect()
}

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

/// `top[i] - bottom[i]` for every `i`.
fn ladder(n: usize) -> (Graph<(), ()>, Vec<NodeId>, Vec<NodeId>) {
    let mut g: Graph<(), ()> = Graph::new();
    let top = nodes(&mut g, n);
    let bottom = nodes(&mut g, n);
    for i in 0..n {
        g.add_edge(top[i], bottom[i], ());
    }
    (g, top, bottom)
}

#[test]
fn crossings_count_inverted_neighbor_pairs() {
    let mut g: Graph<(), ()> = Graph::new();
    let v = nodes(&mut g, 4);
    let (a, b, c, d) = (v[0], v[1], v[2], v[3]);
    g.add_edge(a, d, ());
    g.add_edge(c, b, ());
    assert_eq!(number_of_crossings(&g, &[a, b], &[c, d]), 1);
    assert_eq!(number_of_crossings(&g, &[a, b], &[d, c]), 0);
    assert_eq!(number_of_crossings(&g, &[], &[c, d]), 0);
}

#[test]
fn crossings_of_a_reversed_ladder() {
    let (g, top, mut bottom) = ladder(5);
    assert_eq!(number_of_crossings(&g, &top, &bottom), 0);
    bottom.reverse();
    assert_eq!(number_of_crossings(&g, &top, &bottom), 10);
    assert_eq!(total_crossings(&g, &[top, bottom]), 10);
}

#[test]
fn barycenter_is_mean_neighbor_position() {
    let mut g: Graph<(), ()> = Graph::new();
    let v = nodes(&mut g, 5);
    g.add_edge(v[0], v[2], ());
    g.add_edge(v[0], v[4], ());
    let fixed = [v[2], v[3], v[4]];
    assert_eq!(barycenter(&g, v[0], &fixed), 1.0);
    assert_eq!(barycenter(&g, v[1], &fixed), 0.0);
}

#[test]
fn reorder_layer_removes_a_single_crossing() {
    let mut g: Graph<(), ()> = Graph::new();
    let v = nodes(&mut g, 4);
    let (a, b, c, d) = (v[0], v[1], v[2], v[3]);
    g.add_edge(a, d, ());
    g.add_edge(b, c, ());
    let top = reorder_layer(&g, &[a, b], &[c, d]);
    assert_eq!(top, vec![b, a]);
    assert_eq!(number_of_crossings(&g, &top, &[c, d]), 0);
}

#[test]
fn reorder_keeps_a_crossing_free_layout_crossing_free() {
    let mut g: Graph<(), ()> = Graph::new();
    let v = nodes(&mut g, 6);
    let (a, b, e) = (v[0], v[1], v[2]);
    let (c, d, f) = (v[3], v[4], v[5]);
    g.add_edge(a, c, ());
    g.add_edge(b, d, ());
    g.add_edge(b, f, ());
    let top = [a, b, e];
    let bottom = [c, d, f];
    assert_eq!(number_of_crossings(&g, &top, &bottom), 0);

    let reordered = reorder_layer(&g, &top, &bottom);
    // The isolated node has barycenter 0 and is stably sorted next to `a`.
    assert_eq!(reordered, vec![a, e, b]);
    assert_eq!(number_of_crossings(&g, &reordered, &bottom), 0);
}

#[test]
fn two_layer_minimization_untangles_a_ladder() {
    let (g, top, mut bottom) = ladder(5);
    bottom.reverse();
    let out = minimize_two_layer(&g, &top, &bottom, CrossingOptions::default());
    assert_eq!(out.crossings, 0);
    assert_eq!(out.layers.len(), 2);
    assert_eq!(number_of_crossings(&g, &out.layers[0], &out.layers[1]), 0);
}

#[test]
fn two_layer_minimization_is_deterministic_for_a_seed() {
    let mut g: Graph<(), ()> = Graph::new();
    let top = nodes(&mut g, 4);
    let bottom = nodes(&mut g, 4);
    for (i, j) in [(0, 1), (0, 3), (1, 0), (1, 2), (2, 3), (3, 0), (3, 2)] {
        g.add_edge(top[i], bottom[j], ());
    }
    let options = CrossingOptions {
        restarts: 5,
        seed: 42,
    };
    let first = minimize_two_layer(&g, &top, &bottom, options);
    let second = minimize_two_layer(&g, &top, &bottom, options);
    assert_eq!(first, second);
    assert!(first.crossings <= number_of_crossings(&g, &top, &bottom));

    let mut sorted = first.layers[0].clone();
    sorted.sort();
    assert_eq!(sorted, top);
}

#[test]
fn three_layer_minimization_untangles_both_gaps() {
    let mut g: Graph<(), ()> = Graph::new();
    let l1 = nodes(&mut g, 3);
    let l2 = nodes(&mut g, 3);
    let l3 = nodes(&mut g, 3);
    for i in 0..3 {
        g.add_edge(l1[i], l2[2 - i], ());
        g.add_edge(l2[i], l3[i], ());
    }
    let before = total_crossings(&g, &[l1.clone(), l2.clone(), l3.clone()]);
    assert_eq!(before, 3);

    let out = minimize_three_layer(&g, &l1, &l2, &l3, CrossingOptions::default());
    assert_eq!(out.crossings, 0);
    assert_eq!(total_crossings(&g, &out.layers), 0);
}

#[test]
fn circle_placement_spaces_nodes_evenly() {
    let mut g: Graph<(), ()> = Graph::new();
    let v = nodes(&mut g, 4);
    let options = PlacementOptions {
        node_spacing: TAU / 4.0,
        ..Default::default()
    };
    let placed = place_on_circle(&v, &options);
    let expected = [
        Point::new(1.0, 0.0),
        Point::new(0.0, 1.0),
        Point::new(-1.0, 0.0),
        Point::new(0.0, -1.0),
    ];
    for ((node, p), (want_node, want)) in placed.iter().zip(v.iter().zip(expected)) {
        assert_eq!(node, want_node);
        assert!(close(*p, want), "{p:?} != {want:?}");
    }
}

#[test]
fn concentric_rings_grow_from_the_widest_layer() {
    let mut g: Graph<(), ()> = Graph::new();
    let inner = nodes(&mut g, 4);
    let outer = nodes(&mut g, 2);
    let options = PlacementOptions {
        node_spacing: TAU / 4.0,
        ring_gap: 1.0,
        line_gap: 0.0,
    };
    let placed = place_concentric(&[inner.clone(), outer.clone()], &options);
    assert_eq!(placed.len(), 6);
    assert!(close(placed[0].1, Point::new(1.0, 0.0)));
    assert_eq!(placed[4].0, outer[0]);
    assert!(close(placed[4].1, Point::new(2.0, 0.0)));
    assert!(close(placed[5].1, Point::new(-2.0, 0.0)));
}

#[test]
fn parallel_lines_share_the_widest_span() {
    let mut g: Graph<(), ()> = Graph::new();
    let wide = nodes(&mut g, 3);
    let narrow = nodes(&mut g, 1);
    let options = PlacementOptions {
        node_spacing: 10.0,
        ring_gap: 0.0,
        line_gap: 50.0,
    };
    let placed = place_parallel_lines(&[wide, narrow], &options);
    let points: Vec<Point> = placed.iter().map(|(_, p)| *p).collect();
    assert_eq!(
        points,
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(10.0, 50.0),
        ]
    );
}

#[test]
fn layout_layers_positions_every_node() {
    let (g, top, mut bottom) = ladder(3);
    bottom.reverse();
    for style in [
        LayoutStyle::Circular,
        LayoutStyle::Concentric,
        LayoutStyle::ParallelLines,
    ] {
        let options = LayoutOptions {
            style,
            ..Default::default()
        };
        let layout = layout_layers(&g, &[top.clone(), bottom.clone()], &options);
        assert_eq!(layout.positions.len(), 6);
        assert_eq!(layout.crossings, 0);
        assert!(top.iter().all(|&v| layout.position(v).is_some()));
    }

    let options = LayoutOptions {
        minimize_crossings: false,
        ..Default::default()
    };
    let layout = layout_layers(&g, &[top.clone(), bottom.clone()], &options);
    assert_eq!(layout.crossings, 3);
    assert_eq!(layout.layers, vec![top, bottom]);
}
