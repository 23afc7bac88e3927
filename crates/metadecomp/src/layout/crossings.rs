use metadecomp_graph::{Graph, NodeId};
use rustc_hash::FxHashMap;

/// Edge crossings between two adjacent layers.
///
/// Edges are taken undirected. For every pair `i < j` in `layer1`, each pair of neighbors
/// `(a of layer1[i], b of layer1[j])` inside `layer2` with `pos(a) > pos(b)` is one crossing.
pub fn number_of_crossings<N, E>(g: &Graph<N, E>, layer1: &[NodeId], layer2: &[NodeId]) -> usize {
    let pos = positions(layer2);
    let neighbor_pos: Vec<Vec<usize>> = layer1
        .iter()
        .map(|&v| neighbor_positions(g, v, &pos))
        .collect();

    let mut count = 0usize;
    for i in 0..neighbor_pos.len() {
        for j in (i + 1)..neighbor_pos.len() {
            for &a in &neighbor_pos[i] {
                count += neighbor_pos[j].iter().filter(|&&b| a > b).count();
            }
        }
    }
    count
}

/// Sum of [`number_of_crossings`] over consecutive layers.
pub fn total_crossings<N, E>(g: &Graph<N, E>, layers: &[Vec<NodeId>]) -> usize {
    layers
        .windows(2)
        .map(|w| number_of_crossings(g, &w[0], &w[1]))
        .sum()
}

pub(crate) fn positions(layer: &[NodeId]) -> FxHashMap<NodeId, usize> {
    layer.iter().enumerate().map(|(i, &v)| (v, i)).collect()
}

/// Positions of `v`'s neighbors inside the layer indexed by `pos`.
pub(crate) fn neighbor_positions<N, E>(
    g: &Graph<N, E>,
    v: NodeId,
    pos: &FxHashMap<NodeId, usize>,
) -> Vec<usize> {
    g.neighbors(v)
        .into_iter()
        .filter_map(|n| pos.get(&n).copied())
        .collect()
}
