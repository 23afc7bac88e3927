use super::crossings::{neighbor_positions, positions};
use metadecomp_graph::{Graph, NodeId};

/// Mean position of `v`'s neighbors in `fixed`, or `0.0` when it has none there.
pub fn barycenter<N, E>(g: &Graph<N, E>, v: NodeId, fixed: &[NodeId]) -> f64 {
    let pos = positions(fixed);
    barycenter_in(g, v, &pos)
}

/// `flexible` stably sorted by barycenter against `fixed`.
pub fn reorder_layer<N, E>(g: &Graph<N, E>, flexible: &[NodeId], fixed: &[NodeId]) -> Vec<NodeId> {
    let pos = positions(fixed);
    let mut entries: Vec<(f64, NodeId)> = flexible
        .iter()
        .map(|&v| (barycenter_in(g, v, &pos), v))
        .collect();
    entries.sort_by(|a, b| a.0.total_cmp(&b.0));
    entries.into_iter().map(|(_, v)| v).collect()
}

fn barycenter_in<N, E>(
    g: &Graph<N, E>,
    v: NodeId,
    pos: &rustc_hash::FxHashMap<NodeId, usize>,
) -> f64 {
    let ns = neighbor_positions(g, v, pos);
    if ns.is_empty() {
        return 0.0;
    }
    ns.iter().sum::<usize>() as f64 / ns.len() as f64
}
