//! Helper algorithms over [`Graph`](super::Graph).

use super::{Graph, NodeId};
use rustc_hash::FxBuildHasher;
use std::collections::VecDeque;

type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// Weakly connected components, in node insertion order.
pub fn components<N, E>(g: &Graph<N, E>) -> Vec<Vec<NodeId>> {
    components_where(g, |_| true)
}

/// Weakly connected components of the subgraph induced by the nodes accepted by `keep`.
///
/// Edges touching a rejected node are ignored, which is equivalent to deleting those nodes from
/// a copy of the graph first.
pub fn components_where<N, E, F>(g: &Graph<N, E>, keep: F) -> Vec<Vec<NodeId>>
where
    F: Fn(NodeId) -> bool,
{
    let mut seen: HashSet<NodeId> = HashSet::default();
    let mut out: Vec<Vec<NodeId>> = Vec::new();

    for start in g.nodes() {
        if !keep(start) || !seen.insert(start) {
            continue;
        }
        let mut comp: Vec<NodeId> = Vec::new();
        let mut q: VecDeque<NodeId> = VecDeque::new();
        q.push_back(start);
        while let Some(v) = q.pop_front() {
            comp.push(v);
            for n in g.successors(v).into_iter().chain(g.predecessors(v)) {
                if keep(n) && seen.insert(n) {
                    q.push_back(n);
                }
            }
        }
        out.push(comp);
    }

    out
}
