use super::barycenter::reorder_layer;
use super::crossings::number_of_crossings;
use metadecomp_graph::{Graph, NodeId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

pub const DEFAULT_RESTARTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossingOptions {
    /// Random restarts after the pass that starts from the given order.
    pub restarts: usize,
    pub seed: u64,
}

impl Default for CrossingOptions {
    fn default() -> Self {
        Self {
            restarts: DEFAULT_RESTARTS,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerOrder {
    pub layers: Vec<Vec<NodeId>>,
    pub crossings: usize,
}

/// Barycenter sweeps between two layers.
///
/// Starts once from the given order and then from `restarts` seeded shuffles; each start
/// alternates reorders until the crossing count stops improving. The best order wins, earlier
/// starts on ties, so the given order is kept unless something is strictly better.
pub fn minimize_two_layer<N, E>(
    g: &Graph<N, E>,
    layer1: &[NodeId],
    layer2: &[NodeId],
    options: CrossingOptions,
) -> LayerOrder {
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut best = improve_two(g, layer1.to_vec(), layer2.to_vec());

    for restart in 0..options.restarts {
        if best.crossings == 0 {
            break;
        }
        let mut l1 = layer1.to_vec();
        let mut l2 = layer2.to_vec();
        l1.shuffle(&mut rng);
        l2.shuffle(&mut rng);
        let candidate = improve_two(g, l1, l2);
        if candidate.crossings < best.crossings {
            debug!(restart, crossings = candidate.crossings, "two-layer order improved");
            best = candidate;
        }
    }
    best
}

/// Three-layer variant: each round reorders layer 2 against 1, layer 3 against 2, layer 2
/// against 3 and layer 1 against 2.
pub fn minimize_three_layer<N, E>(
    g: &Graph<N, E>,
    layer1: &[NodeId],
    layer2: &[NodeId],
    layer3: &[NodeId],
    options: CrossingOptions,
) -> LayerOrder {
    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut best = improve_three(g, [layer1.to_vec(), layer2.to_vec(), layer3.to_vec()]);

    for restart in 0..options.restarts {
        if best.crossings == 0 {
            break;
        }
        let mut layers = [layer1.to_vec(), layer2.to_vec(), layer3.to_vec()];
        for l in &mut layers {
            l.shuffle(&mut rng);
        }
        let candidate = improve_three(g, layers);
        if candidate.crossings < best.crossings {
            debug!(restart, crossings = candidate.crossings, "three-layer order improved");
            best = candidate;
        }
    }
    best
}

fn improve_two<N, E>(g: &Graph<N, E>, mut l1: Vec<NodeId>, mut l2: Vec<NodeId>) -> LayerOrder {
    let mut crossings = number_of_crossings(g, &l1, &l2);
    while crossings > 0 {
        let n1 = reorder_layer(g, &l1, &l2);
        let n2 = reorder_layer(g, &l2, &n1);
        let c = number_of_crossings(g, &n1, &n2);
        if c >= crossings {
            break;
        }
        crossings = c;
        l1 = n1;
        l2 = n2;
    }
    LayerOrder {
        layers: vec![l1, l2],
        crossings,
    }
}

fn improve_three<N, E>(g: &Graph<N, E>, layers: [Vec<NodeId>; 3]) -> LayerOrder {
    let [mut l1, mut l2, mut l3] = layers;
    let count = |a: &[NodeId], b: &[NodeId], c: &[NodeId]| {
        number_of_crossings(g, a, b) + number_of_crossings(g, b, c)
    };
    let mut crossings = count(&l1, &l2, &l3);
    while crossings > 0 {
        let n2 = reorder_layer(g, &l2, &l1);
        let n3 = reorder_layer(g, &l3, &n2);
        let n2 = reorder_layer(g, &n2, &n3);
        let n1 = reorder_layer(g, &l1, &n2);
        let c = count(&n1, &n2, &n3);
        if c >= crossings {
            break;
        }
        crossings = c;
        l1 = n1;
        l2 = n2;
        l3 = n3;
    }
    LayerOrder {
        layers: vec![l1, l2, l3],
        crossings,
    }
}
