//! Layer-based crossing minimization and geometric placement.
//!
//! Graphs are drawn as a few layers (e.g. reactions and species). Orders inside each layer are
//! improved with barycenter sweeps before the layers are placed on a circle, concentric circles
//! or parallel lines.

mod barycenter;
mod crossings;
mod ordering;
mod placement;

pub use barycenter::{barycenter, reorder_layer};
pub use crossings::{number_of_crossings, total_crossings};
pub use ordering::{
    CrossingOptions, DEFAULT_RESTARTS, LayerOrder, minimize_three_layer, minimize_two_layer,
};
pub use placement::{
    PlacementOptions, Point, place_concentric, place_on_circle, place_parallel_lines,
};

use indexmap::IndexMap;
use metadecomp_graph::{Graph, NodeId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutStyle {
    /// All layers one after another on a single circle.
    Circular,
    #[default]
    Concentric,
    ParallelLines,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub style: LayoutStyle,
    /// Run crossing minimization for two- and three-layer inputs.
    pub minimize_crossings: bool,
    pub crossing: CrossingOptions,
    pub placement: PlacementOptions,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            style: LayoutStyle::default(),
            minimize_crossings: true,
            crossing: CrossingOptions::default(),
            placement: PlacementOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub layers: Vec<Vec<NodeId>>,
    pub crossings: usize,
    pub positions: IndexMap<NodeId, Point>,
}

impl Layout {
    pub fn position(&self, v: NodeId) -> Option<Point> {
        self.positions.get(&v).copied()
    }
}

pub fn layout_layers<N, E>(
    g: &Graph<N, E>,
    layers: &[Vec<NodeId>],
    options: &LayoutOptions,
) -> Layout {
    let order = match (options.minimize_crossings, layers) {
        (true, [a, b]) => minimize_two_layer(g, a, b, options.crossing),
        (true, [a, b, c]) => minimize_three_layer(g, a, b, c, options.crossing),
        _ => LayerOrder {
            layers: layers.to_vec(),
            crossings: total_crossings(g, layers),
        },
    };

    let placed = match options.style {
        LayoutStyle::Circular => {
            let all: Vec<NodeId> = order.layers.iter().flatten().copied().collect();
            place_on_circle(&all, &options.placement)
        }
        LayoutStyle::Concentric => place_concentric(&order.layers, &options.placement),
        LayoutStyle::ParallelLines => place_parallel_lines(&order.layers, &options.placement),
    };

    Layout {
        layers: order.layers,
        crossings: order.crossings,
        positions: placed.into_iter().collect(),
    }
}
