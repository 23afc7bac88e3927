use metadecomp_graph::NodeId;
use serde::Serialize;
use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementOptions {
    /// Distance between neighboring nodes on a circle or line.
    pub node_spacing: f64,
    /// Radius increment between concentric rings.
    pub ring_gap: f64,
    /// Distance between parallel lines.
    pub line_gap: f64,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            node_spacing: 60.0,
            ring_gap: 80.0,
            line_gap: 120.0,
        }
    }
}

/// Evenly spaced on one circle around the origin, starting at angle 0.
pub fn place_on_circle(nodes: &[NodeId], options: &PlacementOptions) -> Vec<(NodeId, Point)> {
    let radius = circumference_radius(nodes.len(), options.node_spacing);
    on_ring(nodes, radius)
}

/// Layer `k` on a ring of radius `r0 + k * ring_gap`, where `r0` gives the largest layer
/// `node_spacing` of arc per node.
pub fn place_concentric(layers: &[Vec<NodeId>], options: &PlacementOptions) -> Vec<(NodeId, Point)> {
    let widest = layers.iter().map(Vec::len).max().unwrap_or(0);
    let base = circumference_radius(widest, options.node_spacing);
    layers
        .iter()
        .enumerate()
        .flat_map(|(k, layer)| on_ring(layer, base + k as f64 * options.ring_gap))
        .collect()
}

/// Layer `k` on the horizontal line `y = k * line_gap`. Every line spans the width the largest
/// layer needs; a single node sits in the middle.
pub fn place_parallel_lines(
    layers: &[Vec<NodeId>],
    options: &PlacementOptions,
) -> Vec<(NodeId, Point)> {
    let widest = layers.iter().map(Vec::len).max().unwrap_or(0);
    let width = widest.saturating_sub(1) as f64 * options.node_spacing;
    let mut out = Vec::with_capacity(layers.iter().map(Vec::len).sum());
    for (k, layer) in layers.iter().enumerate() {
        let y = k as f64 * options.line_gap;
        let n = layer.len();
        for (i, &v) in layer.iter().enumerate() {
            let x = if n <= 1 {
                width / 2.0
            } else {
                i as f64 * width / (n - 1) as f64
            };
            out.push((v, Point::new(x, y)));
        }
    }
    out
}

fn circumference_radius(n: usize, spacing: f64) -> f64 {
    n as f64 * spacing / TAU
}

fn on_ring(nodes: &[NodeId], radius: f64) -> Vec<(NodeId, Point)> {
    let n = nodes.len().max(1) as f64;
    nodes
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let a = TAU * i as f64 / n;
            (v, Point::new(radius * a.cos(), radius * a.sin()))
        })
        .collect()
}
