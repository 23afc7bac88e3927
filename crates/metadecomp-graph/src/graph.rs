//! Graph container APIs used by `metadecomp`.
//!
//! This module contains the core `Graph` container plus a small set of helper algorithms
//! re-exported as `metadecomp_graph::alg`.
//!
//! Storage is slot based: removing a node or an edge leaves a tombstone behind so every handle
//! handed out earlier keeps pointing at either the same element or nothing.

mod entries;
mod ids;

pub mod alg;

use entries::{EdgeEntry, NodeEntry};
pub use ids::{EdgeId, NodeId};

#[derive(Debug, Clone)]
pub struct Graph<N, E> {
    nodes: Vec<Option<NodeEntry<N>>>,
    edges: Vec<Option<EdgeEntry<E>>>,
    node_count: usize,
    edge_count: usize,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Graph<N, E> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            node_count: 0,
            edge_count: 0,
        }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            node_count: 0,
            edge_count: 0,
        }
    }

    fn node_entry(&self, v: NodeId) -> Option<&NodeEntry<N>> {
        self.nodes.get(v.index()).and_then(|n| n.as_ref())
    }

    fn node_entry_mut(&mut self, v: NodeId) -> Option<&mut NodeEntry<N>> {
        self.nodes.get_mut(v.index()).and_then(|n| n.as_mut())
    }

    fn edge_entry(&self, e: EdgeId) -> Option<&EdgeEntry<E>> {
        self.edges.get(e.index()).and_then(|e| e.as_ref())
    }

    pub fn add_node(&mut self, label: N) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Some(NodeEntry::new(label)));
        self.node_count += 1;
        id
    }

    pub fn has_node(&self, v: NodeId) -> bool {
        self.node_entry(v).is_some()
    }

    pub fn node(&self, v: NodeId) -> Option<&N> {
        self.node_entry(v).map(|n| &n.label)
    }

    pub fn node_mut(&mut self, v: NodeId) -> Option<&mut N> {
        self.node_entry_mut(v).map(|n| &mut n.label)
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Upper bound (exclusive) of every `NodeId::index()` handed out so far.
    pub fn node_bound(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_some())
            .map(|(ix, _)| NodeId::new(ix))
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes().collect()
    }

    pub fn for_each_node<F>(&self, mut f: F)
    where
        F: FnMut(NodeId, &N),
    {
        for (ix, n) in self.nodes.iter().enumerate() {
            if let Some(n) = n {
                f(NodeId::new(ix), &n.label);
            }
        }
    }

    pub fn for_each_node_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(NodeId, &mut N),
    {
        for (ix, n) in self.nodes.iter_mut().enumerate() {
            if let Some(n) = n {
                f(NodeId::new(ix), &mut n.label);
            }
        }
    }

    /// Adds a directed edge `v -> w`. Returns `None` when either endpoint is missing.
    pub fn add_edge(&mut self, v: NodeId, w: NodeId, label: E) -> Option<EdgeId> {
        if !self.has_node(v) || !self.has_node(w) {
            return None;
        }
        let id = EdgeId::new(self.edges.len());
        self.edges.push(Some(EdgeEntry { v, w, label }));
        self.edge_count += 1;
        self.node_entry_mut(v)?.out.push(id);
        self.node_entry_mut(w)?.in_.push(id);
        Some(id)
    }

    pub fn has_edge(&self, e: EdgeId) -> bool {
        self.edge_entry(e).is_some()
    }

    pub fn edge(&self, e: EdgeId) -> Option<&E> {
        self.edge_entry(e).map(|e| &e.label)
    }

    pub fn edge_mut(&mut self, e: EdgeId) -> Option<&mut E> {
        self.edges
            .get_mut(e.index())
            .and_then(|e| e.as_mut())
            .map(|e| &mut e.label)
    }

    /// `(source, target)` of an edge.
    pub fn endpoints(&self, e: EdgeId) -> Option<(NodeId, NodeId)> {
        self.edge_entry(e).map(|e| (e.v, e.w))
    }

    /// The endpoint of `e` that is not `v`. For self-loops this is `v` itself.
    pub fn opposite(&self, e: EdgeId, v: NodeId) -> Option<NodeId> {
        let (a, b) = self.endpoints(e)?;
        if a == v {
            Some(b)
        } else if b == v {
            Some(a)
        } else {
            None
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_some())
            .map(|(ix, _)| EdgeId::new(ix))
    }

    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.edges().collect()
    }

    pub fn for_each_edge<F>(&self, mut f: F)
    where
        F: FnMut(EdgeId, NodeId, NodeId, &E),
    {
        for (ix, e) in self.edges.iter().enumerate() {
            if let Some(e) = e {
                f(EdgeId::new(ix), e.v, e.w, &e.label);
            }
        }
    }

    /// First edge `v -> w`, if any.
    pub fn find_edge(&self, v: NodeId, w: NodeId) -> Option<EdgeId> {
        self.node_entry(v)?
            .out
            .iter()
            .copied()
            .find(|&e| self.edge_entry(e).is_some_and(|e| e.w == w))
    }

    pub fn remove_edge(&mut self, e: EdgeId) -> Option<E> {
        let entry = self.edges.get_mut(e.index())?.take()?;
        self.edge_count -= 1;
        if let Some(n) = self.node_entry_mut(entry.v) {
            n.out.retain(|&x| x != e);
        }
        if let Some(n) = self.node_entry_mut(entry.w) {
            n.in_.retain(|&x| x != e);
        }
        Some(entry.label)
    }

    /// Removes `v` together with every incident edge.
    pub fn remove_node(&mut self, v: NodeId) -> Option<N> {
        let incident = self.node_edges(v);
        for e in incident {
            let _ = self.remove_edge(e);
        }
        let entry = self.nodes.get_mut(v.index())?.take()?;
        self.node_count -= 1;
        Some(entry.label)
    }

    /// Moves the `from` endpoint of `e` over to `to`, keeping the edge handle and its label.
    ///
    /// Returns `false` when the edge or `to` is missing, or `from` is not an endpoint of `e`.
    pub fn redirect_edge(&mut self, e: EdgeId, from: NodeId, to: NodeId) -> bool {
        if !self.has_node(to) {
            return false;
        }
        let Some(entry) = self.edges.get_mut(e.index()).and_then(|e| e.as_mut()) else {
            return false;
        };
        let outgoing = if entry.v == from {
            entry.v = to;
            true
        } else if entry.w == from {
            entry.w = to;
            false
        } else {
            return false;
        };

        if let Some(n) = self.node_entry_mut(from) {
            if outgoing {
                n.out.retain(|&x| x != e);
            } else {
                n.in_.retain(|&x| x != e);
            }
        }
        if let Some(n) = self.node_entry_mut(to) {
            if outgoing {
                n.out.push(e);
            } else {
                n.in_.push(e);
            }
        }
        true
    }

    pub fn out_edges(&self, v: NodeId) -> &[EdgeId] {
        self.node_entry(v).map(|n| n.out.as_slice()).unwrap_or(&[])
    }

    pub fn in_edges(&self, v: NodeId) -> &[EdgeId] {
        self.node_entry(v).map(|n| n.in_.as_slice()).unwrap_or(&[])
    }

    /// Out-edges followed by in-edges; a self-loop is reported once.
    pub fn node_edges(&self, v: NodeId) -> Vec<EdgeId> {
        let mut out: Vec<EdgeId> = self.out_edges(v).to_vec();
        for &e in self.in_edges(v) {
            if !out.contains(&e) {
                out.push(e);
            }
        }
        out
    }

    pub fn out_degree(&self, v: NodeId) -> usize {
        self.out_edges(v).len()
    }

    pub fn in_degree(&self, v: NodeId) -> usize {
        self.in_edges(v).len()
    }

    /// Number of incident edges, counting both directions.
    pub fn degree(&self, v: NodeId) -> usize {
        self.out_degree(v) + self.in_degree(v)
    }

    pub fn successors(&self, v: NodeId) -> Vec<NodeId> {
        self.out_edges(v)
            .iter()
            .filter_map(|&e| self.edge_entry(e).map(|e| e.w))
            .collect()
    }

    pub fn predecessors(&self, v: NodeId) -> Vec<NodeId> {
        self.in_edges(v)
            .iter()
            .filter_map(|&e| self.edge_entry(e).map(|e| e.v))
            .collect()
    }

    /// Successors then predecessors, without duplicates.
    pub fn neighbors(&self, v: NodeId) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = Vec::new();
        for w in self.successors(v) {
            if !out.contains(&w) {
                out.push(w);
            }
        }
        for u in self.predecessors(v) {
            if !out.contains(&u) {
                out.push(u);
            }
        }
        out
    }
}
