//! Coarse graph with one node per subsystem.
//!
//! An interface metabolite for the ordered pair `(S1, S2)` is a species produced by a reaction of
//! `S1` and consumed by a reaction of `S2`. Two subsystem nodes are joined iff at least one
//! interface exists in either direction.

use crate::base_graph::BaseGraph;
use crate::decomposition::Decomposition;
use crate::error::{Error, Result};
use crate::subsystem::SubsystemId;
use metadecomp_graph::{EdgeId, Graph, NodeId};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverviewNode {
    Subsystem {
        subsystem: SubsystemId,
        name: String,
        species: usize,
        reactions: usize,
        selected: bool,
    },
    /// Only present with [`OverviewOptions::show_interfaces`].
    Interface { species: NodeId, label: String },
}

impl OverviewNode {
    pub fn is_subsystem(&self) -> bool {
        matches!(self, OverviewNode::Subsystem { .. })
    }

    pub fn label(&self) -> &str {
        match self {
            OverviewNode::Subsystem { name, .. } => name,
            OverviewNode::Interface { label, .. } => label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverviewEdge {
    /// Distinct interface metabolites carried by this edge (both directions combined).
    pub interface_count: usize,
    pub thickness: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverviewOptions {
    /// Draw every interface metabolite as its own node between the subsystems it connects.
    pub show_interfaces: bool,
}

pub type OverviewNetwork = Graph<OverviewNode, OverviewEdge>;

#[derive(Debug, Clone)]
pub struct OverviewGraph {
    graph: OverviewNetwork,
    decomposition: Decomposition,
    interfaces: BTreeMap<(SubsystemId, SubsystemId), Vec<NodeId>>,
    node_to_subsystem: FxHashMap<NodeId, SubsystemId>,
    subsystem_to_node: Vec<NodeId>,
    interface_nodes: Vec<NodeId>,
    options: OverviewOptions,
}

impl OverviewGraph {
    pub fn build(base: &BaseGraph, decomposition: Decomposition, options: OverviewOptions) -> Self {
        let interfaces = determine_interfaces(base, &decomposition);

        let mut graph = OverviewNetwork::new();
        let mut node_to_subsystem: FxHashMap<NodeId, SubsystemId> = FxHashMap::default();
        let mut subsystem_to_node: Vec<NodeId> = Vec::with_capacity(decomposition.len());
        for (id, s) in decomposition.iter() {
            let v = graph.add_node(OverviewNode::Subsystem {
                subsystem: id,
                name: s.name().to_string(),
                species: s.species_count(),
                reactions: s.reaction_count(),
                selected: false,
            });
            node_to_subsystem.insert(v, id);
            subsystem_to_node.push(v);
        }

        let pairs: BTreeSet<(SubsystemId, SubsystemId)> = interfaces
            .keys()
            .map(|&(a, b)| (a.min(b), a.max(b)))
            .collect();

        let mut interface_index: FxHashMap<NodeId, NodeId> = FxHashMap::default();
        let mut interface_nodes: Vec<NodeId> = Vec::new();
        for (a, b) in pairs {
            let combined = combine(&interfaces, a, b);
            if combined.is_empty() {
                continue;
            }
            let (va, vb) = (subsystem_to_node[a.0], subsystem_to_node[b.0]);
            if !options.show_interfaces {
                graph.add_edge(
                    va,
                    vb,
                    OverviewEdge {
                        interface_count: combined.len(),
                        thickness: 1.0,
                    },
                );
                continue;
            }
            for s in combined {
                let iv = *interface_index.entry(s).or_insert_with(|| {
                    let iv = graph.add_node(OverviewNode::Interface {
                        species: s,
                        label: base.label(s).to_string(),
                    });
                    interface_nodes.push(iv);
                    iv
                });
                for sv in [va, vb] {
                    if graph.find_edge(sv, iv).is_none() {
                        graph.add_edge(
                            sv,
                            iv,
                            OverviewEdge {
                                interface_count: 1,
                                thickness: 1.0,
                            },
                        );
                    }
                }
            }
        }

        debug!(
            subsystems = subsystem_to_node.len(),
            edges = graph.edge_count(),
            interface_nodes = interface_nodes.len(),
            "overview graph built"
        );

        Self {
            graph,
            decomposition,
            interfaces,
            node_to_subsystem,
            subsystem_to_node,
            interface_nodes,
            options,
        }
    }

    pub fn graph(&self) -> &OverviewNetwork {
        &self.graph
    }

    pub fn decomposition(&self) -> &Decomposition {
        &self.decomposition
    }

    pub fn options(&self) -> OverviewOptions {
        self.options
    }

    /// Species with an in-neighbor reaction in `from` and an out-neighbor reaction in `to`.
    pub fn interfaces(&self, from: SubsystemId, to: SubsystemId) -> &[NodeId] {
        self.interfaces
            .get(&(from, to))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Interfaces of both directions, deduplicated and sorted.
    pub fn combined_interfaces(&self, a: SubsystemId, b: SubsystemId) -> Vec<NodeId> {
        combine(&self.interfaces, a, b)
    }

    /// Every directed pair with at least one interface.
    pub fn interface_pairs(&self) -> impl Iterator<Item = (SubsystemId, SubsystemId)> + '_ {
        self.interfaces.keys().copied()
    }

    pub fn are_connected(&self, a: SubsystemId, b: SubsystemId) -> bool {
        !self.combined_interfaces(a, b).is_empty()
    }

    pub fn node_of(&self, s: SubsystemId) -> Option<NodeId> {
        self.subsystem_to_node.get(s.0).copied()
    }

    pub fn subsystem_of(&self, v: NodeId) -> Option<SubsystemId> {
        self.node_to_subsystem.get(&v).copied()
    }

    pub fn subsystem_nodes(&self) -> &[NodeId] {
        &self.subsystem_to_node
    }

    pub fn interface_nodes(&self) -> &[NodeId] {
        &self.interface_nodes
    }

    /// Subsystem nodes, then interface nodes (when shown).
    pub fn layers(&self) -> Vec<Vec<NodeId>> {
        let mut out = vec![self.subsystem_to_node.clone()];
        if !self.interface_nodes.is_empty() {
            out.push(self.interface_nodes.clone());
        }
        out
    }

    /// Scales edge thickness linearly from `min` (fewest interfaces) to `max` (most).
    pub fn recompute_edge_thickness(&mut self, min: f64, max: f64) {
        let edges: Vec<EdgeId> = self.graph.edge_ids();
        let counts = edges
            .iter()
            .filter_map(|&e| self.graph.edge(e).map(|l| l.interface_count));
        let (lo, hi) = counts.fold((usize::MAX, 0usize), |(lo, hi), c| (lo.min(c), hi.max(c)));
        for e in edges {
            let Some(label) = self.graph.edge_mut(e) else {
                continue;
            };
            label.thickness = if hi <= lo {
                min
            } else {
                let t = (label.interface_count - lo) as f64 / (hi - lo) as f64;
                min + t * (max - min)
            };
        }
    }

    pub fn select(&mut self, s: SubsystemId) -> Result<()> {
        self.set_flag(s, true)
    }

    pub fn deselect(&mut self, s: SubsystemId) -> Result<()> {
        self.set_flag(s, false)
    }

    pub fn select_by_name(&mut self, name: &str) -> Result<SubsystemId> {
        let id = self
            .decomposition
            .find_by_name(name)
            .ok_or_else(|| Error::UnknownSubsystem {
                name: name.to_string(),
            })?;
        self.select(id)?;
        Ok(id)
    }

    /// Replaces the selection. Nothing changes if any id is unknown.
    pub fn set_selected(&mut self, ids: &[SubsystemId]) -> Result<()> {
        if let Some(bad) = ids.iter().find(|s| s.0 >= self.subsystem_to_node.len()) {
            return Err(Error::UnknownSubsystem {
                name: bad.to_string(),
            });
        }
        self.clear_selection();
        for &s in ids {
            self.set_flag(s, true)?;
        }
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.graph.for_each_node_mut(|_, n| {
            if let OverviewNode::Subsystem { selected, .. } = n {
                *selected = false;
            }
        });
    }

    pub fn is_selected(&self, s: SubsystemId) -> bool {
        self.node_of(s)
            .and_then(|v| self.graph.node(v))
            .is_some_and(|n| matches!(n, OverviewNode::Subsystem { selected: true, .. }))
    }

    /// Selected subsystems in id order.
    pub fn selected_subsystems(&self) -> Vec<SubsystemId> {
        self.decomposition
            .ids()
            .filter(|&s| self.is_selected(s))
            .collect()
    }

    fn set_flag(&mut self, s: SubsystemId, value: bool) -> Result<()> {
        let node = self
            .node_of(s)
            .and_then(|v| self.graph.node_mut(v))
            .ok_or_else(|| Error::UnknownSubsystem {
                name: s.to_string(),
            })?;
        if let OverviewNode::Subsystem { selected, .. } = node {
            *selected = value;
        }
        Ok(())
    }
}

/// Directed interface sets for every ordered subsystem pair with at least one interface.
pub fn determine_interfaces(
    base: &BaseGraph,
    decomposition: &Decomposition,
) -> BTreeMap<(SubsystemId, SubsystemId), Vec<NodeId>> {
    let g = base.working();
    let mut out: BTreeMap<(SubsystemId, SubsystemId), Vec<NodeId>> = BTreeMap::new();

    for &s in base.species() {
        let in_systems: BTreeSet<SubsystemId> = g
            .predecessors(s)
            .into_iter()
            .filter(|&r| base.is_reaction(r))
            .flat_map(|r| decomposition.subsystems_of_reaction(r).iter().copied())
            .collect();
        if in_systems.is_empty() {
            continue;
        }
        let out_systems: BTreeSet<SubsystemId> = g
            .successors(s)
            .into_iter()
            .filter(|&r| base.is_reaction(r))
            .flat_map(|r| decomposition.subsystems_of_reaction(r).iter().copied())
            .collect();

        for &a in &in_systems {
            for &b in &out_systems {
                if a != b {
                    out.entry((a, b)).or_default().push(s);
                }
            }
        }
    }

    out
}

fn combine(
    interfaces: &BTreeMap<(SubsystemId, SubsystemId), Vec<NodeId>>,
    a: SubsystemId,
    b: SubsystemId,
) -> Vec<NodeId> {
    let mut set: BTreeSet<NodeId> = BTreeSet::new();
    for key in [(a, b), (b, a)] {
        if let Some(v) = interfaces.get(&key) {
            set.extend(v.iter().copied());
        }
    }
    set.into_iter().collect()
}
