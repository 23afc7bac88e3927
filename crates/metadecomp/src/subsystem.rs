//! Named subsets of the working graph.

use crate::base_graph::BaseGraph;
use indexmap::IndexSet;
use metadecomp_graph::{EdgeId, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a subsystem inside its [`Decomposition`](crate::Decomposition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubsystemId(pub usize);

impl fmt::Display for SubsystemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// A named collection of working-graph species, reactions and edges.
///
/// Members are handles into the base graph's working graph; nothing is copied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubsystemGraph {
    name: String,
    species: IndexSet<NodeId>,
    reactions: IndexSet<NodeId>,
    edges: IndexSet<EdgeId>,
}

impl SubsystemGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builds a subsystem from reactions plus every adjacent species and the connecting edges.
    pub fn from_reactions(
        base: &BaseGraph,
        name: impl Into<String>,
        reactions: impl IntoIterator<Item = NodeId>,
    ) -> Self {
        let mut s = Self::new(name);
        for r in reactions {
            s.add_reaction_with_neighborhood(base, r);
        }
        s
    }

    /// Adds `reaction`, its adjacent species and the edges between them.
    pub fn add_reaction_with_neighborhood(&mut self, base: &BaseGraph, reaction: NodeId) {
        if !base.is_reaction(reaction) {
            return;
        }
        self.reactions.insert(reaction);
        let g = base.working();
        for e in g.node_edges(reaction) {
            let Some(other) = g.opposite(e, reaction) else {
                continue;
            };
            if base.is_species(other) {
                self.species.insert(other);
                self.edges.insert(e);
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn add_species(&mut self, v: NodeId) -> bool {
        if self.reactions.contains(&v) {
            return false;
        }
        self.species.insert(v)
    }

    pub fn add_reaction(&mut self, v: NodeId) -> bool {
        if self.species.contains(&v) {
            return false;
        }
        self.reactions.insert(v)
    }

    pub fn add_edge(&mut self, e: EdgeId) -> bool {
        self.edges.insert(e)
    }

    pub fn species(&self) -> &IndexSet<NodeId> {
        &self.species
    }

    pub fn reactions(&self) -> &IndexSet<NodeId> {
        &self.reactions
    }

    pub fn edges(&self) -> &IndexSet<EdgeId> {
        &self.edges
    }

    pub fn contains_species(&self, v: NodeId) -> bool {
        self.species.contains(&v)
    }

    pub fn contains_reaction(&self, v: NodeId) -> bool {
        self.reactions.contains(&v)
    }

    pub fn contains_node(&self, v: NodeId) -> bool {
        self.contains_species(v) || self.contains_reaction(v)
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }

    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }

    pub fn node_count(&self) -> usize {
        self.species.len() + self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty() && self.reactions.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.species.iter().chain(self.reactions.iter()).copied()
    }

    /// Adds every member of `other` to `self`.
    pub fn absorb(&mut self, other: &SubsystemGraph) {
        self.species.extend(other.species.iter().copied());
        self.reactions.extend(other.reactions.iter().copied());
        self.edges.extend(other.edges.iter().copied());
    }
}
