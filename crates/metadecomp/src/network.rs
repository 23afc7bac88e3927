//! Input network model.
//!
//! The network is a directed graph whose nodes are tagged as species (metabolites) or reactions.
//! Reactants point at their reaction, reactions point at their products.

use crate::error::{Error, Result};
use metadecomp_graph::{Graph, NodeId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Species,
    Reaction,
    #[default]
    Untagged,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeData {
    /// Stable identifier from the model provider.
    pub id: String,
    pub name: String,
    pub role: NodeRole,
    pub compartment: Option<String>,
    /// Free-text annotations keyed by tag.
    pub notes: BTreeMap<String, String>,
    /// KEGG reaction identifier (`R00200` or `rn:R00200`).
    pub kegg_id: Option<String>,
}

impl NodeData {
    pub fn species(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            role: NodeRole::Species,
            ..Default::default()
        }
    }

    pub fn reaction(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            role: NodeRole::Reaction,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_compartment(mut self, compartment: impl Into<String>) -> Self {
        self.compartment = Some(compartment.into());
        self
    }

    pub fn with_note(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.notes.insert(key.into(), value.into());
        self
    }

    pub fn with_kegg_id(mut self, kegg_id: impl Into<String>) -> Self {
        self.kegg_id = Some(kegg_id.into());
        self
    }

    pub fn is_species(&self) -> bool {
        self.role == NodeRole::Species
    }

    pub fn is_reaction(&self) -> bool {
        self.role == NodeRole::Reaction
    }

    pub fn note(&self, key: &str) -> Option<&str> {
        self.notes.get(key).map(|s| s.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeData {
    pub stoichiometry: f64,
}

impl Default for EdgeData {
    fn default() -> Self {
        Self { stoichiometry: 1.0 }
    }
}

pub type Network = Graph<NodeData, EdgeData>;

/// Looks a node up by its stable identifier (linear scan).
pub fn find_node(network: &Network, id: &str) -> Option<NodeId> {
    network
        .nodes()
        .find(|&v| network.node(v).is_some_and(|n| n.id == id))
}

/// Incremental network construction keyed by stable identifiers.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    graph: Network,
    index: FxHashMap<String, NodeId>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node; a node with an already known id is replaced in place.
    pub fn add(&mut self, data: NodeData) -> NodeId {
        if let Some(&v) = self.index.get(&data.id) {
            if let Some(slot) = self.graph.node_mut(v) {
                *slot = data;
            }
            return v;
        }
        let id = data.id.clone();
        let v = self.graph.add_node(data);
        self.index.insert(id, v);
        v
    }

    pub fn species(&mut self, id: &str, compartment: Option<&str>) -> NodeId {
        let mut data = NodeData::species(id);
        data.compartment = compartment.map(str::to_string);
        self.add(data)
    }

    pub fn reaction(&mut self, id: &str) -> NodeId {
        self.add(NodeData::reaction(id))
    }

    pub fn lookup(&self, id: &str) -> Option<NodeId> {
        self.index.get(id).copied()
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut NodeData> {
        let v = self.lookup(id)?;
        self.graph.node_mut(v)
    }

    /// `species -> reaction`
    pub fn consumes(&mut self, reaction: NodeId, species: NodeId) -> &mut Self {
        self.graph.add_edge(species, reaction, EdgeData::default());
        self
    }

    /// `reaction -> species`
    pub fn produces(&mut self, reaction: NodeId, species: NodeId) -> &mut Self {
        self.graph.add_edge(reaction, species, EdgeData::default());
        self
    }

    pub fn edge(&mut self, from: NodeId, to: NodeId, stoichiometry: f64) -> &mut Self {
        self.graph.add_edge(from, to, EdgeData { stoichiometry });
        self
    }

    pub fn build(self) -> Network {
        self.graph
    }
}

fn one() -> f64 {
    1.0
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeciesDocument {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub compartment: Option<String>,
    #[serde(default)]
    pub notes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoichiometryDocument {
    pub species: String,
    #[serde(default = "one")]
    pub stoichiometry: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReactionDocument {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kegg_id: Option<String>,
    #[serde(default)]
    pub compartment: Option<String>,
    #[serde(default)]
    pub notes: BTreeMap<String, String>,
    #[serde(default)]
    pub reactants: Vec<StoichiometryDocument>,
    #[serde(default)]
    pub products: Vec<StoichiometryDocument>,
}

/// JSON exchange shape for a network.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkDocument {
    #[serde(default)]
    pub species: Vec<SpeciesDocument>,
    #[serde(default)]
    pub reactions: Vec<ReactionDocument>,
}

impl NetworkDocument {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn into_network(self) -> Result<Network> {
        let mut b = NetworkBuilder::new();

        for s in self.species {
            if b.lookup(&s.id).is_some() {
                return Err(Error::InvalidNetwork {
                    message: format!("duplicate id {}", s.id),
                });
            }
            let mut data = NodeData::species(&s.id);
            if let Some(name) = s.name {
                data.name = name;
            }
            data.compartment = s.compartment;
            data.notes = s.notes;
            b.add(data);
        }

        for r in self.reactions {
            if b.lookup(&r.id).is_some() {
                return Err(Error::InvalidNetwork {
                    message: format!("duplicate id {}", r.id),
                });
            }
            let mut data = NodeData::reaction(&r.id);
            if let Some(name) = r.name {
                data.name = name;
            }
            data.kegg_id = r.kegg_id;
            data.compartment = r.compartment;
            data.notes = r.notes;
            let rv = b.add(data);

            for s in &r.reactants {
                let sv = species_ref(&b, &r.id, &s.species)?;
                b.edge(sv, rv, s.stoichiometry);
            }
            for s in &r.products {
                let sv = species_ref(&b, &r.id, &s.species)?;
                b.edge(rv, sv, s.stoichiometry);
            }
        }

        Ok(b.build())
    }
}

fn species_ref(b: &NetworkBuilder, reaction: &str, species: &str) -> Result<NodeId> {
    b.lookup(species)
        .filter(|&v| b.graph.node(v).is_some_and(NodeData::is_species))
        .ok_or_else(|| Error::InvalidNetwork {
            message: format!("reaction {reaction} references unknown species {species}"),
        })
}
