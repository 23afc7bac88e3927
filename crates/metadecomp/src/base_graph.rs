//! Original/working graph pair with species cloning.
//!
//! The original network is never modified. Decomposition runs on a working copy in which hub
//! metabolites may be split into one degree-1 clone per incident edge, so that e.g. ATP or water
//! do not glue every pathway together. Every working node maps back to exactly one original node.

use crate::attributes::AttributeTable;
use crate::error::{Error, Result};
use crate::network::{Network, NodeData, NodeRole};
use metadecomp_graph::{EdgeId, NodeId};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CloneReport {
    /// Original species that were split.
    pub cloned_species: usize,
    pub created_nodes: usize,
    pub removed_nodes: usize,
}

#[derive(Debug, Clone)]
pub struct BaseGraph {
    original: Network,
    working: Network,
    working_to_original: FxHashMap<NodeId, NodeId>,
    original_to_working: FxHashMap<NodeId, Vec<NodeId>>,
    cloned: FxHashSet<NodeId>,

    original_species: Vec<NodeId>,
    original_reactions: Vec<NodeId>,
    species: Vec<NodeId>,
    reactions: Vec<NodeId>,

    // Index = degree, value = number of original species with at least that degree.
    species_with_degree_at_least: Vec<usize>,

    attributes: AttributeTable,
}

impl BaseGraph {
    pub fn new(original: Network) -> Self {
        let mut working: Network = Network::with_capacity(original.node_count(), original.edge_count());
        let mut working_to_original: FxHashMap<NodeId, NodeId> = FxHashMap::default();
        let mut original_to_working: FxHashMap<NodeId, Vec<NodeId>> = FxHashMap::default();

        original.for_each_node(|v, data| {
            let w = working.add_node(data.clone());
            working_to_original.insert(w, v);
            original_to_working.insert(v, vec![w]);
        });
        original.for_each_edge(|_, v, w, data| {
            let (Some(wv), Some(ww)) = (
                original_to_working.get(&v).and_then(|x| x.first()),
                original_to_working.get(&w).and_then(|x| x.first()),
            ) else {
                return;
            };
            working.add_edge(*wv, *ww, *data);
        });

        let original_species = nodes_with_role(&original, NodeRole::Species);
        let original_reactions = nodes_with_role(&original, NodeRole::Reaction);

        let max_degree = original_species
            .iter()
            .map(|&v| original.degree(v))
            .max()
            .unwrap_or(0);
        let mut counts: Vec<usize> = vec![0; max_degree + 2];
        for &v in &original_species {
            counts[original.degree(v)] += 1;
        }
        for d in (0..=max_degree).rev() {
            counts[d] += counts[d + 1];
        }

        let mut out = Self {
            original,
            working,
            working_to_original,
            original_to_working,
            cloned: FxHashSet::default(),
            original_species,
            original_reactions,
            species: Vec::new(),
            reactions: Vec::new(),
            species_with_degree_at_least: counts,
            attributes: AttributeTable::new(),
        };
        out.update_lists();
        debug!(
            species = out.species.len(),
            reactions = out.reactions.len(),
            max_degree,
            "base graph built"
        );
        out
    }

    pub fn original(&self) -> &Network {
        &self.original
    }

    pub fn working(&self) -> &Network {
        &self.working
    }

    pub fn attributes(&self) -> &AttributeTable {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeTable {
        &mut self.attributes
    }

    /// Recomputes the working species/reaction caches.
    pub fn update_lists(&mut self) {
        self.species = nodes_with_role(&self.working, NodeRole::Species);
        self.reactions = nodes_with_role(&self.working, NodeRole::Reaction);
    }

    /// Species of the working graph (clones included).
    pub fn species(&self) -> &[NodeId] {
        &self.species
    }

    pub fn reactions(&self) -> &[NodeId] {
        &self.reactions
    }

    /// Species of the original graph, independent of any cloning.
    pub fn original_species(&self) -> &[NodeId] {
        &self.original_species
    }

    pub fn original_reactions(&self) -> &[NodeId] {
        &self.original_reactions
    }

    pub fn node(&self, v: NodeId) -> Option<&NodeData> {
        self.working.node(v)
    }

    pub fn is_species(&self, v: NodeId) -> bool {
        self.working.node(v).is_some_and(NodeData::is_species)
    }

    pub fn is_reaction(&self, v: NodeId) -> bool {
        self.working.node(v).is_some_and(NodeData::is_reaction)
    }

    /// Stable identifier of a working node (shared by all clones of one species).
    pub fn label(&self, v: NodeId) -> &str {
        self.working.node(v).map(|n| n.id.as_str()).unwrap_or("")
    }

    pub fn compartment(&self, v: NodeId) -> Option<&str> {
        self.working.node(v)?.compartment.as_deref()
    }

    pub fn original_of(&self, working: NodeId) -> Option<NodeId> {
        self.working_to_original.get(&working).copied()
    }

    pub fn working_of(&self, original: NodeId) -> &[NodeId] {
        self.original_to_working
            .get(&original)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_cloned(&self, original: NodeId) -> bool {
        self.cloned.contains(&original)
    }

    /// Working species adjacent to `v`, in adjacency order.
    pub fn species_neighbors(&self, v: NodeId) -> Vec<NodeId> {
        self.working
            .neighbors(v)
            .into_iter()
            .filter(|&n| self.is_species(n))
            .collect()
    }

    /// Working reactions adjacent to `v`, in adjacency order.
    pub fn reaction_neighbors(&self, v: NodeId) -> Vec<NodeId> {
        self.working
            .neighbors(v)
            .into_iter()
            .filter(|&n| self.is_reaction(n))
            .collect()
    }

    pub fn incident_edges(&self, v: NodeId) -> Vec<EdgeId> {
        self.working.node_edges(v)
    }

    /// Highest degree of any original species.
    pub fn max_degree(&self) -> usize {
        self.species_with_degree_at_least.len().saturating_sub(2)
    }

    /// Number of original species with degree `>= d`. O(1).
    pub fn number_of_species_with_degree_at_least(&self, d: usize) -> usize {
        self.species_with_degree_at_least
            .get(d)
            .copied()
            .unwrap_or(0)
    }

    /// Number of original species with exactly degree `d`, for `d` in `0..=max_degree()`.
    pub fn degree_histogram(&self) -> Vec<usize> {
        self.species_with_degree_at_least
            .windows(2)
            .map(|w| w[0] - w[1])
            .collect()
    }

    pub fn original_species_with_degree_at_least(&self, d: usize) -> Vec<NodeId> {
        self.original_species
            .iter()
            .copied()
            .filter(|&v| self.original.degree(v) >= d)
            .collect()
    }

    pub fn species_with_degree_at_least(&self, d: usize) -> Vec<NodeId> {
        self.species
            .iter()
            .copied()
            .filter(|&v| self.working.degree(v) >= d)
            .collect()
    }

    /// Splits every given original species into one working clone per incident edge.
    ///
    /// The whole request is validated before the working graph is touched: unknown nodes,
    /// non-species and species that were cloned before are rejected.
    pub fn clone_species(&mut self, originals: &[NodeId]) -> Result<CloneReport> {
        let mut todo: Vec<NodeId> = Vec::with_capacity(originals.len());
        for &o in originals {
            let Some(data) = self.original.node(o) else {
                return Err(Error::UnknownNode { node: o });
            };
            if !data.is_species() {
                return Err(Error::NotASpecies { node: o });
            }
            if self.cloned.contains(&o) {
                return Err(Error::AlreadyCloned { node: o });
            }
            if !todo.contains(&o) {
                todo.push(o);
            }
        }

        let mut report = CloneReport::default();
        for o in todo {
            let Some(&rep) = self.working_of(o).first() else {
                continue;
            };
            let edges = self.working.node_edges(rep);
            if edges.is_empty() {
                continue;
            }
            let Some(data) = self.working.node(rep).cloned() else {
                continue;
            };

            let mut clones: Vec<NodeId> = Vec::with_capacity(edges.len());
            for e in edges {
                let c = self.working.add_node(data.clone());
                self.working.redirect_edge(e, rep, c);
                self.working_to_original.insert(c, o);
                clones.push(c);
            }

            self.working.remove_node(rep);
            self.working_to_original.remove(&rep);
            self.attributes.remove_node(rep);

            report.cloned_species += 1;
            report.created_nodes += clones.len();
            report.removed_nodes += 1;
            self.original_to_working.insert(o, clones);
            self.cloned.insert(o);
        }

        self.update_lists();
        debug!(
            cloned = report.cloned_species,
            created = report.created_nodes,
            "species cloned"
        );
        Ok(report)
    }
}

fn nodes_with_role(g: &Network, role: NodeRole) -> Vec<NodeId> {
    let mut out = Vec::new();
    g.for_each_node(|v, n| {
        if n.role == role {
            out.push(v);
        }
    });
    out
}
