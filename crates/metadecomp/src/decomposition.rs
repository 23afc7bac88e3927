//! The result of a decomposition run: subsystems plus membership indices.

use crate::subsystem::{SubsystemGraph, SubsystemId};
use metadecomp_graph::NodeId;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct Decomposition {
    subsystems: Vec<SubsystemGraph>,
    species_to_subsystems: FxHashMap<NodeId, Vec<SubsystemId>>,
    reaction_to_subsystems: FxHashMap<NodeId, Vec<SubsystemId>>,
}

impl Decomposition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `s` and registers it with every member node. O(|s|).
    pub fn add_subsystem(&mut self, s: SubsystemGraph) -> SubsystemId {
        let id = SubsystemId(self.subsystems.len());
        for &v in s.species() {
            self.species_to_subsystems.entry(v).or_default().push(id);
        }
        for &v in s.reactions() {
            self.reaction_to_subsystems.entry(v).or_default().push(id);
        }
        self.subsystems.push(s);
        id
    }

    pub fn subsystems(&self) -> &[SubsystemGraph] {
        &self.subsystems
    }

    pub fn subsystem(&self, id: SubsystemId) -> Option<&SubsystemGraph> {
        self.subsystems.get(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = SubsystemId> + '_ {
        (0..self.subsystems.len()).map(SubsystemId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SubsystemId, &SubsystemGraph)> {
        self.subsystems
            .iter()
            .enumerate()
            .map(|(i, s)| (SubsystemId(i), s))
    }

    pub fn len(&self) -> usize {
        self.subsystems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subsystems.is_empty()
    }

    /// First subsystem with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<SubsystemId> {
        self.subsystems
            .iter()
            .position(|s| s.name() == name)
            .map(SubsystemId)
    }

    pub fn subsystems_of_species(&self, v: NodeId) -> &[SubsystemId] {
        self.species_to_subsystems
            .get(&v)
            .map(|x| x.as_slice())
            .unwrap_or(&[])
    }

    pub fn subsystems_of_reaction(&self, v: NodeId) -> &[SubsystemId] {
        self.reaction_to_subsystems
            .get(&v)
            .map(|x| x.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_reaction_been_classified(&self, v: NodeId) -> bool {
        self.reaction_to_subsystems.contains_key(&v)
    }

    pub fn has_species_been_classified(&self, v: NodeId) -> bool {
        self.species_to_subsystems.contains_key(&v)
    }
}
