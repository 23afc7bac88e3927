//! Per-node key/value tags kept beside the graph.

use metadecomp_graph::NodeId;
use rustc_hash::FxHashMap;

/// Subsystem name(s) assigned to a reaction, joined by the configured separator.
pub const SUBSYSTEM: &str = "subsystem";
/// Normalized KEGG reaction identifier.
pub const KEGG_ID: &str = "kegg.id";
/// Pathway names reported by the pathway database, joined by `;`.
pub const KEGG_CANDIDATES: &str = "kegg.candidates";

#[derive(Debug, Clone, Default)]
pub struct AttributeTable {
    values: FxHashMap<NodeId, FxHashMap<String, String>>,
}

impl AttributeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, node: NodeId, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .entry(node)
            .or_default()
            .insert(key.into(), value.into());
    }

    pub fn get(&self, node: NodeId, key: &str) -> Option<&str> {
        self.values.get(&node)?.get(key).map(|s| s.as_str())
    }

    pub fn remove(&mut self, node: NodeId, key: &str) -> Option<String> {
        let map = self.values.get_mut(&node)?;
        let out = map.remove(key);
        if map.is_empty() {
            self.values.remove(&node);
        }
        out
    }

    /// Drops `key` from every node.
    pub fn clear_key(&mut self, key: &str) {
        self.values.retain(|_, map| {
            map.remove(key);
            !map.is_empty()
        });
    }

    pub fn remove_node(&mut self, node: NodeId) {
        self.values.remove(&node);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
