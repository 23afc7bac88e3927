//! Consolidated drawing graph for a selection of subsystems.
//!
//! Subsystems overlap (a metabolite is usually shared by several pathways), so selecting more
//! than one means merging them: every working node appears once, nodes claimed by several
//! selected subsystems are marked as shared and take the interface color, everything else takes
//! its subsystem's palette color.

use crate::base_graph::BaseGraph;
use crate::decomposition::Decomposition;
use crate::error::{Error, Result};
use crate::layout::{Layout, LayoutOptions, layout_layers};
use crate::network::NodeData;
use crate::subsystem::SubsystemId;
use metadecomp_graph::{EdgeId, Graph, NodeId};
use rustc_hash::FxHashMap;
use serde::Serialize;

pub const PALETTE: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22",
    "#17becf", "#aec7e8",
];
pub const INTERFACE_COLOR: &str = "#d62728";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    /// Adds one hub node per subsystem, linked to its reactions.
    pub show_hubs: bool,
    pub interface_color: String,
    pub palette: Vec<String>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            show_hubs: false,
            interface_color: INTERFACE_COLOR.to_string(),
            palette: PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "subsystem", rename_all = "snake_case")]
pub enum ViewNodeKind {
    Species,
    Reaction,
    Hub(SubsystemId),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewNode {
    pub kind: ViewNodeKind,
    /// Working-graph node this was created from; `None` for hubs.
    pub working: Option<NodeId>,
    /// Stable node identifier; the subsystem name for hubs.
    pub label: String,
    /// Selected subsystems containing the node, in selection order.
    pub subsystems: Vec<SubsystemId>,
    pub color: String,
    /// SBGN glyph class, filled in by an [`SbgnTranslator`].
    pub glyph: Option<String>,
}

impl ViewNode {
    pub fn is_shared(&self) -> bool {
        self.subsystems.len() > 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewEdge {
    pub working: Option<EdgeId>,
    pub color: String,
}

pub type ViewGraph = Graph<ViewNode, ViewEdge>;

/// Maps view nodes to SBGN glyph classes.
pub trait SbgnTranslator {
    fn glyph_class(&self, node: &ViewNode, data: Option<&NodeData>) -> Option<String>;
}

/// SBGN process-description classes: species are simple chemicals, reactions are processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessDescription;

impl SbgnTranslator for ProcessDescription {
    fn glyph_class(&self, node: &ViewNode, _data: Option<&NodeData>) -> Option<String> {
        match node.kind {
            ViewNodeKind::Species => Some("simple chemical".to_string()),
            ViewNodeKind::Reaction => Some("process".to_string()),
            ViewNodeKind::Hub(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubsystemView {
    graph: ViewGraph,
    selection: Vec<SubsystemId>,
    working_to_view: FxHashMap<NodeId, NodeId>,
    hubs: Vec<NodeId>,
    reactions: Vec<NodeId>,
    species: Vec<NodeId>,
}

impl SubsystemView {
    pub fn consolidate(
        base: &BaseGraph,
        decomposition: &Decomposition,
        selection: &[SubsystemId],
        options: &ViewOptions,
    ) -> Result<Self> {
        let mut ids: Vec<SubsystemId> = Vec::with_capacity(selection.len());
        for &s in selection {
            if decomposition.subsystem(s).is_none() {
                return Err(Error::UnknownSubsystem {
                    name: s.to_string(),
                });
            }
            if !ids.contains(&s) {
                ids.push(s);
            }
        }
        if ids.is_empty() {
            return Err(Error::NothingSelected);
        }

        let color_of = |pos: usize| -> String {
            if options.palette.is_empty() {
                return options.interface_color.clone();
            }
            options.palette[pos % options.palette.len()].clone()
        };

        let mut view = Self {
            graph: ViewGraph::new(),
            selection: ids.clone(),
            working_to_view: FxHashMap::default(),
            hubs: Vec::new(),
            reactions: Vec::new(),
            species: Vec::new(),
        };
        let mut edge_index: FxHashMap<EdgeId, EdgeId> = FxHashMap::default();

        for (pos, &sid) in ids.iter().enumerate() {
            let Some(sub) = decomposition.subsystem(sid) else {
                continue;
            };
            let color = color_of(pos);

            for v in sub.nodes() {
                let vv = view.ensure_node(base, v, &color);
                if let Some(n) = view.graph.node_mut(vv) {
                    if !n.subsystems.contains(&sid) {
                        n.subsystems.push(sid);
                    }
                }
            }

            for &e in sub.edges() {
                if edge_index.contains_key(&e) {
                    continue;
                }
                let Some((a, b)) = base.working().endpoints(e) else {
                    continue;
                };
                let (Some(&va), Some(&vb)) =
                    (view.working_to_view.get(&a), view.working_to_view.get(&b))
                else {
                    continue;
                };
                let label = ViewEdge {
                    working: Some(e),
                    color: color.clone(),
                };
                if let Some(ve) = view.graph.add_edge(va, vb, label) {
                    edge_index.insert(e, ve);
                }
            }

            if options.show_hubs {
                let hub = view.graph.add_node(ViewNode {
                    kind: ViewNodeKind::Hub(sid),
                    working: None,
                    label: sub.name().to_string(),
                    subsystems: vec![sid],
                    color: color.clone(),
                    glyph: None,
                });
                view.hubs.push(hub);
                for r in sub.reactions() {
                    if let Some(&vr) = view.working_to_view.get(r) {
                        view.graph.add_edge(
                            hub,
                            vr,
                            ViewEdge {
                                working: None,
                                color: color.clone(),
                            },
                        );
                    }
                }
            }
        }

        let interface_color = options.interface_color.clone();
        view.graph.for_each_node_mut(|_, n| {
            if n.is_shared() {
                n.color = interface_color.clone();
            }
        });

        Ok(view)
    }

    fn ensure_node(&mut self, base: &BaseGraph, v: NodeId, color: &str) -> NodeId {
        if let Some(&vv) = self.working_to_view.get(&v) {
            return vv;
        }
        let kind = if base.is_reaction(v) {
            ViewNodeKind::Reaction
        } else {
            ViewNodeKind::Species
        };
        let vv = self.graph.add_node(ViewNode {
            kind,
            working: Some(v),
            label: base.label(v).to_string(),
            subsystems: Vec::new(),
            color: color.to_string(),
            glyph: None,
        });
        match kind {
            ViewNodeKind::Reaction => self.reactions.push(vv),
            _ => self.species.push(vv),
        }
        self.working_to_view.insert(v, vv);
        vv
    }

    pub fn graph(&self) -> &ViewGraph {
        &self.graph
    }

    pub fn selection(&self) -> &[SubsystemId] {
        &self.selection
    }

    pub fn view_node_of(&self, working: NodeId) -> Option<NodeId> {
        self.working_to_view.get(&working).copied()
    }

    pub fn shared_nodes(&self) -> Vec<NodeId> {
        self.graph
            .nodes()
            .filter(|&v| self.graph.node(v).is_some_and(ViewNode::is_shared))
            .collect()
    }

    pub fn hubs(&self) -> &[NodeId] {
        &self.hubs
    }

    /// `[reactions, species]`, or `[hubs, reactions, species]` when hubs are shown.
    pub fn layers(&self) -> Vec<Vec<NodeId>> {
        let mut out = Vec::with_capacity(3);
        if !self.hubs.is_empty() {
            out.push(self.hubs.clone());
        }
        out.push(self.reactions.clone());
        out.push(self.species.clone());
        out
    }

    pub fn layout(&self, options: &LayoutOptions) -> Layout {
        layout_layers(&self.graph, &self.layers(), options)
    }

    pub fn apply_sbgn(&mut self, base: &BaseGraph, translator: &dyn SbgnTranslator) {
        self.graph.for_each_node_mut(|_, n| {
            let data = n.working.and_then(|w| base.node(w));
            n.glyph = translator.glyph_class(n, data);
        });
    }
}
