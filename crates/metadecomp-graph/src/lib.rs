#![forbid(unsafe_code)]

//! Graph container APIs used by `metadecomp`.
//!
//! Nodes and edges are addressed by plain integer handles ([`NodeId`], [`EdgeId`]). Handles are
//! never reused after removal, so side tables keyed by them stay valid while the graph is being
//! rewritten (e.g. when a hub metabolite is split into per-edge clones).

mod graph;

pub use graph::{EdgeId, Graph, NodeId, alg};
