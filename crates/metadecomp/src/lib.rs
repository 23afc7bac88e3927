#![forbid(unsafe_code)]

//! Metabolic network decomposition (headless).
//!
//! Pipeline:
//! - [`BaseGraph`]: original/working graph pair, hub species cloning, degree statistics
//! - [`algorithm`]: decomposition strategies plus the shared [`run`](algorithm::run) orchestration
//! - [`Decomposition`]: subsystems and node membership indices
//! - [`OverviewGraph`]: one node per subsystem, edges from shared interface metabolites
//! - [`layout`]: layer-based crossing minimization and geometric placement
//! - [`SubsystemView`]: merges selected subsystems into one drawable graph
//!
//! [`Session`] ties these together for a front end.

pub use metadecomp_graph as graph;

pub mod algorithm;
pub mod attributes;
pub mod base_graph;
pub mod config;
pub mod decomposition;
pub mod error;
pub mod layout;
pub mod network;
pub mod overview;
pub mod pathway_db;
pub mod session;
pub mod subsystem;
pub mod view;

pub use algorithm::{DecompositionAlgorithm, DecompositionOutcome, run};
pub use attributes::AttributeTable;
pub use base_graph::{BaseGraph, CloneReport};
pub use config::{ConfigDocument, DecompositionConfig, TransporterMode};
pub use decomposition::Decomposition;
pub use error::{Error, LookupError, Result, Warning};
pub use graph::{EdgeId, NodeId};
pub use network::{EdgeData, Network, NetworkBuilder, NetworkDocument, NodeData, NodeRole};
pub use overview::{OverviewEdge, OverviewGraph, OverviewNode, OverviewOptions};
pub use session::Session;
pub use subsystem::{SubsystemGraph, SubsystemId};
pub use view::{SbgnTranslator, SubsystemView, ViewOptions};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
