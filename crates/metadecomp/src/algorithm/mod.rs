//! Decomposition algorithms and the shared run orchestration.
//!
//! Every algorithm implements [`DecompositionAlgorithm`]; [`run`] performs the steps common to
//! all of them:
//!
//! 1. clone hub species (when configured or required),
//! 2. collect transporter reactions (when configured or required),
//! 3. `run_specific`, excluding the transporter reactions,
//! 4. append the transporter subsystem,
//! 5. append the default subsystem(s) built from every reaction still unclassified.

mod attribute;
mod compartment;
mod default;
mod kegg;
mod predefined;
mod schuster;
mod transporter;

pub use attribute::subsystems_from_attribute;
pub use compartment::CompartmentAlgorithm;
pub use default::{DEFAULT_SUBSYSTEM, default_subsystems};
pub use kegg::{KeggPathways, peel_frequent_pathways};
pub use predefined::PredefinedAnnotation;
pub use schuster::SchusterHeuristic;
pub use transporter::{TRANSPORTER_SUBSYSTEM, transporter_reactions};

use crate::attributes;
use crate::base_graph::{BaseGraph, CloneReport};
use crate::config::{DEFAULT_CLONING_DEGREE, DecompositionConfig};
use crate::decomposition::Decomposition;
use crate::error::{Result, Warning};
use crate::subsystem::SubsystemGraph;
use metadecomp_graph::NodeId;
use rustc_hash::FxHashSet;
use tracing::{debug, info};

/// Mutable state handed to [`DecompositionAlgorithm::run_specific`].
pub struct RunContext<'a> {
    pub base: &'a mut BaseGraph,
    pub config: &'a DecompositionConfig,
    warnings: Vec<Warning>,
}

impl<'a> RunContext<'a> {
    pub fn new(base: &'a mut BaseGraph, config: &'a DecompositionConfig) -> Self {
        Self {
            base,
            config,
            warnings: Vec::new(),
        }
    }

    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

pub trait DecompositionAlgorithm {
    fn name(&self) -> &str;

    /// Hub species must be cloned before `run_specific`.
    fn requires_cloning(&self) -> bool {
        false
    }

    /// A transporter subsystem is always built, regardless of configuration.
    fn requires_transporter_subsystem(&self) -> bool {
        false
    }

    /// Algorithm-specific partitioning. Reactions in `already_classified` must be left out.
    fn run_specific(
        &self,
        ctx: &mut RunContext<'_>,
        already_classified: &FxHashSet<NodeId>,
    ) -> Result<Vec<SubsystemGraph>>;
}

#[derive(Debug, Clone, Default)]
pub struct DecompositionOutcome {
    pub decomposition: Decomposition,
    pub warnings: Vec<Warning>,
    pub cloning: Option<CloneReport>,
}

pub fn run(
    base: &mut BaseGraph,
    algorithm: &dyn DecompositionAlgorithm,
    config: &DecompositionConfig,
) -> Result<DecompositionOutcome> {
    let mut outcome = DecompositionOutcome::default();

    let cloning_threshold = config.cloning_degree_threshold.or(algorithm
        .requires_cloning()
        .then_some(DEFAULT_CLONING_DEGREE));
    if let Some(d) = cloning_threshold {
        let candidates: Vec<NodeId> = base
            .original_species_with_degree_at_least(d)
            .into_iter()
            .filter(|&v| !base.is_cloned(v))
            .collect();
        outcome.cloning = Some(base.clone_species(&candidates)?);
    }

    base.attributes_mut().clear_key(attributes::SUBSYSTEM);

    let wants_transporters =
        config.add_transporter_subsystem || algorithm.requires_transporter_subsystem();
    let transporters: Vec<NodeId> = if wants_transporters {
        transporter_reactions(base, config.transporter_mode)
    } else {
        Vec::new()
    };
    let already_classified: FxHashSet<NodeId> = transporters.iter().copied().collect();

    let mut ctx = RunContext::new(base, config);
    let specific = algorithm.run_specific(&mut ctx, &already_classified)?;
    outcome.warnings = ctx.into_warnings();
    debug!(
        algorithm = algorithm.name(),
        subsystems = specific.len(),
        "algorithm-specific subsystems built"
    );

    for s in specific {
        if !s.is_empty() {
            outcome.decomposition.add_subsystem(s);
        }
    }

    if !transporters.is_empty() {
        let s = SubsystemGraph::from_reactions(base, TRANSPORTER_SUBSYSTEM, transporters);
        outcome.decomposition.add_subsystem(s);
    }

    if config.add_default_subsystem {
        for s in default_subsystems(
            base,
            &outcome.decomposition,
            config.split_default_subsystem,
            config.split_threshold,
        ) {
            outcome.decomposition.add_subsystem(s);
        }
    }

    info!(
        algorithm = algorithm.name(),
        subsystems = outcome.decomposition.len(),
        warnings = outcome.warnings.len(),
        "decomposition finished"
    );
    Ok(outcome)
}
