use crate::base_graph::BaseGraph;
use crate::decomposition::Decomposition;
use crate::subsystem::SubsystemGraph;
use metadecomp_graph::{NodeId, alg};
use tracing::debug;

pub const DEFAULT_SUBSYSTEM: &str = "Default";

/// Catch-all subsystem(s) for every reaction no subsystem of `decomposition` claims.
///
/// Without `split` this is a single "Default" subsystem. With `split`, each connected component
/// of it holding at least `split_threshold` nodes becomes "Default 1", "Default 2", ... and the
/// smaller components are merged into a leading "Default 0".
pub fn default_subsystems(
    base: &BaseGraph,
    decomposition: &Decomposition,
    split: bool,
    split_threshold: usize,
) -> Vec<SubsystemGraph> {
    let unclassified: Vec<NodeId> = base
        .reactions()
        .iter()
        .copied()
        .filter(|&r| !decomposition.has_reaction_been_classified(r))
        .collect();
    if unclassified.is_empty() {
        return Vec::new();
    }

    let whole = SubsystemGraph::from_reactions(base, DEFAULT_SUBSYSTEM, unclassified);
    if !split {
        return vec![whole];
    }

    let components = alg::components_where(base.working(), |v| whole.contains_node(v));
    let mut residual = SubsystemGraph::new(format!("{DEFAULT_SUBSYSTEM} 0"));
    let mut standalone: Vec<SubsystemGraph> = Vec::new();
    for comp in components {
        let reactions = comp.iter().copied().filter(|&v| base.is_reaction(v));
        if comp.len() >= split_threshold {
            let name = format!("{DEFAULT_SUBSYSTEM} {}", standalone.len() + 1);
            standalone.push(SubsystemGraph::from_reactions(base, name, reactions));
        } else {
            residual.absorb(&SubsystemGraph::from_reactions(base, "", reactions));
        }
    }
    debug!(
        standalone = standalone.len(),
        residual = residual.node_count(),
        "default subsystem split"
    );

    let mut out = Vec::with_capacity(standalone.len() + 1);
    if !residual.is_empty() {
        out.push(residual);
    }
    out.extend(standalone);
    out
}
