use super::{DecompositionAlgorithm, RunContext};
use crate::error::Result;
use crate::subsystem::SubsystemGraph;
use indexmap::IndexMap;
use metadecomp_graph::NodeId;
use rustc_hash::FxHashSet;

/// One subsystem per compartment: its species plus their adjacent, not yet classified
/// reactions. Reactions crossing compartments are left to the transporter subsystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompartmentAlgorithm;

impl DecompositionAlgorithm for CompartmentAlgorithm {
    fn name(&self) -> &str {
        "compartment"
    }

    fn requires_transporter_subsystem(&self) -> bool {
        true
    }

    fn run_specific(
        &self,
        ctx: &mut RunContext<'_>,
        already_classified: &FxHashSet<NodeId>,
    ) -> Result<Vec<SubsystemGraph>> {
        let base = &*ctx.base;
        let g = base.working();
        let mut groups: IndexMap<String, SubsystemGraph> = IndexMap::new();

        for &s in base.species() {
            let Some(compartment) = base.compartment(s) else {
                continue;
            };
            let sub = groups
                .entry(compartment.to_string())
                .or_insert_with(|| SubsystemGraph::new(compartment));
            sub.add_species(s);
            for e in g.node_edges(s) {
                let Some(other) = g.opposite(e, s) else {
                    continue;
                };
                if base.is_reaction(other) && !already_classified.contains(&other) {
                    sub.add_reaction(other);
                    sub.add_edge(e);
                }
            }
        }

        Ok(groups.into_values().collect())
    }
}
