use super::{DecompositionAlgorithm, RunContext, subsystems_from_attribute};
use crate::attributes::SUBSYSTEM;
use crate::error::Result;
use crate::subsystem::SubsystemGraph;
use metadecomp_graph::{NodeId, alg};
use rustc_hash::FxHashSet;
use tracing::debug;

/// Graph-partition heuristic after Schuster et al.: species with a degree above the threshold
/// are treated as currency metabolites and cut out; every remaining connected component that
/// contains a reaction becomes one subsystem.
#[derive(Debug, Clone, Copy)]
pub struct SchusterHeuristic {
    pub degree_threshold: usize,
}

impl SchusterHeuristic {
    pub fn new(degree_threshold: usize) -> Self {
        Self { degree_threshold }
    }
}

impl DecompositionAlgorithm for SchusterHeuristic {
    fn name(&self) -> &str {
        "schuster"
    }

    fn run_specific(
        &self,
        ctx: &mut RunContext<'_>,
        already_classified: &FxHashSet<NodeId>,
    ) -> Result<Vec<SubsystemGraph>> {
        let base = &*ctx.base;
        let g = base.working();
        let components = alg::components_where(g, |v| {
            if already_classified.contains(&v) {
                return false;
            }
            !(base.is_species(v) && g.degree(v) > self.degree_threshold)
        });

        let mut assignments: Vec<(NodeId, String)> = Vec::new();
        let mut counter = 0usize;
        for comp in &components {
            let reactions: Vec<NodeId> = comp
                .iter()
                .copied()
                .filter(|&v| base.is_reaction(v))
                .collect();
            if reactions.is_empty() {
                continue;
            }
            counter += 1;
            let name = format!("Subsystem {counter}");
            assignments.extend(reactions.into_iter().map(|r| (r, name.clone())));
        }
        debug!(
            components = components.len(),
            subsystems = counter,
            threshold = self.degree_threshold,
            "currency metabolites removed"
        );

        for (r, name) in assignments {
            ctx.base.attributes_mut().set(r, SUBSYSTEM, name);
        }

        // One synthetic name per reaction, so the value is never split.
        Ok(subsystems_from_attribute(
            ctx.base,
            SUBSYSTEM,
            "",
            already_classified,
        ))
    }
}
