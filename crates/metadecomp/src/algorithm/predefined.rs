use super::{DecompositionAlgorithm, RunContext, subsystems_from_attribute};
use crate::attributes::SUBSYSTEM;
use crate::error::Result;
use crate::subsystem::SubsystemGraph;
use metadecomp_graph::NodeId;
use rustc_hash::FxHashSet;

/// Subsystems taken verbatim from a reaction annotation (e.g. the `SUBSYSTEM` note of a
/// genome-scale model).
#[derive(Debug, Clone)]
pub struct PredefinedAnnotation {
    /// Notes tag holding the subsystem name(s).
    pub notes_key: String,
}

impl PredefinedAnnotation {
    pub fn new(notes_key: impl Into<String>) -> Self {
        Self {
            notes_key: notes_key.into(),
        }
    }
}

impl DecompositionAlgorithm for PredefinedAnnotation {
    fn name(&self) -> &str {
        "predefined"
    }

    fn run_specific(
        &self,
        ctx: &mut RunContext<'_>,
        already_classified: &FxHashSet<NodeId>,
    ) -> Result<Vec<SubsystemGraph>> {
        let reactions: Vec<NodeId> = ctx.base.reactions().to_vec();
        for r in reactions {
            let Some(value) = ctx
                .base
                .node(r)
                .and_then(|n| n.note(&self.notes_key))
                .map(str::to_string)
            else {
                continue;
            };
            ctx.base.attributes_mut().set(r, SUBSYSTEM, value);
        }

        Ok(subsystems_from_attribute(
            ctx.base,
            SUBSYSTEM,
            &ctx.config.separator,
            already_classified,
        ))
    }
}
