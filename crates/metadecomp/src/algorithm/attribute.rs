use crate::base_graph::BaseGraph;
use crate::subsystem::SubsystemGraph;
use indexmap::{IndexMap, IndexSet};
use metadecomp_graph::NodeId;
use rustc_hash::FxHashSet;

/// One subsystem per distinct token of the reaction attribute `key`.
///
/// A value may name several subsystems separated by `separator`; blank tokens and reactions
/// without the attribute are skipped. Subsystems come out in first-seen order.
pub fn subsystems_from_attribute(
    base: &BaseGraph,
    key: &str,
    separator: &str,
    exclude: &FxHashSet<NodeId>,
) -> Vec<SubsystemGraph> {
    let mut groups: IndexMap<String, IndexSet<NodeId>> = IndexMap::new();

    for &r in base.reactions() {
        if exclude.contains(&r) {
            continue;
        }
        let Some(value) = base.attributes().get(r, key) else {
            continue;
        };
        let tokens: Vec<&str> = if separator.is_empty() {
            vec![value]
        } else {
            value.split(separator).collect()
        };
        for token in tokens {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            groups.entry(token.to_string()).or_default().insert(r);
        }
    }

    groups
        .into_iter()
        .map(|(name, reactions)| SubsystemGraph::from_reactions(base, name, reactions))
        .collect()
}
