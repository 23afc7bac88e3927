use crate::base_graph::BaseGraph;
use crate::config::TransporterMode;
use metadecomp_graph::NodeId;
use rustc_hash::FxHashSet;

pub const TRANSPORTER_SUBSYSTEM: &str = "Transporter";

/// Reactions moving species between compartments, in working-graph order.
pub fn transporter_reactions(base: &BaseGraph, mode: TransporterMode) -> Vec<NodeId> {
    base.reactions()
        .iter()
        .copied()
        .filter(|&r| match mode {
            TransporterMode::Spanning => spans_compartments(base, r),
            TransporterMode::SingleInOut => single_in_out_transport(base, r),
        })
        .collect()
}

fn spans_compartments(base: &BaseGraph, r: NodeId) -> bool {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for s in base.species_neighbors(r) {
        if let Some(c) = base.compartment(s) {
            seen.insert(c);
            if seen.len() >= 2 {
                return true;
            }
        }
    }
    false
}

fn single_in_out_transport(base: &BaseGraph, r: NodeId) -> bool {
    let g = base.working();
    let (&[e_in], &[e_out]) = (g.in_edges(r), g.out_edges(r)) else {
        return false;
    };
    let (Some((source, _)), Some((_, target))) = (g.endpoints(e_in), g.endpoints(e_out)) else {
        return false;
    };
    match (base.compartment(source), base.compartment(target)) {
        (Some(a), Some(b)) => a != b,
        _ => false,
    }
}
