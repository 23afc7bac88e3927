use super::{DecompositionAlgorithm, RunContext};
use crate::attributes::{KEGG_CANDIDATES, KEGG_ID, SUBSYSTEM};
use crate::error::{Result, Warning};
use crate::pathway_db::{PathwayDatabase, lookup_pathways, normalize_reaction_id};
use crate::subsystem::SubsystemGraph;
use indexmap::IndexMap;
use metadecomp_graph::NodeId;
use rustc_hash::FxHashSet;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Subsystems from KEGG pathway membership.
///
/// Each reaction with a KEGG identifier gets its candidate pathways from the database; the
/// candidates are then resolved greedily by [`peel_frequent_pathways`].
pub struct KeggPathways<D> {
    db: D,
}

impl<D: PathwayDatabase> KeggPathways<D> {
    pub fn new(db: D) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &D {
        &self.db
    }
}

impl<D: PathwayDatabase> DecompositionAlgorithm for KeggPathways<D> {
    fn name(&self) -> &str {
        "kegg"
    }

    fn run_specific(
        &self,
        ctx: &mut RunContext<'_>,
        already_classified: &FxHashSet<NodeId>,
    ) -> Result<Vec<SubsystemGraph>> {
        let mut by_id: IndexMap<String, Vec<NodeId>> = IndexMap::new();
        let reactions: Vec<NodeId> = ctx.base.reactions().to_vec();
        for r in reactions {
            if already_classified.contains(&r) {
                continue;
            }
            let Some(id) = ctx
                .base
                .node(r)
                .and_then(|n| n.kegg_id.as_deref())
                .and_then(normalize_reaction_id)
            else {
                continue;
            };
            ctx.base.attributes_mut().set(r, KEGG_ID, id.clone());
            by_id.entry(id).or_default().push(r);
        }

        let ids: Vec<String> = by_id.keys().cloned().collect();
        debug!(reactions = ids.len(), "querying pathway database");
        let lookup = lookup_pathways(&self.db, &ids);

        for (id, err) in &lookup.failures {
            for &r in by_id.get(id).map(|v| v.as_slice()).unwrap_or(&[]) {
                let reaction = ctx.base.label(r).to_string();
                ctx.warn(Warning::PathwayLookupFailed {
                    reaction,
                    message: format!("{id}: {err}"),
                });
            }
        }

        let mut candidates: IndexMap<NodeId, BTreeSet<String>> = IndexMap::new();
        for (id, nodes) in &by_id {
            let Some(pathways) = lookup.pathways.get(id) else {
                continue;
            };
            if pathways.is_empty() {
                continue;
            }
            for &r in nodes {
                ctx.base
                    .attributes_mut()
                    .set(r, KEGG_CANDIDATES, pathways.join("; "));
                candidates.insert(r, pathways.iter().cloned().collect());
            }
        }

        let resolved = peel_frequent_pathways(candidates, ctx.config.min_pathway_count);
        let mut out: Vec<SubsystemGraph> = Vec::with_capacity(resolved.len());
        for (pathway, reactions) in resolved {
            for &r in &reactions {
                ctx.base.attributes_mut().set(r, SUBSYSTEM, pathway.clone());
            }
            out.push(SubsystemGraph::from_reactions(ctx.base, pathway, reactions));
        }
        Ok(out)
    }
}

/// Greedy frequent-label peeling.
///
/// Repeats until nothing is unresolved: tally how many unresolved reactions list each pathway,
/// drop pathways listed fewer than `min_count` times, drop reactions left without candidates,
/// then commit every reaction listing the most frequent pathway to it. Ties go to the
/// lexicographically smallest pathway name, so the result is deterministic.
pub fn peel_frequent_pathways(
    mut unresolved: IndexMap<NodeId, BTreeSet<String>>,
    min_count: usize,
) -> Vec<(String, Vec<NodeId>)> {
    let mut out: Vec<(String, Vec<NodeId>)> = Vec::new();

    loop {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for set in unresolved.values() {
            for p in set {
                *counts.entry(p.clone()).or_default() += 1;
            }
        }
        counts.retain(|_, c| *c >= min_count);

        for set in unresolved.values_mut() {
            set.retain(|p| counts.contains_key(p));
        }
        unresolved.retain(|_, set| !set.is_empty());

        let Some(best) = counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(p, _)| p.clone())
        else {
            break;
        };
        if unresolved.is_empty() {
            break;
        }

        let committed: Vec<NodeId> = unresolved
            .iter()
            .filter(|(_, set)| set.contains(&best))
            .map(|(&r, _)| r)
            .collect();
        unresolved.retain(|_, set| !set.contains(&best));
        debug!(pathway = %best, reactions = committed.len(), "pathway committed");
        out.push((best, committed));
    }

    out
}
