use indexmap::IndexMap;
use metadecomp::algorithm::{self, KeggPathways, peel_frequent_pathways};
use metadecomp::attributes::{KEGG_CANDIDATES, KEGG_ID, SUBSYSTEM};
use metadecomp::pathway_db::{
    BATCH_SIZE, FlatFileDatabase, PathwayDatabase, lookup_pathways, normalize_reaction_id,
    parse_entries,
};
use metadecomp::{BaseGraph, DecompositionConfig, LookupError, NetworkBuilder, NodeData, NodeId, Warning};
use std::cell::RefCell;
use std::collections::BTreeSet;

fn record(id: &str, pathways: &[&str]) -> String {
    let mut out = format!("ENTRY       {id}                      Reaction\nNAME        test\n");
    for (i, p) in pathways.iter().enumerate() {
        let head = if i == 0 { "PATHWAY     " } else { "            " };
        out.push_str(&format!("{head}rn{:05}  {p}\n", i + 10));
    }
    out.push_str("ORTHOLOGY   K00001  alcohol dehydrogenase\n///\n");
    out
}

fn flat_file() -> String {
    [
        record("R00001", &["Glycolysis", "Metabolic pathways"]),
        record("R00002", &["Glycolysis", "Pyruvate metabolism"]),
        record("R00003", &["Pyruvate metabolism", "TCA cycle"]),
        record("R00004", &["TCA cycle", "Pyruvate metabolism"]),
    ]
    .concat()
}

struct MockDb {
    inner: FlatFileDatabase,
    fail_batches: bool,
    calls: RefCell<Vec<usize>>,
}

impl MockDb {
    fn new(fail_batches: bool) -> Self {
        Self {
            inner: FlatFileDatabase::from_text(&flat_file()),
            fail_batches,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl PathwayDatabase for MockDb {
    fn fetch(&self, ids: &[String]) -> Result<String, LookupError> {
        self.calls.borrow_mut().push(ids.len());
        if self.fail_batches && ids.len() > 1 {
            return Err(LookupError::Timeout);
        }
        if ids.iter().any(|id| id == "R99999") {
            return Err(LookupError::Request {
                message: "unavailable".to_string(),
            });
        }
        self.inner.fetch(ids)
    }
}

#[test]
fn parse_entries_reads_multi_line_pathway_sections() {
    let entries = parse_entries(&flat_file());
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[1].id, "R00002");
    assert_eq!(
        entries[1].pathways,
        vec!["Glycolysis".to_string(), "Pyruvate metabolism".to_string()]
    );
}

#[test]
fn normalize_reaction_id_strips_prefix() {
    assert_eq!(normalize_reaction_id(" rn:r00200 "), Some("R00200".to_string()));
    assert_eq!(normalize_reaction_id("RN:R00200"), Some("R00200".to_string()));
    assert_eq!(normalize_reaction_id("rn:"), None);
    assert_eq!(normalize_reaction_id("   "), None);
}

#[test]
fn lookup_filters_global_pathways() {
    let db = MockDb::new(false);
    let out = lookup_pathways(&db, &["R00001".to_string()]);
    assert_eq!(out.pathways["R00001"], vec!["Glycolysis".to_string()]);
    assert!(out.failures.is_empty());
}

#[test]
fn lookup_retries_failed_batches_one_by_one() {
    let db = MockDb::new(true);
    let mut ids: Vec<String> = (1..=4).map(|i| format!("R0000{i}")).collect();
    ids.extend((0..8).map(|i| format!("X{i}")));
    assert!(ids.len() > BATCH_SIZE);

    let out = lookup_pathways(&db, &ids);
    assert_eq!(out.pathways.len(), 4);
    assert_eq!(out.failures.len(), 8);
    assert!(
        out.failures
            .iter()
            .all(|(_, e)| *e == LookupError::EmptyResponse)
    );
    // Two failed batches, then every id on its own.
    let calls = db.calls.borrow();
    assert_eq!(calls.len(), 2 + ids.len());
    let batches: Vec<usize> = calls.iter().copied().filter(|&n| n > 1).collect();
    assert_eq!(batches, vec![BATCH_SIZE, ids.len() - BATCH_SIZE]);
}

#[test]
fn lookup_retries_only_missing_ids_of_a_partial_batch() {
    let db = MockDb::new(false);
    let ids = vec!["R00002".to_string(), "R12345".to_string()];
    let out = lookup_pathways(&db, &ids);
    assert!(out.pathways.contains_key("R00002"));
    assert_eq!(
        out.failures,
        vec![("R12345".to_string(), LookupError::EmptyResponse)]
    );
    assert_eq!(*db.calls.borrow(), vec![2, 1]);
}

fn candidates(entries: &[(usize, &[&str])]) -> IndexMap<NodeId, BTreeSet<String>> {
    entries
        .iter()
        .map(|(i, ps)| (NodeId::new(*i), ps.iter().map(|p| p.to_string()).collect()))
        .collect()
}

#[test]
fn peeling_commits_the_most_frequent_pathway_first() {
    let input = candidates(&[
        (0, &["Glycolysis"]),
        (1, &["Glycolysis", "Pyruvate metabolism"]),
        (2, &["Pyruvate metabolism", "TCA cycle"]),
        (3, &["TCA cycle", "Pyruvate metabolism"]),
    ]);
    let out = peel_frequent_pathways(input, 2);
    assert_eq!(
        out,
        vec![(
            "Pyruvate metabolism".to_string(),
            vec![NodeId::new(1), NodeId::new(2), NodeId::new(3)]
        )]
    );
}

#[test]
fn peeling_breaks_ties_by_name() {
    let input = candidates(&[(0, &["B", "A"]), (1, &["A", "B"])]);
    assert_eq!(
        peel_frequent_pathways(input, 1),
        vec![("A".to_string(), vec![NodeId::new(0), NodeId::new(1)])]
    );

    let input = candidates(&[(0, &["Y"]), (1, &["X"])]);
    assert_eq!(
        peel_frequent_pathways(input, 1),
        vec![
            ("X".to_string(), vec![NodeId::new(1)]),
            ("Y".to_string(), vec![NodeId::new(0)]),
        ]
    );
}

#[test]
fn peeling_with_nothing_frequent_enough_commits_nothing() {
    let input = candidates(&[(0, &["A"]), (1, &["B"])]);
    assert!(peel_frequent_pathways(input, 2).is_empty());
    assert!(peel_frequent_pathways(IndexMap::new(), 1).is_empty());
}

#[test]
fn kegg_decomposition_skips_failed_lookups_with_a_warning() {
    let mut b = NetworkBuilder::new();
    let kegg = ["rn:R00001", "R00002", "r00003", "R00004", "R99999"];
    let mut reactions: Vec<NodeId> = Vec::new();
    for (i, k) in kegg.iter().enumerate() {
        let s = b.species(&format!("S{i}"), None);
        let r = b.add(NodeData::reaction(format!("R{}", i + 1)).with_kegg_id(*k));
        b.consumes(r, s);
        reactions.push(r);
    }
    let untagged = b.reaction("R6");
    let mut base = BaseGraph::new(b.build());

    let config = DecompositionConfig::default();
    let algo = KeggPathways::new(MockDb::new(false));
    let out = algorithm::run(&mut base, &algo, &config).unwrap();
    let d = &out.decomposition;

    assert_eq!(d.len(), 1);
    let s = &d.subsystems()[0];
    assert_eq!(s.name(), "Pyruvate metabolism");
    assert_eq!(
        s.reactions().iter().copied().collect::<Vec<_>>(),
        reactions[1..4].to_vec()
    );
    assert!(!d.has_reaction_been_classified(reactions[0]));
    assert!(!d.has_reaction_been_classified(untagged));

    assert_eq!(
        out.warnings,
        vec![Warning::PathwayLookupFailed {
            reaction: "R5".to_string(),
            message: "R99999: request failed: unavailable".to_string(),
        }]
    );

    let attrs = base.attributes();
    assert_eq!(attrs.get(reactions[0], KEGG_ID), Some("R00001"));
    assert_eq!(attrs.get(reactions[2], KEGG_ID), Some("R00003"));
    assert_eq!(attrs.get(reactions[0], KEGG_CANDIDATES), Some("Glycolysis"));
    assert_eq!(
        attrs.get(reactions[1], KEGG_CANDIDATES),
        Some("Glycolysis; Pyruvate metabolism")
    );
    assert_eq!(attrs.get(reactions[1], SUBSYSTEM), Some("Pyruvate metabolism"));
    assert_eq!(attrs.get(reactions[0], SUBSYSTEM), None);
    assert_eq!(attrs.get(untagged, KEGG_ID), None);
}
