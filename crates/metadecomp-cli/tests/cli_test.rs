use assert_cmd::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> String {
    let path = repo_root().join("fixtures").join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path.to_string_lossy().into_owned()
}

fn run_json(args: &[&str]) -> Value {
    let exe = assert_cmd::cargo_bin!("metadecomp-cli");
    let out = Command::new(exe).args(args).assert().success();
    serde_json::from_slice(&out.get_output().stdout).expect("stdout is JSON")
}

fn names(list: &Value, key: &str) -> Vec<String> {
    list.as_array()
        .expect("array")
        .iter()
        .map(|v| v[key].as_str().expect("string").to_string())
        .collect()
}

#[test]
fn stats_reports_degree_distribution() {
    let out = run_json(&["stats", &fixture("glycolysis_tca.json")]);
    assert_eq!(out["species"], 10);
    assert_eq!(out["reactions"], 7);
    assert_eq!(out["edges"], 21);
    assert_eq!(out["max_degree"], 3);
    assert_eq!(out["degree_histogram"], serde_json::json!([0, 1, 7, 2]));
}

#[test]
fn decompose_by_annotation() {
    let out = run_json(&["decompose", "--pretty", &fixture("glycolysis_tca.json")]);
    assert_eq!(out["algorithm"], "predefined");
    assert_eq!(
        names(&out["subsystems"], "name"),
        vec!["Glycolysis", "TCA cycle"]
    );
    let glycolysis = &out["subsystems"][0];
    assert_eq!(
        glycolysis["reactions"],
        serde_json::json!(["HEX1", "PGI", "PFK"])
    );
    assert!(out["warnings"].as_array().unwrap().is_empty());
    assert!(out["cloning"].as_array().unwrap().is_empty());
}

#[test]
fn decompose_reads_settings_from_config_file() {
    let out = run_json(&[
        "decompose",
        "--config",
        &fixture("decompose_config.json"),
        &fixture("glycolysis_tca.json"),
    ]);
    let cloning = &out["cloning"][0];
    assert_eq!(cloning["cloned_species"], 2);
    assert_eq!(cloning["created_nodes"], 6);
    assert_eq!(out["subsystems"].as_array().unwrap().len(), 2);
}

#[test]
fn unparsable_thresholds_fall_back_to_the_default_degree() {
    let fallback = run_json(&[
        "decompose",
        "--algorithm",
        "schuster",
        "--degree",
        "many",
        &fixture("glycolysis_tca.json"),
    ]);
    let explicit = run_json(&[
        "decompose",
        "--algorithm",
        "schuster",
        "--degree",
        "8",
        &fixture("glycolysis_tca.json"),
    ]);
    assert_eq!(fallback["subsystems"], explicit["subsystems"]);

    // Nothing in the fixture reaches degree 8.
    let out = run_json(&[
        "decompose",
        "--clone-above",
        "lots",
        &fixture("glycolysis_tca.json"),
    ]);
    assert_eq!(out["cloning"][0]["cloned_species"], 0);
    assert_eq!(out["subsystems"].as_array().unwrap().len(), 2);
}

#[test]
fn decompose_with_offline_kegg_records() {
    let out = run_json(&[
        "decompose",
        "--algorithm",
        "kegg",
        "--kegg-file",
        &fixture("kegg_reactions.txt"),
        &fixture("glycolysis_tca.json"),
    ]);
    assert_eq!(out["algorithm"], "kegg");
    assert_eq!(
        names(&out["subsystems"], "name"),
        vec!["Citrate cycle (TCA cycle)", "Glycolysis / Gluconeogenesis"]
    );
    assert_eq!(
        out["subsystems"][0]["reactions"],
        serde_json::json!(["PDH", "CS", "ICD", "AKGD"])
    );
    assert!(out["warnings"].as_array().unwrap().is_empty());
}

#[test]
fn overview_lists_interfaces_between_subsystems() {
    let out = run_json(&["overview", &fixture("glycolysis_tca.json")]);
    assert_eq!(out["nodes"].as_array().unwrap().len(), 2);
    let edges = out["edges"].as_array().unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0]["interface_count"], 3);

    let interfaces = out["interfaces"].as_array().unwrap();
    assert_eq!(interfaces.len(), 2);
    let forward = interfaces
        .iter()
        .find(|i| i["from"] == "Glycolysis")
        .expect("glycolysis to tca");
    let mut species: Vec<&str> = forward["species"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    species.sort_unstable();
    assert_eq!(species, vec!["adp", "pyr"]);
}

#[test]
fn overview_can_show_interface_nodes() {
    let out = run_json(&[
        "overview",
        "--show-interfaces",
        "--thickness",
        "1,4",
        &fixture("glycolysis_tca.json"),
    ]);
    let nodes = out["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 5);
    let interfaces = nodes.iter().filter(|n| n["kind"] == "interface").count();
    assert_eq!(interfaces, 3);
}

#[test]
fn view_consolidates_selected_subsystems() {
    let out = run_json(&[
        "view",
        "--select",
        "Glycolysis",
        "--select",
        "TCA cycle",
        "--layout",
        "parallel-lines",
        "--sbgn",
        &fixture("glycolysis_tca.json"),
    ]);
    assert_eq!(out["subsystems"], serde_json::json!(["Glycolysis", "TCA cycle"]));
    let nodes = out["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 17);
    assert_eq!(out["edges"].as_array().unwrap().len(), 21);

    let mut shared: Vec<&str> = nodes
        .iter()
        .filter(|n| n["shared"] == true)
        .filter_map(|n| n["label"].as_str())
        .collect();
    shared.sort_unstable();
    assert_eq!(shared, vec!["adp", "atp", "pyr"]);
    assert!(nodes.iter().all(|n| n["glyph"].is_string()));

    // Display names never replace identifiers.
    assert!(nodes.iter().any(|n| n["label"] == "glc"));
    assert!(nodes.iter().any(|n| n["label"] == "HEX1"));
    assert!(!nodes.iter().any(|n| n["label"] == "D-Glucose"));
}

#[test]
fn view_with_hubs_adds_one_node_per_subsystem() {
    let out = run_json(&[
        "view",
        "--select",
        "Glycolysis",
        "--select",
        "TCA cycle",
        "--hubs",
        &fixture("glycolysis_tca.json"),
    ]);
    assert_eq!(out["nodes"].as_array().unwrap().len(), 19);
    assert_eq!(out["edges"].as_array().unwrap().len(), 28);
}

#[test]
fn view_without_selection_is_a_usage_error() {
    let exe = assert_cmd::cargo_bin!("metadecomp-cli");
    Command::new(exe)
        .args(["view", &fixture("glycolysis_tca.json")])
        .assert()
        .code(2);
}

#[test]
fn unknown_subsystem_fails() {
    let exe = assert_cmd::cargo_bin!("metadecomp-cli");
    Command::new(exe)
        .args([
            "view",
            "--select",
            "Urea cycle",
            &fixture("glycolysis_tca.json"),
        ])
        .assert()
        .code(1);
}

#[test]
fn invalid_network_file_fails() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("broken.json");
    std::fs::write(
        &path,
        r#"{"reactions": [{"id": "R1", "reactants": [{"species": "missing"}]}]}"#,
    )
    .expect("write network");

    let exe = assert_cmd::cargo_bin!("metadecomp-cli");
    Command::new(exe)
        .args(["decompose", path.to_string_lossy().as_ref()])
        .assert()
        .code(1);
}
