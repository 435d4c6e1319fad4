use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
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

fn fixture(name: &str) -> PathBuf {
    let path = repo_root().join("fixtures").join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn canopy() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("canopy"));
    cmd.env("RUST_LOG", "error");
    cmd
}

#[test]
fn tree_prints_the_hierarchy_json() {
    let output = canopy()
        .args([
            "tree",
            fixture("infrastructure_data.json").to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run canopy");
    assert!(output.status.success());

    let tree: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(tree["id"], "root");
    assert_eq!(tree["children"].as_array().map(Vec::len), Some(2));
}

#[test]
fn tree_root_name_flag_renames_the_synthetic_root() {
    let output = canopy()
        .args([
            "tree",
            "--root-name",
            "Estate",
            fixture("infrastructure_data.json").to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run canopy");
    let tree: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(tree["name"], "Estate");
}

#[test]
fn tree_reads_the_csv_pair() {
    // Only the CSV pair exists on disk; the JSON path just addresses it.
    let json_path = fixture("org_chart_data_nodes.csv").with_file_name("org_chart_data.json");
    let output = canopy()
        .args(["tree", json_path.to_string_lossy().as_ref()])
        .output()
        .expect("run canopy");
    assert!(output.status.success());
    let tree: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(tree["id"], "ceo");
}

#[test]
fn strict_duplicate_parents_exit_with_status_3() {
    canopy()
        .args([
            "tree",
            "--reject-duplicate-parents",
            fixture("family_tree_data.json").to_string_lossy().as_ref(),
        ])
        .assert()
        .code(3);
}

#[test]
fn cyclic_input_exits_with_status_3() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("cycle.json");
    fs::write(
        &input,
        r##"{"nodes":[{"id":"a","label":"A","color":"#000","level":0},{"id":"b","label":"B","color":"#000","level":1}],
            "edges":[{"from":"a","to":"b","label":""},{"from":"b","to":"a","label":""}]}"##,
    )
    .expect("write input");

    let output = canopy()
        .args(["tree", input.to_string_lossy().as_ref()])
        .output()
        .expect("run canopy");
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cycle detected: a -> b -> a"));
}

#[test]
fn missing_input_exits_with_status_1() {
    canopy()
        .args(["tree", "does-not-exist.json"])
        .current_dir(repo_root())
        .assert()
        .code(1);
}

#[test]
fn unknown_flag_is_a_usage_error() {
    canopy().args(["tree", "--bogus"]).assert().code(2);
}

#[test]
fn bad_config_is_a_usage_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("canopy.json");
    fs::write(&config, "{ not json").expect("write config");

    canopy()
        .args([
            "--config",
            config.to_string_lossy().as_ref(),
            "tree",
            fixture("family_tree_data.json").to_string_lossy().as_ref(),
        ])
        .assert()
        .code(2);
}

#[test]
fn render_writes_a_hierarchy_page() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("family.html");

    canopy()
        .args([
            "render",
            "hierarchy",
            "--out",
            out.to_string_lossy().as_ref(),
            fixture("family_tree_data.json").to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let html = fs::read_to_string(&out).expect("read page");
    assert!(html.contains("<title>Family Hierarchy</title>"));
    assert!(html.contains("vis-network"));
}

#[test]
fn render_treemap_needs_no_input() {
    let output = canopy()
        .args(["render", "treemap", "--kind", "infrastructure"])
        .output()
        .expect("run canopy");
    assert!(output.status.success());
    let html = String::from_utf8_lossy(&output.stdout);
    assert!(html.contains("/api/treemap-data?type=infrastructure"));
}

#[test]
fn render_nodegraph_uses_status_colors() {
    let output = canopy()
        .args([
            "render",
            "nodegraph",
            fixture("nodegraph_data.json").to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run canopy");
    assert!(output.status.success());
    let html = String::from_utf8_lossy(&output.stdout);
    assert!(html.contains("#ef4444"));
    assert!(html.contains("Service Dependencies with Metrics"));
}
