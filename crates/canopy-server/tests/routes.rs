use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use canopy::CanopyConfig;
use canopy_server::{ServerState, router};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tower::ServiceExt;

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn fixture_config() -> CanopyConfig {
    let mut config = CanopyConfig::default();
    config.data.dir = workspace_root().join("fixtures");
    config
}

async fn get(config: CanopyConfig, uri: &str) -> (StatusCode, String) {
    let app = router(ServerState::new(config));
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn index_defaults_to_the_family_tree() {
    let (status, body) = get(fixture_config(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Family Hierarchy</title>"));
    assert!(body.contains("George Miller"));
    assert!(body.contains(r#""arrows":"to, from""#));
}

#[tokio::test]
async fn index_switches_dataset_by_type() {
    let (status, body) = get(fixture_config(), "/?type=infrastructure").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Infrastructure Topology</title>"));
    assert!(body.contains("Service Group"));

    let (_, fallback) = get(fixture_config(), "/?type=bogus").await;
    assert!(fallback.contains("<title>Family Hierarchy</title>"));
}

#[tokio::test]
async fn treemap_data_serves_the_nested_tree() {
    let (status, body) = get(fixture_config(), "/api/treemap-data?type=infrastructure").await;
    assert_eq!(status, StatusCode::OK);

    let tree: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(tree["id"], "root");
    assert_eq!(tree["name"], "Root");
    assert_eq!(tree["children"][0]["id"], "sg-data");
    assert_eq!(tree["children"][1]["children"][0]["value"], 1);

    let (_, family) = get(fixture_config(), "/api/treemap-data").await;
    let family: Value = serde_json::from_str(&family).unwrap();
    assert_eq!(family["id"], "george");
}

#[tokio::test]
async fn treemap_page_defaults_to_infrastructure() {
    let (status, body) = get(fixture_config(), "/treemap").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("/api/treemap-data?type=infrastructure"));
}

#[tokio::test]
async fn nodegraph_page_embeds_metrics() {
    let (status, body) = get(fixture_config(), "/nodegraph").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("↓ 600 RPS"));
    assert!(body.contains(r#""solver":"barnesHut""#));
}

#[tokio::test]
async fn missing_dataset_is_not_found() {
    let mut config = CanopyConfig::default();
    config.data.dir = workspace_root().join("no-such-dir");
    let (status, body) = get(config, "/api/treemap-data").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let err: Value = serde_json::from_str(&body).unwrap();
    assert!(err["error"].as_str().unwrap().contains("family_tree_data.json"));
}

#[tokio::test]
async fn malformed_graph_is_unprocessable() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("family_tree_data.json"),
        r##"{"nodes":[{"id":"a","label":"A","color":"#000","level":0}],"edges":[{"from":"a","to":"ghost","label":""}]}"##,
    )
    .unwrap();

    let mut config = CanopyConfig::default();
    config.data.dir = dir.path().to_path_buf();
    let (status, body) = get(config, "/api/treemap-data?type=family").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("ghost"));
}

#[tokio::test]
async fn strict_policy_comes_from_config() {
    let mut config = fixture_config();
    config.hierarchy = canopy::HierarchyOptions::strict();
    let (status, body) = get(config, "/api/treemap-data?type=family").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("emma"));
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = get(fixture_config(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"status":"ok"}"#);
}
