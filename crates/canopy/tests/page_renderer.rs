#![cfg(feature = "render")]

use canopy::render::{HeadlessError, Page, PageRenderer};
use canopy::{CanopyConfig, HierarchyKind, Tree};
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

fn renderer() -> PageRenderer {
    let mut config = CanopyConfig::default();
    config.data.dir = workspace_root().join("fixtures");
    PageRenderer::new(config)
}

#[test]
fn renders_every_page_from_fixtures() {
    let pages = renderer();
    for page in [
        Page::Hierarchy(HierarchyKind::Family),
        Page::Hierarchy(HierarchyKind::Infrastructure),
        Page::NodeGraph,
        Page::Treemap(HierarchyKind::Family),
    ] {
        let html = pages.render(page).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"), "{page:?}");
        assert!(html.trim_end().ends_with("</html>"), "{page:?}");
    }
}

#[test]
fn configured_overrides_are_merged_into_pages() {
    let mut pages = renderer();
    pages
        .config
        .pages
        .nodegraph_options
        .set("physics.barnesHut.springLength", 95);
    let html = pages.render(Page::NodeGraph).unwrap();
    assert!(html.contains(r#""springLength":95"#));
    assert!(html.contains(r#""damping":0.09"#));
}

#[test]
fn tree_uses_configured_root_name() {
    let mut pages = renderer();
    pages.config.hierarchy.root_name = "Estate".to_string();
    let tree = pages.tree(HierarchyKind::Infrastructure).unwrap();
    assert!(matches!(tree, Tree::SyntheticRoot { ref name, .. } if name == "Estate"));
}

#[test]
fn missing_dataset_surfaces_as_data_error() {
    let mut pages = renderer();
    pages.config.data.family = PathBuf::from("absent.json");
    let err = pages.render(Page::Hierarchy(HierarchyKind::Family)).unwrap_err();
    assert!(matches!(err, HeadlessError::Data(ref e) if e.is_not_found()));
}
