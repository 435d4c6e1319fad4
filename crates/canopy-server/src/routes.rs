use crate::ServerState;
use crate::error::Result;
use axum::Json;
use axum::extract::{Query, State};
use axum::response::Html;
use canopy::render::Page;
use canopy::{HierarchyKind, Tree};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct KindQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl KindQuery {
    fn kind_or(&self, default: HierarchyKind) -> HierarchyKind {
        match self.kind.as_deref() {
            Some(name) => HierarchyKind::parse_lenient(Some(name)),
            None => default,
        }
    }
}

/// `GET /` hierarchical network page.
pub async fn index(
    State(state): State<ServerState>,
    Query(query): Query<KindQuery>,
) -> Result<Html<String>> {
    let kind = query.kind_or(HierarchyKind::Family);
    Ok(Html(state.pages.render(Page::Hierarchy(kind))?))
}

/// `GET /nodegraph` force-directed service graph.
pub async fn nodegraph(State(state): State<ServerState>) -> Result<Html<String>> {
    Ok(Html(state.pages.render(Page::NodeGraph)?))
}

/// `GET /treemap` static D3 page; the tree comes from [`treemap_data`].
pub async fn treemap(
    State(state): State<ServerState>,
    Query(query): Query<KindQuery>,
) -> Result<Html<String>> {
    let kind = query.kind_or(HierarchyKind::Infrastructure);
    Ok(Html(state.pages.render(Page::Treemap(kind))?))
}

/// `GET /api/treemap-data` nested hierarchy JSON.
pub async fn treemap_data(
    State(state): State<ServerState>,
    Query(query): Query<KindQuery>,
) -> Result<Json<Tree>> {
    let kind = query.kind_or(HierarchyKind::Family);
    Ok(Json(state.pages.tree(kind)?))
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}
