#![forbid(unsafe_code)]

//! HTML pages for canopy datasets: a hierarchical network view, a force-directed node graph, and
//! a D3 treemap. Pages are self-contained documents; graph layout happens client-side.

pub mod chrome;
pub mod escape;
pub mod hierarchy;
pub mod network;
pub mod nodegraph;
pub mod treemap;

pub use hierarchy::{hierarchy_options, render_hierarchy_page};
pub use network::{PageChrome, VisNetwork};
pub use nodegraph::{nodegraph_options, render_nodegraph_page};
pub use treemap::render_treemap_page;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("page data JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
