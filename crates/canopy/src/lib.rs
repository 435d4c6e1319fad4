#![forbid(unsafe_code)]

//! `canopy` turns flat node/edge datasets into trees and interactive graph pages.
//!
//! # Features
//!
//! - `render`: enable HTML page rendering (`canopy::render`)

pub use canopy_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use canopy_render::{
        Error as RenderError, PageChrome, VisNetwork, hierarchy_options, nodegraph_options,
        render_hierarchy_page, render_nodegraph_page, render_treemap_page,
    };

    use canopy_core::{CanopyConfig, GraphData, HierarchyKind, Tree, load_graph_data};

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Data(#[from] canopy_core::Error),
        #[error(transparent)]
        Render(#[from] canopy_render::Error),
    }

    impl HeadlessError {
        /// The underlying data/graph error, if this is one.
        pub fn as_data(&self) -> Option<&canopy_core::Error> {
            match self {
                HeadlessError::Data(e) => Some(e),
                HeadlessError::Render(_) => None,
            }
        }
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// The pages a deployment can serve.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Page {
        Hierarchy(HierarchyKind),
        NodeGraph,
        Treemap(HierarchyKind),
    }

    /// Loads datasets and renders pages according to a [`CanopyConfig`].
    ///
    /// Every call reads its dataset afresh; nothing is cached between calls.
    #[derive(Debug, Clone, Default)]
    pub struct PageRenderer {
        pub config: CanopyConfig,
    }

    impl PageRenderer {
        pub fn new(config: CanopyConfig) -> Self {
            Self { config }
        }

        pub fn hierarchy_data(&self, kind: HierarchyKind) -> Result<GraphData> {
            Ok(load_graph_data(kind.data_path(&self.config.data))?)
        }

        /// The tree served to the treemap client.
        pub fn tree(&self, kind: HierarchyKind) -> Result<Tree> {
            Ok(self
                .hierarchy_data(kind)?
                .build_hierarchy(&self.config.hierarchy)?)
        }

        pub fn render(&self, page: Page) -> Result<String> {
            match page {
                Page::Hierarchy(kind) => {
                    let data = self.hierarchy_data(kind)?;
                    Ok(render_hierarchy_page(
                        &data,
                        kind,
                        &self.config.pages.hierarchy_options,
                    )?)
                }
                Page::NodeGraph => {
                    let data = load_graph_data(self.config.data.nodegraph_path())?;
                    Ok(render_nodegraph_page(
                        &data,
                        &self.config.pages.nodegraph_options,
                    )?)
                }
                Page::Treemap(kind) => Ok(render_treemap_page(kind)),
            }
        }
    }
}
