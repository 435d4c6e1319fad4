#![forbid(unsafe_code)]

//! Graph data model, loaders and hierarchy construction (headless).
//!
//! Design goals:
//! - flat node/edge documents in, one rooted tree out
//! - deterministic output for a given input order
//! - no recursion on the native stack, so deep or cyclic inputs fail cleanly

pub mod config;
pub mod dataset;
pub mod error;
pub mod hierarchy;
pub mod load;
pub mod model;

pub use config::{CanopyConfig, VisOptions};
pub use dataset::HierarchyKind;
pub use error::{Error, Result};
pub use hierarchy::{DuplicateParentPolicy, HierarchyOptions, Tree, TreeNode, build_hierarchy};
pub use load::{DataSource, load_graph_data};
pub use model::{Edge, GraphData, Node, NodeId};

impl GraphData {
    /// Builds the hierarchy for this document.
    pub fn build_hierarchy(&self, options: &HierarchyOptions) -> Result<Tree> {
        hierarchy::build_hierarchy(&self.nodes, &self.edges, options)
    }
}

/// Loads the dataset at `json_path` (or its CSV pair) and builds its hierarchy.
pub fn load_hierarchy(
    json_path: impl AsRef<std::path::Path>,
    options: &HierarchyOptions,
) -> Result<Tree> {
    load_graph_data(json_path)?.build_hierarchy(options)
}
