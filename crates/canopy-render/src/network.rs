//! A vis-network page: node/edge data sets plus an option document.

use crate::Result;
use crate::chrome::{self, BASE_CSS};
use crate::escape::{EscapeHtml, script_json};
use canopy_core::VisOptions;
use serde_json::Value;
use std::fmt::Write as _;

pub const VIS_NETWORK_JS: &str =
    "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";

#[derive(Debug, Clone, Default)]
pub struct VisNetwork {
    pub nodes: Vec<Value>,
    pub edges: Vec<Value>,
    pub options: VisOptions,
}

/// Everything around the canvas.
#[derive(Debug, Clone, Default)]
pub struct PageChrome {
    pub title: String,
    pub subtitle: Option<String>,
    /// Pre-rendered HTML placed above the canvas (navigation, notes, legend).
    pub preamble: String,
    pub fit_delay_ms: u32,
    pub fit_duration_ms: u32,
}

impl VisNetwork {
    pub fn to_html(&self, page: &PageChrome) -> Result<String> {
        let nodes = script_json(&self.nodes)?;
        let edges = script_json(&self.edges)?;
        let options = script_json(self.options.as_value())?;

        let mut out = String::with_capacity(4096 + nodes.len() + edges.len());
        let _ = write!(
            out,
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script type="text/javascript" src="{VIS_NETWORK_JS}"></script>
<style>{BASE_CSS}</style>
</head>
<body>
{header}
<div class="container">
{preamble}
<div id="mynetwork"></div>
</div>
<script type="text/javascript">
var nodes = new vis.DataSet({nodes});
var edges = new vis.DataSet({edges});
var container = document.getElementById('mynetwork');
var options = {options};
var network = new vis.Network(container, {{ nodes: nodes, edges: edges }}, options);
</script>
{fit}
</body>
</html>
"#,
            title = EscapeHtml(&page.title),
            header = chrome::header_html(&page.title, page.subtitle.as_deref()),
            preamble = page.preamble,
            fit = chrome::fit_script(page.fit_delay_ms, page.fit_duration_ms),
        );
        Ok(out)
    }
}
