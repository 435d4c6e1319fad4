//! Force-directed service graph with health colors and traffic metrics.

use crate::Result;
use crate::chrome::{self, NavTarget, STATUS_LEGEND};
use crate::escape::EscapeHtml;
use crate::hierarchy::DEFAULT_NODE_COLOR;
use crate::network::{PageChrome, VisNetwork};
use canopy_core::{Edge, GraphData, Node, VisOptions};
use serde_json::{Value, json};

pub const DEFAULT_NODE_SIZE: i64 = 40;
pub const UNKNOWN_STATUS: &str = "unknown";
/// Throughput (RPS) that maps to the widest edge.
pub const FULL_WIDTH_THROUGHPUT: f64 = 2000.0;

pub fn status_color(status: &str) -> Option<&'static str> {
    match status {
        "healthy" => Some("#22c55e"),
        "warning" => Some("#f59e0b"),
        "critical" => Some("#ef4444"),
        "unknown" => Some("#9ca3af"),
        _ => None,
    }
}

/// Edges without a warning/critical status are drawn as healthy.
pub fn edge_status_color(status: Option<&str>) -> &'static str {
    match status {
        Some("warning") => "#f59e0b",
        Some("critical") => "#ef4444",
        _ => "#22c55e",
    }
}

/// Maps dataset shape names onto shapes vis-network can draw.
pub fn vis_shape(shape: Option<&str>) -> &'static str {
    match shape {
        Some("box") => "box",
        Some("diamond") => "diamond",
        Some("cylinder") => "ellipse",
        _ => "star",
    }
}

/// Width grows linearly from 1 at zero traffic to 4 at [`FULL_WIDTH_THROUGHPUT`].
pub fn edge_width(throughput_rps: f64) -> f64 {
    1.0 + throughput_rps / FULL_WIDTH_THROUGHPUT * 3.0
}

pub fn nodegraph_options() -> VisOptions {
    VisOptions::from_value(json!({
        "physics": {
            "enabled": true,
            "barnesHut": {
                "gravitationalConstant": -30000,
                "centralGravity": 0.3,
                "springLength": 200,
                "springConstant": 0.04,
                "damping": 0.09,
                "avoidOverlap": 0.1
            },
            "solver": "barnesHut",
            "timestep": 0.5,
            "stabilization": {"iterations": 200}
        },
        "edges": {
            "smooth": {"type": "continuous", "roundness": 0.5},
            "font": {
                "size": 10,
                "color": "#666",
                "align": "middle",
                "background": {"enabled": true, "color": "rgba(255, 255, 255, 0.8)", "size": 0.8}
            },
            "widthConstraint": {"maximum": 90}
        },
        "nodes": {
            "font": {
                "size": 12,
                "color": "white",
                "face": "Arial",
                "align": "center",
                "bold": {"mod": "bold"}
            },
            "borderWidth": 2,
            "borderWidthSelected": 4
        },
        "interaction": {
            "navigationButtons": true,
            "keyboard": true,
            "zoomView": true,
            "hover": true
        }
    }))
}

fn node_tooltip(node: &Node, status: &str) -> String {
    format!(
        "<b>{}</b><br>Status: {}<br>Error Rate: {}%<br>Latency: {}ms<br>Throughput: {} RPS",
        EscapeHtml(&node.label),
        EscapeHtml(&status.to_uppercase()),
        node.error_rate.unwrap_or(0.0),
        node.latency.unwrap_or(0.0),
        node.throughput.unwrap_or(0.0),
    )
}

pub fn vis_node(node: &Node) -> Value {
    let status = node.status.as_deref().unwrap_or(UNKNOWN_STATUS);
    let color = status_color(status)
        .or(node.color.as_deref())
        .unwrap_or(DEFAULT_NODE_COLOR);

    json!({
        "id": node.id,
        "label": node.label,
        "shape": vis_shape(node.shape.as_deref()),
        "color": {
            "background": color,
            "border": color,
            "highlight": {"background": color, "border": "#ffffff"},
            "hover": {"background": color, "border": "#ffffff"}
        },
        "title": node_tooltip(node, status),
        "size": node.size.unwrap_or(DEFAULT_NODE_SIZE),
        "borderWidth": 2,
        "borderWidthSelected": 4,
        "font": {
            "size": 12,
            "color": "#ffffff",
            "face": "Arial",
            "align": "center",
            "bold": {"mod": "bold"}
        },
        "scaling": {"label": {"enabled": true, "min": 10, "max": 14}}
    })
}

pub fn vis_edge(edge: &Edge) -> Value {
    let throughput = edge.throughput_rps.unwrap_or(0.0);
    let color = edge_status_color(edge.status.as_deref());

    json!({
        "from": edge.from,
        "to": edge.to,
        "label": format!("↓ {throughput} RPS"),
        "color": {"color": color, "highlight": "#ffffff", "hover": "#ffffff"},
        "arrows": "to",
        "width": edge_width(throughput),
        "font": {
            "size": 10,
            "color": color,
            "align": "middle",
            "background": {"enabled": true, "color": "rgba(255, 255, 255, 0.8)"}
        },
        "smooth": {"type": "continuous"},
        "title": format!(
            "Latency: {}ms\nError Rate: {}%\nThroughput: {throughput} RPS",
            edge.latency_ms.unwrap_or(0.0),
            edge.error_rate.unwrap_or(0.0),
        )
    })
}

pub fn nodegraph_network(data: &GraphData, overrides: &VisOptions) -> VisNetwork {
    VisNetwork {
        nodes: data.nodes.iter().map(vis_node).collect(),
        edges: data.edges.iter().map(vis_edge).collect(),
        options: nodegraph_options().merged(overrides),
    }
}

const GUIDE: &str = r#"<div class="info"><strong>Node Graph Guide:</strong> Hover over nodes for detailed metrics. Edge labels show throughput (RPS). Edge thickness indicates data flow volume. Color indicates health status (green = healthy, orange = warning, red = critical).</div>"#;

pub fn render_nodegraph_page(data: &GraphData, overrides: &VisOptions) -> Result<String> {
    let page = PageChrome {
        title: "Service Node Graph".to_string(),
        subtitle: Some("Service Dependencies with Metrics".to_string()),
        preamble: format!(
            "{}{GUIDE}{}",
            chrome::nav_links(NavTarget::NodeGraph),
            chrome::legend_html(
                "Health:",
                STATUS_LEGEND,
                Some("Node size represents importance | Edge thickness represents throughput"),
            )
        ),
        fit_delay_ms: 1500,
        fit_duration_ms: 1000,
    };
    let html = nodegraph_network(data, overrides).to_html(&page)?;
    tracing::debug!(
        nodes = data.nodes.len(),
        edges = data.edges.len(),
        "rendered node graph page"
    );
    Ok(html)
}
