//! Top-down hierarchical network page for the family / infrastructure datasets.

use crate::Result;
use crate::chrome::{self, NavTarget};
use crate::network::{PageChrome, VisNetwork};
use canopy_core::{Edge, GraphData, HierarchyKind, Node, VisOptions};
use serde_json::{Value, json};

pub const DEFAULT_NODE_COLOR: &str = "#4A90E2";
const HIGHLIGHT_BORDER: &str = "#888888";

/// Fixed box size (width, height) per declared level; deeper levels get smaller boxes.
pub fn box_size(level: i64) -> (u32, u32) {
    match level {
        0 => (150, 70),
        1 => (130, 60),
        2 => (120, 60),
        3 => (90, 45),
        _ => (80, 40),
    }
}

pub fn hierarchy_options() -> VisOptions {
    VisOptions::from_value(json!({
        "physics": {"enabled": false},
        "layout": {
            "hierarchical": {
                "enabled": true,
                "levelSeparation": 200,
                "nodeSpacing": 150,
                "direction": "UD",
                "sortMethod": "directed"
            }
        },
        "edges": {
            "smooth": {"type": "cubicBezier", "forceDirection": "vertical"},
            "font": {"size": 10, "color": "#666", "align": "middle"},
            "widthConstraint": {"maximum": 90}
        },
        "nodes": {
            "shape": "box",
            "margin": {"top": 10, "bottom": 10, "left": 15, "right": 15},
            "font": {
                "size": 14,
                "color": "white",
                "face": "Arial",
                "align": "center",
                "multi": false,
                "bold": {"mod": "bold"}
            },
            "borderWidth": 1,
            "borderWidthSelected": 2
        },
        "interaction": {"navigationButtons": true, "keyboard": true, "zoomView": true}
    }))
}

pub fn vis_node(node: &Node) -> Value {
    let color = node.color.as_deref().unwrap_or(DEFAULT_NODE_COLOR);
    let level = node.level.unwrap_or(0);
    let (width, height) = box_size(level);

    let mut out = json!({
        "id": node.id,
        "label": node.label,
        "shape": "box",
        "color": {
            "background": color,
            "border": color,
            "highlight": {"background": color, "border": HIGHLIGHT_BORDER},
            "hover": {"background": color, "border": HIGHLIGHT_BORDER}
        },
        "level": level,
        "borderWidth": 2,
        "borderWidthSelected": 3,
        "widthConstraint": {"minimum": width, "maximum": width},
        "heightConstraint": {"minimum": height, "maximum": height},
        "margin": {"top": 8, "bottom": 8, "left": 12, "right": 12},
        "font": {
            "size": 13,
            "color": node.font_color.as_deref().unwrap_or("#ffffff"),
            "face": "Arial",
            "align": "center",
            "multi": true,
            "bold": {"mod": "bold"}
        },
        "physics": false
    });
    if let Some(title) = &node.title {
        out["title"] = Value::from(title.as_str());
    }
    out
}

pub fn vis_edge(edge: &Edge) -> Value {
    let mut out = json!({
        "from": edge.from,
        "to": edge.to,
        "label": edge.label,
        "arrows": "to",
    });
    if let Some(color) = &edge.color {
        out["color"] = Value::from(color.as_str());
    }
    match edge.kind.as_str() {
        "spouse" => {
            out["arrows"] = Value::from("to, from");
            out["smooth"] = Value::Bool(true);
        }
        "sibling" => {
            out["arrows"] = Value::from("to, from");
            out["dashes"] = Value::Bool(true);
        }
        _ => {}
    }
    out
}

pub fn hierarchy_network(data: &GraphData, overrides: &VisOptions) -> VisNetwork {
    VisNetwork {
        nodes: data.nodes.iter().map(vis_node).collect(),
        edges: data.edges.iter().map(vis_edge).collect(),
        options: hierarchy_options().merged(overrides),
    }
}

pub fn render_hierarchy_page(
    data: &GraphData,
    kind: HierarchyKind,
    overrides: &VisOptions,
) -> Result<String> {
    let heading = match kind {
        HierarchyKind::Family => "Color Legend:",
        HierarchyKind::Infrastructure => "Legend:",
    };
    let page = PageChrome {
        title: kind.title().to_string(),
        subtitle: None,
        preamble: format!(
            "{}{}",
            chrome::nav_links(NavTarget::Hierarchy(kind)),
            chrome::legend_html(heading, chrome::hierarchy_legend(kind), None)
        ),
        fit_delay_ms: 500,
        fit_duration_ms: 500,
    };
    let html = hierarchy_network(data, overrides).to_html(&page)?;
    tracing::debug!(kind = %kind, nodes = data.nodes.len(), "rendered hierarchy page");
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_sizes_shrink_with_level() {
        assert_eq!(box_size(0), (150, 70));
        assert_eq!(box_size(1), (130, 60));
        assert_eq!(box_size(2), (120, 60));
        assert_eq!(box_size(3), (90, 45));
        assert_eq!(box_size(4), (80, 40));
        assert_eq!(box_size(-1), (80, 40));
    }

    #[test]
    fn nodes_are_fixed_size_boxes_in_their_own_color() {
        let v = vis_node(&Node::new("h1", "Host 1", "#16a34a", 2));
        assert_eq!(v["shape"], "box");
        assert_eq!(v["color"]["background"], "#16a34a");
        assert_eq!(v["color"]["highlight"]["border"], "#888888");
        assert_eq!(v["widthConstraint"], json!({"minimum": 120, "maximum": 120}));
        assert_eq!(v["heightConstraint"], json!({"minimum": 60, "maximum": 60}));
        assert_eq!(v["level"], 2);
        assert!(v.get("title").is_none());
    }

    #[test]
    fn relationship_edges_are_bidirectional() {
        let plain = vis_edge(&Edge::new("a", "b"));
        assert_eq!(plain["arrows"], "to");
        assert!(plain.get("smooth").is_none());

        let spouse = vis_edge(&Edge::new("a", "b").with_kind("spouse"));
        assert_eq!(spouse["arrows"], "to, from");
        assert_eq!(spouse["smooth"], true);

        let sibling = vis_edge(&Edge::new("a", "b").with_kind("sibling"));
        assert_eq!(sibling["arrows"], "to, from");
        assert_eq!(sibling["dashes"], true);
    }

    #[test]
    fn layout_is_top_down_without_physics() {
        let opts = hierarchy_options();
        assert_eq!(opts.get_bool("physics.enabled"), Some(false));
        assert_eq!(opts.get_str("layout.hierarchical.direction"), Some("UD"));
        assert_eq!(opts.get_f64("layout.hierarchical.levelSeparation"), Some(200.0));
        assert_eq!(opts.get_f64("layout.hierarchical.nodeSpacing"), Some(150.0));
        assert_eq!(opts.get_str("layout.hierarchical.sortMethod"), Some("directed"));
        assert_eq!(opts.get_str("edges.smooth.type"), Some("cubicBezier"));
    }

    #[test]
    fn overrides_reach_the_embedded_options() {
        let data = GraphData::new(vec![Node::new("a", "a</b", "#000", 0)], vec![]);
        let overrides = VisOptions::from_value(json!({"layout": {"hierarchical": {"direction": "LR"}}}));
        let html = render_hierarchy_page(&data, HierarchyKind::Family, &overrides).unwrap();

        assert!(html.contains("<title>Family Hierarchy</title>"));
        assert!(html.contains(r#""direction":"LR""#));
        assert!(html.contains(r#""sortMethod":"directed""#));
        assert!(html.contains("Male"));
        assert!(html.contains(r#""label":"a<\/b""#));
    }
}
