//! Shared page furniture: stylesheet, header, navigation bar, legends.

use crate::escape::EscapeHtml;
use canopy_core::HierarchyKind;
use std::fmt::Write as _;

pub(crate) const BASE_CSS: &str = r#"
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background-color: #f5f5f5; margin: 0; padding: 0; }
#mynetwork { width: 100%; height: 900px; background-color: #ffffff; border: 1px solid #ddd; border-radius: 4px; }
.header { background: linear-gradient(135deg, #2c3e50 0%, #34495e 100%); color: white; padding: 20px; text-align: center; box-shadow: 0 2px 8px rgba(0,0,0,0.15); }
.header h1 { margin: 0; font-size: 28px; font-weight: 300; letter-spacing: 1px; }
.header p { margin: 8px 0 0 0; font-size: 12px; opacity: 0.9; }
.container { padding: 20px; max-width: 1600px; margin: 0 auto; }
.legend { margin-bottom: 15px; padding: 12px 15px; background-color: #ecf0f1; border-radius: 4px; font-size: 12px; border-left: 4px solid #34495e; }
.legend-item { display: inline-block; margin-right: 20px; }
.legend-color { display: inline-block; width: 12px; height: 12px; border-radius: 2px; margin-right: 6px; vertical-align: middle; }
.legend-note { font-style: italic; }
.nav-links { text-align: center; margin-bottom: 10px; font-size: 12px; }
.nav-links a { color: #34495e; text-decoration: none; margin: 0 10px; padding: 6px 12px; border-radius: 3px; background-color: white; border: 1px solid #bdc3c7; display: inline-block; }
.nav-links a:hover, .nav-links a.active { background-color: #34495e; color: white; }
.info { background-color: #e8f4f8; border-left: 4px solid #3498db; padding: 12px 15px; border-radius: 4px; margin-bottom: 15px; font-size: 11px; }
"#;

/// Which navigation entry is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Hierarchy(HierarchyKind),
    Treemap(HierarchyKind),
    NodeGraph,
}

impl NavTarget {
    /// Dataset the treemap link should open.
    fn treemap_kind(self) -> HierarchyKind {
        match self {
            NavTarget::Hierarchy(kind) | NavTarget::Treemap(kind) => kind,
            NavTarget::NodeGraph => HierarchyKind::Infrastructure,
        }
    }
}

pub fn nav_links(active: NavTarget) -> String {
    let links = [
        (
            "/?type=family".to_string(),
            "Family Tree",
            active == NavTarget::Hierarchy(HierarchyKind::Family),
        ),
        (
            "/?type=infrastructure".to_string(),
            "Infrastructure (Network)",
            active == NavTarget::Hierarchy(HierarchyKind::Infrastructure),
        ),
        (
            format!("/treemap?type={}", active.treemap_kind()),
            "Treemap",
            matches!(active, NavTarget::Treemap(_)),
        ),
        ("/nodegraph".to_string(), "Node Graph", active == NavTarget::NodeGraph),
    ];

    let mut out = String::from(r#"<div class="nav-links">"#);
    for (href, text, is_active) in links {
        let class = if is_active { r#" class="active""# } else { "" };
        let _ = write!(out, r#"<a href="{}"{class}>{text}</a>"#, EscapeHtml(&href));
    }
    out.push_str("</div>");
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendItem {
    pub color: &'static str,
    pub label: &'static str,
}

const FAMILY_LEGEND: &[LegendItem] = &[
    LegendItem { color: "#2B5A75", label: "Male" },
    LegendItem { color: "#6B4C5C", label: "Female" },
];

const INFRASTRUCTURE_LEGEND: &[LegendItem] = &[
    LegendItem { color: "#1a1a2e", label: "Service Group" },
    LegendItem { color: "#0f3460", label: "Service" },
    LegendItem { color: "#16a34a", label: "Host" },
    LegendItem { color: "#dc2626", label: "Port" },
    LegendItem { color: "#22c55e", label: "Healthy" },
    LegendItem { color: "#f59e0b", label: "Warning" },
];

pub(crate) const STATUS_LEGEND: &[LegendItem] = &[
    LegendItem { color: "#22c55e", label: "Healthy" },
    LegendItem { color: "#f59e0b", label: "Warning" },
    LegendItem { color: "#ef4444", label: "Critical" },
];

pub fn hierarchy_legend(kind: HierarchyKind) -> &'static [LegendItem] {
    match kind {
        HierarchyKind::Family => FAMILY_LEGEND,
        HierarchyKind::Infrastructure => INFRASTRUCTURE_LEGEND,
    }
}

pub fn legend_html(heading: &str, items: &[LegendItem], note: Option<&str>) -> String {
    let mut out = format!(
        r#"<div class="legend"><strong>{}</strong> "#,
        EscapeHtml(heading)
    );
    for item in items {
        let _ = write!(
            out,
            r#"<span class="legend-item"><span class="legend-color" style="background-color: {};"></span>{}</span>"#,
            EscapeHtml(item.color),
            EscapeHtml(item.label)
        );
    }
    if let Some(note) = note {
        let _ = write!(out, r#"<span class="legend-item legend-note">{}</span>"#, EscapeHtml(note));
    }
    out.push_str("</div>");
    out
}

/// Refits the network view once the first layout pass has settled.
pub(crate) fn fit_script(delay_ms: u32, duration_ms: u32) -> String {
    format!(
        r#"<script type="text/javascript">
setTimeout(function () {{
  if (typeof network !== 'undefined') {{
    network.fit({{ animation: {{ duration: {duration_ms}, easingFunction: 'easeInOutQuad' }} }});
  }}
}}, {delay_ms});
</script>"#
    )
}

pub(crate) fn header_html(title: &str, subtitle: Option<&str>) -> String {
    let mut out = format!(r#"<div class="header"><h1>{}</h1>"#, EscapeHtml(title));
    if let Some(sub) = subtitle {
        let _ = write!(out, "<p>{}</p>", EscapeHtml(sub));
    }
    out.push_str("</div>");
    out
}
