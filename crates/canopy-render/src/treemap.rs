//! Nested-box treemap page. The page is static; the tree itself is fetched from the data API.

use crate::chrome::{self, NavTarget};
use crate::escape::EscapeHtml;
use canopy_core::HierarchyKind;

pub const D3_JS: &str = "https://d3js.org/d3.v7.min.js";
/// Route the page fetches its tree from.
pub const TREEMAP_DATA_PATH: &str = "/api/treemap-data";

const TREEMAP_CSS: &str = r#"
#treemap { width: 100%; height: 900px; position: relative; background: white; }
.node { overflow: hidden; position: absolute; cursor: pointer; border: 2px solid rgba(0,0,0,0.2); box-sizing: border-box; display: flex; align-items: center; justify-content: center; text-align: center; padding: 6px; font-weight: bold; color: white; font-size: 11px; transition: all 0.2s ease; }
.node:hover { border: 2px solid rgba(0,0,0,0.4); filter: brightness(1.1); z-index: 100; }
.node-label { pointer-events: none; text-shadow: 0 1px 2px rgba(0,0,0,0.4); word-wrap: break-word; line-height: 1.2; }
"#;

// Boxes smaller than 20px on either side are skipped; every record weighs 1.
const TREEMAP_SCRIPT: &str = r#"
async function loadData() {
  const response = await fetch(DATA_URL);
  return await response.json();
}

async function render() {
  const data = await loadData();
  const container = document.getElementById('treemap');
  const width = container.offsetWidth;
  const height = 900;

  const root = d3.hierarchy(data)
    .sum(d => 1)
    .sort((a, b) => b.value - a.value);

  d3.treemap()
    .size([width, height])
    .paddingTop(2)
    .paddingRight(2)
    .paddingBottom(2)
    .paddingLeft(2)
    .round(true)(root);

  container.innerHTML = '';

  function renderNode(node) {
    if (node.x1 - node.x0 > 20 && node.y1 - node.y0 > 20) {
      const div = document.createElement('div');
      div.className = 'node';
      div.style.left = node.x0 + 'px';
      div.style.top = node.y0 + 'px';
      div.style.width = (node.x1 - node.x0) + 'px';
      div.style.height = (node.y1 - node.y0) + 'px';
      div.style.backgroundColor = node.data.color;
      div.title = node.data.id;
      div.dataset.id = node.data.id;

      const label = document.createElement('div');
      label.className = 'node-label';
      label.style.fontSize = Math.max(9, Math.min(13, (node.x1 - node.x0) / 12)) + 'px';
      label.textContent = node.data.name;

      div.appendChild(label);
      container.appendChild(div);
    }
    if (node.children) {
      node.children.forEach(renderNode);
    }
  }

  renderNode(root);
}

render();
window.addEventListener('resize', render);
"#;

pub fn render_treemap_page(kind: HierarchyKind) -> String {
    let title = format!("{} Treemap", kind.title());
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title_text}</title>
<script src="{D3_JS}"></script>
<style>{base}{TREEMAP_CSS}</style>
</head>
<body>
{header}
<div class="container">
{nav}
<div id="treemap"></div>
<div class="legend"><strong>Visualization Guide:</strong> Larger boxes contain smaller boxes. Each box is one record of the hierarchy; hover over any box to see its id.</div>
</div>
<script>
const DATA_URL = '{TREEMAP_DATA_PATH}?type={kind}';
{TREEMAP_SCRIPT}
</script>
</body>
</html>
"#,
        title_text = EscapeHtml(&title),
        base = chrome::BASE_CSS,
        header = chrome::header_html(&title, Some("Nested Hierarchy")),
        nav = chrome::nav_links(NavTarget::Treemap(kind)),
    )
}
