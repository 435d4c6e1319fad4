//! Reading [`GraphData`] from a combined JSON document or a pair of CSV tables.
//!
//! A dataset is addressed by its JSON path. When `<stem>_nodes.csv` and `<stem>_edges.csv` both
//! exist next to it, the CSV pair is preferred.

use crate::model::{DEFAULT_EDGE_KIND, Edge, GraphData, Node, NodeId};
use crate::{Error, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};

impl GraphData {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| Error::Json {
            origin: "<string>".to_string(),
            source,
        })
    }

    /// `origin` names the source in error messages.
    pub fn from_json_reader<R: Read>(reader: R, origin: &str) -> Result<Self> {
        serde_json::from_reader(reader).map_err(|source| Error::Json {
            origin: origin.to_string(),
            source,
        })
    }

    /// Reads a node table and an edge table, each with a header row.
    ///
    /// Node columns: `id,label,color,size,title,level`, plus optional `font_color`, `status`,
    /// `error_rate`, `latency`, `throughput`, `shape`. Edge columns: `from,to,label,type`, plus
    /// optional `color`, `latency_ms`, `error_rate`, `throughput_rps`, `status`. Ids are always
    /// read as strings.
    pub fn from_csv_readers<N: Read, E: Read>(nodes: N, edges: E) -> Result<Self> {
        Self::from_csv_readers_named(nodes, "<nodes>", edges, "<edges>")
    }

    fn from_csv_readers_named<N: Read, E: Read>(
        nodes: N,
        nodes_origin: &str,
        edges: E,
        edges_origin: &str,
    ) -> Result<Self> {
        let nodes = read_csv_rows::<NodeRow, _>(nodes, nodes_origin)?
            .into_iter()
            .map(Node::from)
            .collect();
        let edges = read_csv_rows::<EdgeRow, _>(edges, edges_origin)?
            .into_iter()
            .map(Edge::from)
            .collect();
        Ok(Self { nodes, edges })
    }
}

fn read_csv_rows<T, R>(reader: R, origin: &str) -> Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
    R: Read,
{
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    rdr.deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()
        .map_err(|source| Error::Csv {
            origin: origin.to_string(),
            source,
        })
}

#[derive(Debug, Deserialize)]
struct NodeRow {
    id: String,
    label: String,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    size: Option<i64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    level: Option<i64>,
    #[serde(default)]
    font_color: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_rate: Option<f64>,
    #[serde(default)]
    latency: Option<f64>,
    #[serde(default)]
    throughput: Option<f64>,
    #[serde(default)]
    shape: Option<String>,
}

impl From<NodeRow> for Node {
    fn from(row: NodeRow) -> Self {
        Node {
            id: NodeId::Str(row.id),
            label: row.label,
            color: non_empty(row.color),
            level: row.level,
            title: non_empty(row.title),
            size: row.size,
            font_color: non_empty(row.font_color),
            status: non_empty(row.status),
            error_rate: row.error_rate,
            latency: row.latency,
            throughput: row.throughput,
            shape: non_empty(row.shape),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EdgeRow {
    from: String,
    to: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    latency_ms: Option<f64>,
    #[serde(default)]
    error_rate: Option<f64>,
    #[serde(default)]
    throughput_rps: Option<f64>,
    #[serde(default)]
    status: Option<String>,
}

impl From<EdgeRow> for Edge {
    fn from(row: EdgeRow) -> Self {
        Edge {
            from: NodeId::Str(row.from),
            to: NodeId::Str(row.to),
            label: row.label.unwrap_or_default(),
            color: non_empty(row.color),
            kind: non_empty(row.kind).unwrap_or_else(|| DEFAULT_EDGE_KIND.to_string()),
            latency_ms: row.latency_ms,
            error_rate: row.error_rate,
            throughput_rps: row.throughput_rps,
            status: non_empty(row.status),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// `data/family.json` → (`data/family_nodes.csv`, `data/family_edges.csv`).
pub fn csv_pair_paths(json_path: &Path) -> (PathBuf, PathBuf) {
    let stem = json_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = json_path.parent().unwrap_or_else(|| Path::new(""));
    (
        dir.join(format!("{stem}_nodes.csv")),
        dir.join(format!("{stem}_edges.csv")),
    )
}

/// Where a dataset is actually read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Json(PathBuf),
    CsvPair { nodes: PathBuf, edges: PathBuf },
}

impl DataSource {
    /// Picks the CSV pair when both tables exist, else the JSON document.
    pub fn resolve(json_path: &Path) -> Self {
        let (nodes, edges) = csv_pair_paths(json_path);
        if nodes.is_file() && edges.is_file() {
            DataSource::CsvPair { nodes, edges }
        } else {
            DataSource::Json(json_path.to_path_buf())
        }
    }

    pub fn load(&self) -> Result<GraphData> {
        match self {
            DataSource::Json(path) => {
                let file = open(path)?;
                GraphData::from_json_reader(std::io::BufReader::new(file), &path.display().to_string())
            }
            DataSource::CsvPair { nodes, edges } => GraphData::from_csv_readers_named(
                open(nodes)?,
                &nodes.display().to_string(),
                open(edges)?,
                &edges.display().to_string(),
            ),
        }
    }
}

fn open(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the dataset addressed by `json_path`, preferring a sibling CSV pair.
pub fn load_graph_data(json_path: impl AsRef<Path>) -> Result<GraphData> {
    let source = DataSource::resolve(json_path.as_ref());
    tracing::debug!(?source, "loading graph data");
    let data = source.load()?;
    tracing::debug!(
        nodes = data.nodes.len(),
        edges = data.edges.len(),
        "loaded graph data"
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NODES_CSV: &str = "\
id,label,color,size,title,level
p,Parent,#2B5A75,30,The parent,0
c,Child,#6B4C5C,,,1
";

    const EDGES_CSV: &str = "\
from,to,label,type
p,c,child of,
p,c,,spouse
";

    #[test]
    fn csv_rows_become_string_ids_with_defaults() {
        let data = GraphData::from_csv_readers(NODES_CSV.as_bytes(), EDGES_CSV.as_bytes()).unwrap();

        assert_eq!(data.nodes.len(), 2);
        assert_eq!(data.nodes[0].id, NodeId::from("p"));
        assert_eq!(data.nodes[0].size, Some(30));
        assert_eq!(data.nodes[0].title.as_deref(), Some("The parent"));
        assert_eq!(data.nodes[1].size, None);
        assert_eq!(data.nodes[1].title, None);
        assert_eq!(data.nodes[1].level, Some(1));

        assert_eq!(data.edges[0].kind, DEFAULT_EDGE_KIND);
        assert_eq!(data.edges[0].label, "child of");
        assert_eq!(data.edges[1].kind, "spouse");
        assert_eq!(data.edges[1].label, "");
    }

    #[test]
    fn bad_csv_level_names_the_table() {
        let nodes = "id,label,color,size,title,level\na,A,#fff,1,t,deep\n";
        let err = GraphData::from_csv_readers(nodes.as_bytes(), EDGES_CSV.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Csv { ref origin, .. } if origin == "<nodes>"));
    }

    #[test]
    fn json_accepts_missing_edges() {
        let data = GraphData::from_json_str(
            r##"{"nodes":[{"id":1,"label":"One","color":"#000","level":0}]}"##,
        )
        .unwrap();
        assert_eq!(data.nodes[0].id, NodeId::Int(1));
        assert!(data.edges.is_empty());
    }

    #[test]
    fn csv_pair_paths_replace_the_extension() {
        let (nodes, edges) = csv_pair_paths(Path::new("data/family_tree_data.json"));
        assert_eq!(nodes, Path::new("data/family_tree_data_nodes.csv"));
        assert_eq!(edges, Path::new("data/family_tree_data_edges.csv"));
    }

    #[test]
    fn csv_pair_is_preferred_only_when_both_tables_exist() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("tree.json");
        std::fs::write(
            &json_path,
            r##"{"nodes":[{"id":"j","label":"J","color":"#000","level":0}],"edges":[]}"##,
        )
        .unwrap();

        assert_eq!(DataSource::resolve(&json_path), DataSource::Json(json_path.clone()));

        std::fs::write(dir.path().join("tree_nodes.csv"), NODES_CSV).unwrap();
        assert_eq!(DataSource::resolve(&json_path), DataSource::Json(json_path.clone()));

        std::fs::write(dir.path().join("tree_edges.csv"), EDGES_CSV).unwrap();
        let data = load_graph_data(&json_path).unwrap();
        assert_eq!(data.nodes.len(), 2);
        assert_eq!(data.nodes[0].id, NodeId::from("p"));
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_graph_data(dir.path().join("absent.json")).unwrap_err();
        assert!(err.is_not_found());
        assert!(!err.is_graph_error());
    }
}
