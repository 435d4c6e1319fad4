use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("edge #{edge_index} references undeclared node id `{id}` as its `{endpoint}` endpoint")]
    UndeclaredNode {
        id: String,
        edge_index: usize,
        endpoint: &'static str,
    },

    #[error("duplicate node id `{id}`")]
    DuplicateNode { id: String },

    #[error("node `{child}` has more than one parent (`{first}` and `{second}`)")]
    DuplicateParent {
        child: String,
        first: String,
        second: String,
    },

    /// `path` is closed: its last element repeats the first.
    #[error("cycle detected: {}", .path.join(" -> "))]
    Cycle { path: Vec<String> },

    #[error("node `{id}` is missing required field `{field}`")]
    MissingField { id: String, field: &'static str },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid CSV in {origin}: {source}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },

    #[error("invalid configuration in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl Error {
    /// True when the underlying failure is a missing file, as opposed to malformed content.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }

    /// True for failures of the hierarchy builder itself (bad graph shape), not of loading.
    pub fn is_graph_error(&self) -> bool {
        matches!(
            self,
            Error::UndeclaredNode { .. }
                | Error::DuplicateNode { .. }
                | Error::DuplicateParent { .. }
                | Error::Cycle { .. }
                | Error::MissingField { .. }
        )
    }
}
