//! Runtime settings: where to listen, where datasets live, and per-page option overrides.
//!
//! Files are JSON unless the extension is `.yaml`/`.yml`. Every field has a default, so an empty
//! document (or no file at all) is a valid configuration.

mod options;

pub use options::VisOptions;

use crate::hierarchy::HierarchyOptions;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanopyConfig {
    pub server: ServerSettings,
    pub data: DataSettings,
    pub hierarchy: HierarchyOptions,
    pub pages: PageSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Dataset file names, relative to `dir` unless absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub dir: PathBuf,
    pub family: PathBuf,
    pub infrastructure: PathBuf,
    pub nodegraph: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            family: PathBuf::from("family_tree_data.json"),
            infrastructure: PathBuf::from("infrastructure_data.json"),
            nodegraph: PathBuf::from("nodegraph_data.json"),
        }
    }
}

impl DataSettings {
    pub fn resolve(&self, file: &Path) -> PathBuf {
        self.dir.join(file)
    }

    pub fn nodegraph_path(&self) -> PathBuf {
        self.resolve(&self.nodegraph)
    }
}

/// Overrides deep-merged over each page's built-in option blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    pub hierarchy_options: VisOptions,
    pub nodegraph_options: VisOptions,
}

impl CanopyConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        let parsed = if is_yaml {
            serde_yaml::from_str(&text).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(&text).map_err(|e| e.to_string())
        };
        let config: Self = parsed.map_err(|message| Error::Config {
            path: path.to_path_buf(),
            message,
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}
