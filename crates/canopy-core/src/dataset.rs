use crate::config::DataSettings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The hierarchical datasets a deployment serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HierarchyKind {
    #[default]
    Family,
    Infrastructure,
}

impl HierarchyKind {
    pub const ALL: [HierarchyKind; 2] = [HierarchyKind::Family, HierarchyKind::Infrastructure];

    /// Unknown or missing names select [`HierarchyKind::Family`].
    pub fn parse_lenient(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some(n) if n.eq_ignore_ascii_case("infrastructure") => HierarchyKind::Infrastructure,
            _ => HierarchyKind::Family,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HierarchyKind::Family => "family",
            HierarchyKind::Infrastructure => "infrastructure",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            HierarchyKind::Family => "Family Hierarchy",
            HierarchyKind::Infrastructure => "Infrastructure Topology",
        }
    }

    pub fn data_path(self, settings: &DataSettings) -> PathBuf {
        match self {
            HierarchyKind::Family => settings.resolve(&settings.family),
            HierarchyKind::Infrastructure => settings.resolve(&settings.infrastructure),
        }
    }
}

impl fmt::Display for HierarchyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
