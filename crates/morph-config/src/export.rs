//! Export destinations.

use serde::{Deserialize, Serialize};

fn default_dir() -> String {
    "exports".to_string()
}

fn default_basename() -> String {
    "hubble_labels".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Directory export files are written to.
    #[serde(default = "default_dir")]
    pub dir: String,

    /// File name stem; `.json` or `.csv` is appended.
    #[serde(default = "default_basename")]
    pub basename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            basename: default_basename(),
        }
    }
}

impl ExportConfig {
    /// File name for the given extension, e.g. `hubble_labels.csv`.
    #[must_use]
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{extension}", self.basename)
    }
}
