//! Where the session mirror lives.

use serde::{Deserialize, Serialize};

fn default_dir() -> String {
    ".morph".to_string()
}

fn default_key() -> String {
    "hubble-annotations".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding the key-value files, relative to the project root.
    #[serde(default = "default_dir")]
    pub dir: String,

    /// Key under which the whole session is stored.
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            key: default_key(),
        }
    }
}
