//! How the file layer picks up images.

use serde::{Deserialize, Serialize};

const fn default_skip_hidden() -> bool {
    true
}

fn default_extensions() -> Vec<String> {
    ["png", "jpg", "jpeg"].map(String::from).to_vec()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnnotateConfig {
    /// Skip dot-files when a directory is added.
    #[serde(default = "default_skip_hidden")]
    pub skip_hidden: bool,

    /// Extensions accepted when a directory is added (case-insensitive).
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            skip_hidden: default_skip_hidden(),
            extensions: default_extensions(),
        }
    }
}

impl AnnotateConfig {
    /// Whether a file name passes the extension and hidden-file filters.
    #[must_use]
    pub fn accepts(&self, file_name: &str) -> bool {
        if self.skip_hidden && file_name.starts_with('.') {
            return false;
        }
        file_name.rsplit_once('.').is_some_and(|(_, ext)| {
            self.extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
    }
}
