//! Item field update builder.
//!
//! Covers the user-owned fields only. Features go through
//! `FeaturePatch`, and the suggestion has no setter at all.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ItemPatch {
    #[must_use]
    pub fn builder() -> ItemPatchBuilder {
        ItemPatchBuilder::new()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.final_label.is_none() && self.confidence.is_none() && self.notes.is_none()
    }
}

pub struct ItemPatchBuilder(ItemPatch);

impl Default for ItemPatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemPatchBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ItemPatch::default())
    }

    /// Pin a final label. An empty string clears the override.
    #[must_use]
    pub fn final_label(mut self, val: impl Into<String>) -> Self {
        self.0.final_label = Some(val.into());
        self
    }

    #[must_use]
    pub fn confidence(mut self, val: f64) -> Self {
        self.0.confidence = Some(val);
        self
    }

    #[must_use]
    pub fn notes(mut self, val: impl Into<String>) -> Self {
        self.0.notes = Some(val.into());
        self
    }

    #[must_use]
    pub fn build(self) -> ItemPatch {
        self.0
    }
}
