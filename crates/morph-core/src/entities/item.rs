use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::image::{ImageRef, RawInput};
use crate::classify::classify;
use crate::features::{FeaturePatch, FeatureVector, PERCENT_MAX, clamp_to, de_percent};

/// Confidence assigned to freshly added items.
pub const DEFAULT_CONFIDENCE: u8 = 70;

/// One image under annotation.
///
/// `suggested_label` is derived: it is recomputed from `features` on every
/// feature write and on deserialization, and has no setter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(from = "ItemRecord")]
pub struct AnnotatedItem {
    id: String,
    display_name: String,
    image: ImageRef,
    features: FeatureVector,
    suggested_label: String,
    /// Empty means "no override, use the suggestion".
    final_label: String,
    #[schemars(range(max = 100))]
    confidence: u8,
    notes: String,
    added_at: DateTime<Utc>,
}

/// Wire shape of an item. Whatever suggestion it carries is discarded.
#[derive(Deserialize, JsonSchema)]
struct ItemRecord {
    id: String,
    display_name: String,
    image: ImageRef,
    #[serde(default)]
    features: FeatureVector,
    #[serde(default)]
    #[allow(dead_code)]
    suggested_label: String,
    #[serde(default)]
    final_label: String,
    #[serde(default = "default_confidence", deserialize_with = "de_percent")]
    #[schemars(with = "u8")]
    confidence: u8,
    #[serde(default)]
    notes: String,
    #[serde(default = "Utc::now")]
    added_at: DateTime<Utc>,
}

const fn default_confidence() -> u8 {
    DEFAULT_CONFIDENCE
}

impl From<ItemRecord> for AnnotatedItem {
    fn from(record: ItemRecord) -> Self {
        Self {
            suggested_label: classify(&record.features).to_string(),
            id: record.id,
            display_name: record.display_name,
            image: record.image,
            features: record.features,
            final_label: record.final_label,
            confidence: record.confidence,
            notes: record.notes,
            added_at: record.added_at,
        }
    }
}

impl AnnotatedItem {
    /// Create an item with default features and its initial suggestion.
    #[must_use]
    pub fn new(id: String, input: RawInput, added_at: DateTime<Utc>) -> Self {
        let features = FeatureVector::default();
        Self {
            id,
            display_name: input.name,
            image: input.image,
            suggested_label: classify(&features).to_string(),
            features,
            final_label: String::new(),
            confidence: DEFAULT_CONFIDENCE,
            notes: String::new(),
            added_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub const fn image(&self) -> &ImageRef {
        &self.image
    }

    #[must_use]
    pub const fn features(&self) -> &FeatureVector {
        &self.features
    }

    #[must_use]
    pub fn suggested_label(&self) -> &str {
        &self.suggested_label
    }

    #[must_use]
    pub fn final_label(&self) -> &str {
        &self.final_label
    }

    #[must_use]
    pub const fn confidence(&self) -> u8 {
        self.confidence
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    #[must_use]
    pub const fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    /// The label this item counts as: the override if set, else the suggestion.
    #[must_use]
    pub fn effective_label(&self) -> &str {
        if self.final_label.is_empty() {
            &self.suggested_label
        } else {
            &self.final_label
        }
    }

    /// Merge a feature patch and recompute the suggestion in the same step.
    pub fn apply_features(&mut self, patch: &FeaturePatch) {
        self.features.apply(patch);
        self.suggested_label = classify(&self.features).to_string();
    }

    pub fn set_final_label(&mut self, label: impl Into<String>) {
        self.final_label = label.into();
    }

    /// Set confidence, rounded and clamped to `0..=100`. NaN is ignored.
    pub fn set_confidence(&mut self, raw: f64) {
        match clamp_to(raw, PERCENT_MAX) {
            Some(value) => self.confidence = value,
            None => tracing::warn!(item = %self.id, "ignoring non-finite confidence"),
        }
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }
}
