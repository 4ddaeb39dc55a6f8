//! The morphological feature vector and partial updates to it.
//!
//! Every numeric field is clamped to its declared range on every write,
//! including deserialization, so a `FeatureVector` can never hold an
//! out-of-range value.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::{ArmTightness, BarStrength};

/// Upper bound for percentage-like fields.
pub const PERCENT_MAX: u8 = 100;

/// Upper bound for the elliptical index (E0..E7).
pub const ELLIPTICAL_INDEX_MAX: u8 = 7;

/// Round and clamp a raw value into `0..=max`. Returns `None` for NaN.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_to(value: f64, max: u8) -> Option<u8> {
    if value.is_nan() {
        return None;
    }
    Some(value.round().clamp(0.0, f64::from(max)) as u8)
}

pub(crate) fn de_percent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    Ok(clamp_to(raw, PERCENT_MAX).unwrap_or(0))
}

fn de_elliptical_index<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    Ok(clamp_to(raw, ELLIPTICAL_INDEX_MAX).unwrap_or(0))
}

/// Morphological attributes attached to one annotated item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct FeatureVector {
    /// 0 = no central bulge, 100 = bulge dominates.
    #[serde(deserialize_with = "de_percent")]
    #[schemars(with = "u8")]
    bulge_prominence: u8,
    arm_tightness: ArmTightness,
    bar_strength: BarStrength,
    has_ring: bool,
    is_irregular: bool,
    /// Flattening index, only meaningful for ellipticals.
    #[serde(deserialize_with = "de_elliptical_index")]
    #[schemars(with = "u8")]
    elliptical_index: u8,
    /// Higher means more likely lenticular (S0).
    #[serde(deserialize_with = "de_percent")]
    #[schemars(with = "u8")]
    lenticular_likelihood: u8,
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self {
            bulge_prominence: 50,
            arm_tightness: ArmTightness::Moderate,
            bar_strength: BarStrength::None,
            has_ring: false,
            is_irregular: false,
            elliptical_index: 2,
            lenticular_likelihood: 30,
        }
    }
}

impl FeatureVector {
    #[must_use]
    pub const fn bulge_prominence(&self) -> u8 {
        self.bulge_prominence
    }

    #[must_use]
    pub const fn arm_tightness(&self) -> ArmTightness {
        self.arm_tightness
    }

    #[must_use]
    pub const fn bar_strength(&self) -> BarStrength {
        self.bar_strength
    }

    #[must_use]
    pub const fn has_ring(&self) -> bool {
        self.has_ring
    }

    #[must_use]
    pub const fn is_irregular(&self) -> bool {
        self.is_irregular
    }

    #[must_use]
    pub const fn elliptical_index(&self) -> u8 {
        self.elliptical_index
    }

    #[must_use]
    pub const fn lenticular_likelihood(&self) -> u8 {
        self.lenticular_likelihood
    }

    /// Merge a patch into this vector, clamping numeric fields.
    ///
    /// A NaN value leaves its field unchanged; the rest of the patch still applies.
    pub fn apply(&mut self, patch: &FeaturePatch) {
        if let Some(raw) = patch.bulge_prominence {
            merge_numeric(&mut self.bulge_prominence, raw, PERCENT_MAX, "bulge_prominence");
        }
        if let Some(arms) = patch.arm_tightness {
            self.arm_tightness = arms;
        }
        if let Some(bar) = patch.bar_strength {
            self.bar_strength = bar;
        }
        if let Some(ring) = patch.has_ring {
            self.has_ring = ring;
        }
        if let Some(irregular) = patch.is_irregular {
            self.is_irregular = irregular;
        }
        if let Some(raw) = patch.elliptical_index {
            merge_numeric(
                &mut self.elliptical_index,
                raw,
                ELLIPTICAL_INDEX_MAX,
                "elliptical_index",
            );
        }
        if let Some(raw) = patch.lenticular_likelihood {
            merge_numeric(
                &mut self.lenticular_likelihood,
                raw,
                PERCENT_MAX,
                "lenticular_likelihood",
            );
        }
    }

    /// Copy of this vector with `patch` applied.
    #[must_use]
    pub fn patched(mut self, patch: &FeaturePatch) -> Self {
        self.apply(patch);
        self
    }
}

fn merge_numeric(slot: &mut u8, raw: f64, max: u8, field: &'static str) {
    match clamp_to(raw, max) {
        Some(value) => *slot = value,
        None => tracing::warn!(field, "ignoring non-finite feature value"),
    }
}

/// Partial update of a [`FeatureVector`]. Absent fields are left untouched.
///
/// Numeric fields are `f64` so fractional and out-of-range inputs can be
/// expressed; they are rounded and clamped on merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeaturePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulge_prominence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arm_tightness: Option<ArmTightness>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar_strength: Option<BarStrength>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_ring: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_irregular: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elliptical_index: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lenticular_likelihood: Option<f64>,
}

impl FeaturePatch {
    #[must_use]
    pub fn builder() -> FeaturePatchBuilder {
        FeaturePatchBuilder::new()
    }

    /// Whether the patch carries no field at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bulge_prominence.is_none()
            && self.arm_tightness.is_none()
            && self.bar_strength.is_none()
            && self.has_ring.is_none()
            && self.is_irregular.is_none()
            && self.elliptical_index.is_none()
            && self.lenticular_likelihood.is_none()
    }
}

pub struct FeaturePatchBuilder(FeaturePatch);

impl Default for FeaturePatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FeaturePatchBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self(FeaturePatch {
            bulge_prominence: None,
            arm_tightness: None,
            bar_strength: None,
            has_ring: None,
            is_irregular: None,
            elliptical_index: None,
            lenticular_likelihood: None,
        })
    }

    #[must_use]
    pub const fn bulge(mut self, val: f64) -> Self {
        self.0.bulge_prominence = Some(val);
        self
    }

    #[must_use]
    pub const fn arms(mut self, val: ArmTightness) -> Self {
        self.0.arm_tightness = Some(val);
        self
    }

    #[must_use]
    pub const fn bar(mut self, val: BarStrength) -> Self {
        self.0.bar_strength = Some(val);
        self
    }

    #[must_use]
    pub const fn ring(mut self, val: bool) -> Self {
        self.0.has_ring = Some(val);
        self
    }

    #[must_use]
    pub const fn irregular(mut self, val: bool) -> Self {
        self.0.is_irregular = Some(val);
        self
    }

    #[must_use]
    pub const fn elliptical_index(mut self, val: f64) -> Self {
        self.0.elliptical_index = Some(val);
        self
    }

    #[must_use]
    pub const fn lenticular(mut self, val: f64) -> Self {
        self.0.lenticular_likelihood = Some(val);
        self
    }

    #[must_use]
    pub const fn build(self) -> FeaturePatch {
        self.0
    }
}
