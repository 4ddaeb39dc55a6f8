//! Quick-set presets: named feature patches that optionally pin a final label.
//!
//! Each preset's patch is chosen so the engine's suggestion agrees with the
//! label it pins, whatever the item looked like before.

use crate::enums::{ArmTightness, BarStrength};
use crate::errors::CoreError;
use crate::features::{FeaturePatch, FeaturePatchBuilder};

/// An atomic change to one item: a feature patch plus an optional final label.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Edit {
    pub patch: FeaturePatch,
    pub final_label: Option<String>,
}

/// A named entry in the quick-set catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub patch: FeaturePatch,
    pub final_label: Option<&'static str>,
}

impl Preset {
    #[must_use]
    pub fn edit(&self) -> Edit {
        Edit {
            patch: self.patch,
            final_label: self.final_label.map(str::to_string),
        }
    }
}

const fn spiral(
    name: &'static str,
    arms: ArmTightness,
    bulge: f64,
    bar: BarStrength,
) -> Preset {
    Preset {
        name,
        patch: FeaturePatchBuilder::new()
            .arms(arms)
            .bar(bar)
            .bulge(bulge)
            .lenticular(20.0)
            .irregular(false)
            .build(),
        final_label: Some(name),
    }
}

/// Elliptical shaping shared by the `Elliptical` preset and the digit keys.
#[must_use]
pub const fn elliptical_shape() -> FeaturePatchBuilder {
    FeaturePatchBuilder::new()
        .arms(ArmTightness::None)
        .bar(BarStrength::None)
        .bulge(80.0)
        .lenticular(10.0)
}

const CATALOG: &[Preset] = &[
    Preset {
        name: "Elliptical",
        patch: elliptical_shape().ring(false).irregular(false).build(),
        final_label: None,
    },
    Preset {
        name: "S0",
        patch: FeaturePatchBuilder::new()
            .arms(ArmTightness::None)
            .bar(BarStrength::None)
            .bulge(60.0)
            .lenticular(85.0)
            .ring(false)
            .irregular(false)
            .build(),
        final_label: Some("S0"),
    },
    spiral("Sa", ArmTightness::Tight, 70.0, BarStrength::None),
    spiral("Sb", ArmTightness::Moderate, 50.0, BarStrength::None),
    spiral("Sc", ArmTightness::Loose, 25.0, BarStrength::None),
    spiral("SBa", ArmTightness::Tight, 70.0, BarStrength::Strong),
    spiral("SBb", ArmTightness::Moderate, 50.0, BarStrength::Strong),
    spiral("SBc", ArmTightness::Loose, 25.0, BarStrength::Strong),
    Preset {
        name: "Irr",
        patch: FeaturePatchBuilder::new().irregular(true).build(),
        final_label: Some("Irr"),
    },
];

/// All presets, in display order.
#[must_use]
pub const fn catalog() -> &'static [Preset] {
    CATALOG
}

/// Look up a preset by name, ignoring ASCII case.
///
/// # Errors
///
/// Returns `CoreError::UnknownPreset` if no preset has this name.
pub fn find(name: &str) -> Result<&'static Preset, CoreError> {
    CATALOG
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| CoreError::UnknownPreset(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::features::FeatureVector;

    fn starting_points() -> Vec<FeatureVector> {
        vec![
            FeatureVector::default(),
            FeatureVector::default().patched(
                &FeaturePatch::builder()
                    .ring(true)
                    .irregular(true)
                    .bar(BarStrength::Weak)
                    .lenticular(95.0)
                    .elliptical_index(6.0)
                    .build(),
            ),
        ]
    }

    #[test]
    fn pinned_labels_agree_with_engine() {
        for preset in catalog() {
            let Some(pinned) = preset.final_label else {
                continue;
            };
            for start in starting_points() {
                let label = classify(&start.patched(&preset.patch)).to_string();
                assert_eq!(label, pinned, "preset {} from {start:?}", preset.name);
            }
        }
    }

    #[test]
    fn elliptical_preset_keeps_index() {
        let preset = find("elliptical").unwrap();
        let f = FeatureVector::default().patched(&preset.patch);
        assert_eq!(classify(&f).to_string(), "E2");
        assert_eq!(preset.edit().final_label, None);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find("sbc").unwrap().name, "SBc");
        assert_eq!(find(" IRR ").unwrap().name, "Irr");
        assert!(matches!(find("Sd"), Err(CoreError::UnknownPreset(_))));
    }

    #[test]
    fn catalog_names_are_unique() {
        let mut names: Vec<_> = catalog().iter().map(|p| p.name.to_ascii_lowercase()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), catalog().len());
    }
}
