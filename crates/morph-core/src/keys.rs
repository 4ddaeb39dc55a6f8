//! Single-key shortcuts, routed onto the preset catalog and direct toggles.
//!
//! ```text
//! 0-7   elliptical index + elliptical shaping
//! b     bar: none → strong → weak → none
//! r     ring toggle
//! i     irregular toggle
//! s     final label: S0 → Sa → Sb → Sc → S0 (applies the preset)
//! ```

use crate::features::{FeaturePatch, FeatureVector};
use crate::presets::{self, Edit, elliptical_shape};

/// Final labels visited by the `s` key, in order.
const SPIRAL_CYCLE: [&str; 4] = ["S0", "Sa", "Sb", "Sc"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    SetEllipticalIndex(u8),
    CycleBar,
    ToggleRing,
    ToggleIrregular,
    CycleSpiral,
}

impl KeyCommand {
    /// Map a key to its command. Unbound keys yield `None`.
    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '0'..='7' => key
                .to_digit(10)
                .and_then(|d| u8::try_from(d).ok())
                .map(Self::SetEllipticalIndex),
            'b' => Some(Self::CycleBar),
            'r' => Some(Self::ToggleRing),
            'i' => Some(Self::ToggleIrregular),
            's' => Some(Self::CycleSpiral),
            _ => None,
        }
    }

    /// Turn this command into a concrete edit against an item's current state.
    #[must_use]
    pub fn resolve(self, features: &FeatureVector, final_label: &str) -> Edit {
        match self {
            Self::SetEllipticalIndex(index) => Edit {
                patch: elliptical_shape()
                    .elliptical_index(f64::from(index))
                    .build(),
                final_label: None,
            },
            Self::CycleBar => Edit {
                patch: FeaturePatch::builder()
                    .bar(features.bar_strength().cycled())
                    .build(),
                final_label: None,
            },
            Self::ToggleRing => Edit {
                patch: FeaturePatch::builder().ring(!features.has_ring()).build(),
                final_label: None,
            },
            Self::ToggleIrregular => Edit {
                patch: FeaturePatch::builder()
                    .irregular(!features.is_irregular())
                    .build(),
                final_label: None,
            },
            Self::CycleSpiral => {
                let next = next_in_spiral_cycle(final_label);
                presets::find(next).map_or_else(
                    |_| Edit {
                        patch: FeaturePatch::default(),
                        final_label: Some(next.to_string()),
                    },
                    presets::Preset::edit,
                )
            }
        }
    }
}

/// Route a key press. Keys typed into a text field never act as shortcuts.
#[must_use]
pub fn route_key(key: char, text_field_focused: bool) -> Option<KeyCommand> {
    if text_field_focused {
        return None;
    }
    KeyCommand::from_key(key)
}

fn next_in_spiral_cycle(current: &str) -> &'static str {
    SPIRAL_CYCLE
        .iter()
        .position(|label| *label == current)
        .map_or(SPIRAL_CYCLE[0], |i| SPIRAL_CYCLE[(i + 1) % SPIRAL_CYCLE.len()])
}
