//! The classification decision engine.
//!
//! Rules are evaluated in a fixed priority and the first match wins:
//!
//! 1. irregular flag → `Irr`
//! 2. no arms, no bar, bulge ≥ 60, lenticular < 40 → `E{index}`
//! 3. lenticular ≥ 60 with no or tight arms → `S0` / `(R)S0`
//! 4. otherwise a spiral, staged by an openness score
//!
//! The engine is a pure function of the feature vector: no randomness,
//! no hidden state, no clock or I/O.

use crate::enums::{ArmTightness, BarStrength};
use crate::features::FeatureVector;
use crate::label::{HubbleLabel, SpiralStage};

const ELLIPTICAL_MIN_BULGE: u8 = 60;
const ELLIPTICAL_MAX_LENTICULAR: u8 = 40;
const LENTICULAR_MIN_LIKELIHOOD: u8 = 60;
const STAGE_A_BELOW: u16 = 60;
const STAGE_C_ABOVE: u16 = 110;

/// Map a feature vector to its suggested Hubble label.
#[must_use]
pub fn classify(features: &FeatureVector) -> HubbleLabel {
    if features.is_irregular() {
        return HubbleLabel::Irregular;
    }

    let arms = features.arm_tightness();
    let bar = features.bar_strength();

    if arms == ArmTightness::None
        && bar == BarStrength::None
        && features.bulge_prominence() >= ELLIPTICAL_MIN_BULGE
        && features.lenticular_likelihood() < ELLIPTICAL_MAX_LENTICULAR
    {
        return HubbleLabel::elliptical(features.elliptical_index());
    }

    if features.lenticular_likelihood() >= LENTICULAR_MIN_LIKELIHOOD
        && matches!(arms, ArmTightness::None | ArmTightness::Tight)
    {
        return HubbleLabel::Lenticular {
            ringed: features.has_ring(),
        };
    }

    HubbleLabel::Spiral {
        barred: bar.is_barred(),
        stage: spiral_stage(features),
    }
}

/// Openness score: a small bulge and loose arms both push toward late type.
#[must_use]
pub fn openness_score(features: &FeatureVector) -> u16 {
    (100 - u16::from(features.bulge_prominence())) + features.arm_tightness().openness_penalty()
}

fn spiral_stage(features: &FeatureVector) -> SpiralStage {
    match openness_score(features) {
        score if score < STAGE_A_BELOW => SpiralStage::A,
        score if score > STAGE_C_ABOVE => SpiralStage::C,
        _ => SpiralStage::B,
    }
}
