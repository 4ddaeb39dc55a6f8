//! Hubble morphological labels.
//!
//! ```text
//! E0 … E7        elliptical, by flattening
//! S0, (R)S0      lenticular, optionally ringed
//! Sa  Sb  Sc     unbarred spiral, early → late
//! SBa SBb SBc    barred spiral
//! Irr            irregular
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;
use crate::features::ELLIPTICAL_INDEX_MAX;

/// Spiral stage: how open the arms are relative to the bulge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SpiralStage {
    A,
    B,
    C,
}

impl SpiralStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
        }
    }
}

/// A label from the Hubble scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HubbleLabel {
    /// `E{n}` with `n` in `0..=7`.
    Elliptical(u8),
    Lenticular { ringed: bool },
    Spiral { barred: bool, stage: SpiralStage },
    Irregular,
}

impl HubbleLabel {
    /// Elliptical label with the index clamped into `0..=7`.
    #[must_use]
    pub fn elliptical(index: u8) -> Self {
        Self::Elliptical(index.min(ELLIPTICAL_INDEX_MAX))
    }

    /// Broad family name, used for summaries.
    #[must_use]
    pub const fn family(self) -> &'static str {
        match self {
            Self::Elliptical(_) => "elliptical",
            Self::Lenticular { .. } => "lenticular",
            Self::Spiral { barred: false, .. } => "spiral",
            Self::Spiral { barred: true, .. } => "barred_spiral",
            Self::Irregular => "irregular",
        }
    }
}

impl fmt::Display for HubbleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Elliptical(n) => write!(f, "E{n}"),
            Self::Lenticular { ringed: true } => f.write_str("(R)S0"),
            Self::Lenticular { ringed: false } => f.write_str("S0"),
            Self::Spiral { barred, stage } => {
                let prefix = if *barred { "SB" } else { "S" };
                write!(f, "{prefix}{}", stage.as_str())
            }
            Self::Irregular => f.write_str("Irr"),
        }
    }
}

impl FromStr for HubbleLabel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || CoreError::InvalidLabel(s.to_string());

        match trimmed {
            "Irr" => return Ok(Self::Irregular),
            "S0" => return Ok(Self::Lenticular { ringed: false }),
            "(R)S0" => return Ok(Self::Lenticular { ringed: true }),
            _ => {}
        }

        if let Some(digits) = trimmed.strip_prefix('E') {
            let n: u8 = digits.parse().map_err(|_| invalid())?;
            if n > ELLIPTICAL_INDEX_MAX || digits.len() != 1 {
                return Err(invalid());
            }
            return Ok(Self::Elliptical(n));
        }

        let (barred, rest) = if let Some(rest) = trimmed.strip_prefix("SB") {
            (true, rest)
        } else if let Some(rest) = trimmed.strip_prefix('S') {
            (false, rest)
        } else {
            return Err(invalid());
        };

        let stage = match rest {
            "a" | "A" => SpiralStage::A,
            "b" | "B" => SpiralStage::B,
            "c" | "C" => SpiralStage::C,
            _ => return Err(invalid()),
        };
        Ok(Self::Spiral { barred, stage })
    }
}

impl Serialize for HubbleLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HubbleLabel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
