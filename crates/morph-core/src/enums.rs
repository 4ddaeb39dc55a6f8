//! Categorical morphology attributes.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for the tabular export.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// ArmTightness
// ---------------------------------------------------------------------------

/// How tightly the spiral arms are wound around the bulge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ArmTightness {
    None,
    Tight,
    Moderate,
    Loose,
}

impl ArmTightness {
    /// Openness penalty added to the spiral-stage score.
    ///
    /// Missing arms score like loose arms: both push a spiral toward late type.
    #[must_use]
    pub const fn openness_penalty(self) -> u16 {
        match self {
            Self::Tight => 0,
            Self::Moderate => 30,
            Self::Loose | Self::None => 60,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Tight => "tight",
            Self::Moderate => "moderate",
            Self::Loose => "loose",
        }
    }
}

impl fmt::Display for ArmTightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArmTightness {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "tight" => Ok(Self::Tight),
            "moderate" => Ok(Self::Moderate),
            "loose" => Ok(Self::Loose),
            other => Err(CoreError::Validation(format!(
                "unknown arm tightness '{other}' (expected none, tight, moderate, loose)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// BarStrength
// ---------------------------------------------------------------------------

/// Strength of the central bar.
///
/// ```text
/// none → strong → weak → none   (keyboard cycle)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BarStrength {
    None,
    Weak,
    Strong,
}

impl BarStrength {
    /// Next state in the keyboard cycle.
    #[must_use]
    pub const fn cycled(self) -> Self {
        match self {
            Self::None => Self::Strong,
            Self::Strong => Self::Weak,
            Self::Weak => Self::None,
        }
    }

    #[must_use]
    pub const fn is_barred(self) -> bool {
        !matches!(self, Self::None)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Weak => "weak",
            Self::Strong => "strong",
        }
    }
}

impl fmt::Display for BarStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BarStrength {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "weak" => Ok(Self::Weak),
            "strong" => Ok(Self::Strong),
            other => Err(CoreError::Validation(format!(
                "unknown bar strength '{other}' (expected none, weak, strong)"
            ))),
        }
    }
}
