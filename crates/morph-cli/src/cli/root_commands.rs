use std::path::PathBuf;

use clap::{Args, Subcommand};
use morph_core::enums::{ArmTightness, BarStrength};

/// Top-level commands of the `morph` binary.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add image files (or every matching image in a directory) to the session
    Add(AddArgs),
    /// List items in session order
    List,
    /// Show one item in full
    Show(IdArgs),
    /// Adjust morphological features of an item
    Set(SetArgs),
    /// Set the final label, confidence, or notes of an item
    Label(LabelArgs),
    /// Apply a quick-set preset to an item
    Preset(PresetArgs),
    /// List the quick-set presets
    Presets,
    /// Replay keyboard shortcuts against an item (0-7, b, r, i, s)
    Key(KeyArgs),
    /// Remove an item from the session
    Remove(IdArgs),
    /// Tally labels across the session
    Summary,
    /// Write the session as structured JSON or a flat table
    Export(ExportArgs),
    /// Replace the session with a structured export
    Import(ImportArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Image files or directories
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Store a file:// reference instead of embedding the image bytes
    #[arg(long)]
    pub reference: bool,
}

#[derive(Debug, Args)]
pub struct IdArgs {
    /// Item id (e.g. img-1a2b3c4d)
    pub id: String,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Item id
    pub id: String,

    /// Bulge prominence, 0-100
    #[arg(long, allow_negative_numbers = true)]
    pub bulge: Option<f64>,

    /// Arm tightness: none, tight, moderate, loose
    #[arg(long)]
    pub arms: Option<ArmTightness>,

    /// Bar strength: none, weak, strong
    #[arg(long)]
    pub bar: Option<BarStrength>,

    /// Inner ring present
    #[arg(long)]
    pub ring: Option<bool>,

    /// Irregular morphology
    #[arg(long)]
    pub irregular: Option<bool>,

    /// Elliptical index, 0-7
    #[arg(long, allow_negative_numbers = true)]
    pub ellipticity: Option<f64>,

    /// Lenticular likelihood, 0-100
    #[arg(long, allow_negative_numbers = true)]
    pub s0: Option<f64>,
}

#[derive(Debug, Args)]
pub struct LabelArgs {
    /// Item id
    pub id: String,

    /// Final label override (e.g. SBb); conflicts with --clear
    #[arg(long = "final", conflicts_with = "clear")]
    pub final_label: Option<String>,

    /// Drop the final label so the suggestion applies
    #[arg(long)]
    pub clear: bool,

    /// Confidence, 0-100
    #[arg(long, allow_negative_numbers = true)]
    pub confidence: Option<f64>,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Reject final labels outside the Hubble scheme
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct PresetArgs {
    /// Item id
    pub id: String,

    /// Preset name (case-insensitive), see `morph presets`
    pub name: String,
}

#[derive(Debug, Args)]
pub struct KeyArgs {
    /// Keys to replay in order, e.g. "3b" or "ss"
    pub keys: String,

    /// Item to act on; defaults to the current selection
    #[arg(long)]
    pub id: Option<String>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Write the 13-column table instead of structured JSON
    #[arg(long)]
    pub tabular: bool,

    /// Output path; `-` writes to stdout. Defaults to the configured export dir.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Structured export file produced by `morph export`
    pub file: PathBuf,
}
