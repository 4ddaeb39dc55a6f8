//! Cross-cutting error types for morph.
//!
//! Session and persistence errors live in `morph-session`; the binary converges
//! everything into `anyhow::Error`.

use thiserror::Error;

/// Errors that can be raised by the core types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No preset with this name exists in the quick-set catalog.
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// A string could not be parsed as a Hubble label.
    #[error("Invalid Hubble label: '{0}'")]
    InvalidLabel(String),

    /// A value could not be interpreted for its field.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
