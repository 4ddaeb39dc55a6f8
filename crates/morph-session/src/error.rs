//! Error types for session operations.

use morph_core::errors::CoreError;
use thiserror::Error;

use crate::kv::StoreError;

/// Errors surfaced by the session store and exports.
///
/// Persistence failures during normal mutation are logged and swallowed by
/// [`crate::Persistence`]; they only appear here from explicit store access.
#[derive(Debug, Error)]
pub enum SessionError {
    /// `select` was asked for an id that is not in the session.
    #[error("Invalid selection: no item with id {0}")]
    InvalidSelection(String),

    /// Structured data could not be encoded or decoded.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
