//! Structured and tabular projections of a session.
//!
//! The structured form is a JSON array of items and is also what the
//! persistence mirror stores. The tabular form is a fixed 13-column,
//! comma-separated table with no quoting: commas inside the name, final
//! label or notes become semicolons, and line breaks in them become spaces.

use std::collections::HashSet;

use morph_core::entities::AnnotatedItem;

use crate::error::SessionError;
use crate::session::Session;

/// Column order of the tabular export.
pub const TABULAR_HEADER: [&str; 13] = [
    "id",
    "name",
    "label",
    "suggestion",
    "confidence",
    "bulge",
    "arms",
    "bar",
    "ring",
    "irregular",
    "ellipticity",
    "s0Likelihood",
    "notes",
];

/// Every item with every field, as pretty-printed JSON.
///
/// # Errors
///
/// Returns `SessionError::Serialization` if encoding fails.
pub fn to_structured(session: &Session) -> Result<Vec<u8>, SessionError> {
    items_to_structured(session.items())
}

pub(crate) fn items_to_structured(items: &[AnnotatedItem]) -> Result<Vec<u8>, SessionError> {
    Ok(serde_json::to_vec_pretty(items)?)
}

/// Parse a structured export back into items.
///
/// Suggestions are recomputed and out-of-range numbers clamped during
/// decoding; items repeating an earlier id are dropped.
///
/// # Errors
///
/// Returns `SessionError::Serialization` if the bytes are not a structured export.
pub fn import_structured(bytes: &[u8]) -> Result<Vec<AnnotatedItem>, SessionError> {
    let items: Vec<AnnotatedItem> = serde_json::from_slice(bytes)?;
    Ok(dedupe_ids(items))
}

pub(crate) fn dedupe_ids(items: Vec<AnnotatedItem>) -> Vec<AnnotatedItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(item.id().to_string());
            if !fresh {
                tracing::warn!(id = item.id(), "dropping item with duplicate id");
            }
            fresh
        })
        .collect()
}

/// Header row plus one row per item, `\n`-joined.
#[must_use]
pub fn to_tabular(session: &Session) -> Vec<u8> {
    let mut lines = Vec::with_capacity(session.len() + 1);
    lines.push(TABULAR_HEADER.join(","));
    lines.extend(session.items().iter().map(tabular_row));
    lines.join("\n").into_bytes()
}

fn tabular_row(item: &AnnotatedItem) -> String {
    let f = item.features();
    [
        item.id().to_string(),
        flatten_text(item.display_name()),
        flatten_text(item.final_label()),
        item.suggested_label().to_string(),
        item.confidence().to_string(),
        f.bulge_prominence().to_string(),
        f.arm_tightness().as_str().to_string(),
        f.bar_strength().as_str().to_string(),
        f.has_ring().to_string(),
        f.is_irregular().to_string(),
        f.elliptical_index().to_string(),
        f.lenticular_likelihood().to_string(),
        flatten_text(item.notes()),
    ]
    .join(",")
}

/// Free text as a single cell: no line breaks, no commas.
fn flatten_text(value: &str) -> String {
    value
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace(',', ";")
}
