//! ID prefixes and generation.
//!
//! IDs look like `img-1a2b3c4d`: a three-letter prefix, a dash, and eight
//! lowercase hex characters drawn from the OS random source.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicU32, Ordering};

/// Prefix for annotated image items.
pub const PREFIX_IMAGE: &str = "img";

/// All known prefixes.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_IMAGE];

static FALLBACK_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Generate a fresh id with the given prefix.
///
/// Uniqueness against existing ids is the caller's job; see
/// `SessionStore::add_items`.
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    let mut bytes = [0u8; 4];
    if let Err(error) = getrandom::fill(&mut bytes) {
        tracing::warn!(%error, "OS random source unavailable, using counter id");
        let n = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);
        return format!("{prefix}-{n:08x}");
    }
    let mut id = String::with_capacity(prefix.len() + 9);
    id.push_str(prefix);
    id.push('-');
    for byte in bytes {
        let _ = write!(id, "{byte:02x}");
    }
    id
}

/// Check that `id` has the `{prefix}-{8 hex}` shape.
#[must_use]
pub fn is_well_formed(id: &str) -> bool {
    id.split_once('-').is_some_and(|(prefix, hex)| {
        ALL_PREFIXES.contains(&prefix)
            && hex.len() == 8
            && hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
    })
}
