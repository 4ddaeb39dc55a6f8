//! Durable mirror of the session's items.
//!
//! The whole item list is stored under one key in the structured export
//! format. Reads and writes never fail from the caller's point of view:
//! unreadable or malformed data loads as an empty list, and failed writes are
//! logged and skipped. The in-memory session stays authoritative.

use morph_core::entities::AnnotatedItem;

use crate::export::{import_structured, items_to_structured};
use crate::kv::KeyValueStore;

/// Mirrors a full item snapshot to a key-value backend.
pub struct Persistence {
    backend: Option<Box<dyn KeyValueStore>>,
    key: String,
}

impl Persistence {
    /// Mirror to `backend` under `key`.
    #[must_use]
    pub fn new(backend: impl KeyValueStore + 'static, key: impl Into<String>) -> Self {
        Self {
            backend: Some(Box::new(backend)),
            key: key.into(),
        }
    }

    /// A mirror that loads nothing and saves nowhere.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            backend: None,
            key: String::new(),
        }
    }

    /// Whether a backend is attached.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored items. Absent, unreadable, or malformed data yields an
    /// empty list.
    #[must_use]
    pub fn load(&self) -> Vec<AnnotatedItem> {
        let Some(backend) = &self.backend else {
            return Vec::new();
        };

        let bytes = match backend.get(&self.key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no stored session, starting empty");
                return Vec::new();
            }
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "session store unreadable, starting empty");
                return Vec::new();
            }
        };

        match import_structured(&bytes) {
            Ok(items) => {
                tracing::debug!(key = %self.key, count = items.len(), "restored session");
                items
            }
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "stored session malformed, starting empty");
                Vec::new()
            }
        }
    }

    /// Write the full item list. Failures are logged and swallowed.
    pub fn save(&self, items: &[AnnotatedItem]) {
        let Some(backend) = &self.backend else {
            return;
        };

        let bytes = match items_to_structured(items) {
            Ok(bytes) => bytes,
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "session serialization failed, skipping save");
                return;
            }
        };

        if let Err(error) = backend.put(&self.key, &bytes) {
            tracing::warn!(key = %self.key, %error, "session save failed, keeping in-memory state");
        }
    }
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("enabled", &self.is_enabled())
            .field("key", &self.key)
            .finish()
    }
}
