//! Shared test utilities for morph-session tests.

pub(crate) mod helpers {
    use chrono::Utc;
    use morph_core::entities::{AnnotatedItem, RawInput};

    use crate::store::SessionStore;

    /// A fresh item with a fixed id and an external image handle.
    pub fn item(id: &str, name: &str) -> AnnotatedItem {
        AnnotatedItem::new(
            id.to_string(),
            RawInput::external(name, format!("file:///survey/{name}")),
            Utc::now(),
        )
    }

    /// Raw inputs carrying each name's bytes inline.
    pub fn inputs(names: &[&str]) -> Vec<RawInput> {
        names
            .iter()
            .map(|name| RawInput::from_bytes(*name, name.as_bytes()))
            .collect()
    }

    /// An unmirrored store holding one item per name.
    pub fn store_with(names: &[&str]) -> SessionStore {
        let mut store = SessionStore::in_memory();
        store.add_items(inputs(names));
        store
    }
}
