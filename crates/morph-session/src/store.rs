//! The session state store.
//!
//! `SessionStore` owns the current [`Session`] and mediates every mutation.
//! Each mutating operation follows the same protocol:
//! 1. Copy-on-write the session snapshot
//! 2. Apply the change (feature writes recompute the suggestion in place)
//! 3. Mirror the full item list to [`Persistence`]
//!
//! Selection changes are not mirrored. Operations addressed to an unknown id
//! are no-ops that return `false`.
//!
//! Mutations take `&mut self`, so there is one writer at a time. Readers that
//! need a stable view across threads take [`SessionStore::snapshot`], an
//! immutable `Arc<Session>` that later writes never touch.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use morph_core::entities::{AnnotatedItem, RawInput};
use morph_core::features::FeaturePatch;
use morph_core::ids::{PREFIX_IMAGE, generate_id};
use morph_core::keys::route_key;
use morph_core::presets::{self, Edit};

use crate::error::SessionError;
use crate::export::dedupe_ids;
use crate::persistence::Persistence;
use crate::session::Session;
use crate::updates::ItemPatch;

pub struct SessionStore {
    current: Arc<Session>,
    persistence: Persistence,
    /// Every id handed out or restored during this store's lifetime.
    issued: HashSet<String>,
}

impl SessionStore {
    /// Start a session from whatever `persistence` holds.
    ///
    /// The first restored item, if any, becomes the selection.
    #[must_use]
    pub fn open(persistence: Persistence) -> Self {
        let items = persistence.load();
        let issued = items.iter().map(|item| item.id().to_string()).collect();
        Self {
            current: Arc::new(Session::from_items(items)),
            persistence,
            issued,
        }
    }

    /// An empty, unmirrored session.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::open(Persistence::disabled())
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.current
    }

    /// Immutable view of the current state, safe to hand to other threads.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Session> {
        Arc::clone(&self.current)
    }

    #[must_use]
    pub const fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    /// Create one item per input, in order, and append them.
    ///
    /// Selects the first new item if nothing was selected. Returns the new ids.
    pub fn add_items(&mut self, inputs: impl IntoIterator<Item = RawInput>) -> Vec<String> {
        let now = Utc::now();
        let mut created = Vec::new();
        for input in inputs {
            let id = self.fresh_id();
            created.push(AnnotatedItem::new(id, input, now));
        }
        if created.is_empty() {
            return Vec::new();
        }

        let ids: Vec<String> = created.iter().map(|item| item.id().to_string()).collect();
        let session = Arc::make_mut(&mut self.current);
        session.items.extend(created);
        if session.selected_id.is_none() {
            session.selected_id = ids.first().cloned();
        }
        tracing::debug!(count = ids.len(), "added items");
        self.mirror();
        ids
    }

    /// Merge a feature patch into one item and recompute its suggestion.
    pub fn patch_features(&mut self, id: &str, patch: &FeaturePatch) -> bool {
        self.mutate(id, |item| item.apply_features(patch))
    }

    /// Update the final label, confidence, or notes of one item.
    pub fn patch_item(&mut self, id: &str, patch: ItemPatch) -> bool {
        self.mutate(id, move |item| {
            if let Some(label) = patch.final_label {
                item.set_final_label(label);
            }
            if let Some(confidence) = patch.confidence {
                item.set_confidence(confidence);
            }
            if let Some(notes) = patch.notes {
                item.set_notes(notes);
            }
        })
    }

    /// Apply a feature patch and optional final label as one step.
    pub fn apply_edit(&mut self, id: &str, edit: &Edit) -> bool {
        self.mutate(id, |item| {
            item.apply_features(&edit.patch);
            if let Some(label) = &edit.final_label {
                item.set_final_label(label.clone());
            }
        })
    }

    /// Apply a named quick-set preset to one item.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Core` if no preset has this name.
    pub fn apply_preset(&mut self, id: &str, name: &str) -> Result<bool, SessionError> {
        let preset = presets::find(name)?;
        Ok(self.apply_edit(id, &preset.edit()))
    }

    /// Route a key press to the selected item.
    ///
    /// Returns `false` for unbound keys, keys typed into a text field, or when
    /// nothing is selected.
    pub fn apply_key(&mut self, key: char, text_field_focused: bool) -> bool {
        let Some(command) = route_key(key, text_field_focused) else {
            return false;
        };
        let Some(item) = self.current.selected() else {
            return false;
        };
        let id = item.id().to_string();
        let edit = command.resolve(item.features(), item.final_label());
        self.apply_edit(&id, &edit)
    }

    /// Remove one item. If it was selected, the selection becomes `None`.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let Some(index) = self.current.items.iter().position(|item| item.id() == id) else {
            return false;
        };
        let session = Arc::make_mut(&mut self.current);
        session.items.remove(index);
        if session.selected_id.as_deref() == Some(id) {
            session.selected_id = None;
        }
        tracing::debug!(id, "removed item");
        self.mirror();
        true
    }

    /// Change the selection. `None` always succeeds.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidSelection` for an id not in the session;
    /// the selection is left unchanged.
    pub fn select(&mut self, id: Option<&str>) -> Result<(), SessionError> {
        if let Some(id) = id {
            if !self.current.contains(id) {
                return Err(SessionError::InvalidSelection(id.to_string()));
            }
        }
        if self.current.selected_id.as_deref() != id {
            Arc::make_mut(&mut self.current).selected_id = id.map(str::to_string);
        }
        Ok(())
    }

    /// Replace every item with `items` (e.g. from an import) and select the first.
    ///
    /// Items repeating an earlier id are dropped.
    pub fn replace_all(&mut self, items: Vec<AnnotatedItem>) {
        let items = dedupe_ids(items);
        self.issued
            .extend(items.iter().map(|item| item.id().to_string()));
        self.current = Arc::new(Session::from_items(items));
        tracing::debug!(count = self.current.len(), "replaced session items");
        self.mirror();
    }

    fn mutate(&mut self, id: &str, apply: impl FnOnce(&mut AnnotatedItem)) -> bool {
        if !self.current.contains(id) {
            tracing::debug!(id, "ignoring edit for unknown item");
            return false;
        }
        let session = Arc::make_mut(&mut self.current);
        let Some(item) = session.get_mut(id) else {
            return false;
        };
        apply(item);
        tracing::debug!(id, suggestion = item.suggested_label(), "item updated");
        self.mirror();
        true
    }

    fn fresh_id(&mut self) -> String {
        loop {
            let id = generate_id(PREFIX_IMAGE);
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }

    fn mirror(&self) {
        self.persistence.save(self.current.items());
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("items", &self.current.len())
            .field("selected_id", &self.current.selected_id())
            .field("persistence", &self.persistence)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{KeyValueStore, MemoryStore};
    use crate::test_support::helpers::{inputs, item, store_with};
    use morph_core::enums::{ArmTightness, BarStrength};
    use morph_core::features::FeatureVector;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_items_appends_in_order_with_defaults() {
        let mut store = SessionStore::in_memory();
        let ids = store.add_items(inputs(&["b.png", "a.png"]));

        let names: Vec<_> = store.session().items().iter().map(AnnotatedItem::display_name).collect();
        assert_eq!(names, ["b.png", "a.png"]);
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);

        let first = store.session().get(&ids[0]).unwrap();
        assert_eq!(first.features(), &FeatureVector::default());
        assert_eq!(first.suggested_label(), "Sb");
        assert_eq!(first.final_label(), "");
        assert_eq!(first.confidence(), 70);
        assert_eq!(first.notes(), "");
    }

    #[test]
    fn add_selects_first_new_item_only_when_nothing_selected() {
        let mut store = SessionStore::in_memory();
        let first = store.add_items(inputs(&["a.png", "b.png"]));
        assert_eq!(store.session().selected_id(), Some(first[0].as_str()));

        store.add_items(inputs(&["c.png"]));
        assert_eq!(store.session().selected_id(), Some(first[0].as_str()));

        store.select(None).unwrap();
        let third = store.add_items(inputs(&["d.png"]));
        assert_eq!(store.session().selected_id(), Some(third[0].as_str()));
    }

    #[test]
    fn add_nothing_is_a_no_op() {
        let mut store = SessionStore::in_memory();
        assert!(store.add_items(Vec::new()).is_empty());
        assert!(store.session().is_empty());
        assert_eq!(store.session().selected_id(), None);
    }

    #[test]
    fn patch_features_clamps_and_recomputes() {
        let mut store = store_with(&["a.png"]);
        let id = store.session().items()[0].id().to_string();

        assert!(store.patch_features(&id, &FeaturePatch::builder().bulge(150.0).build()));
        assert_eq!(store.session().get(&id).unwrap().features().bulge_prominence(), 100);

        assert!(store.patch_features(&id, &FeaturePatch::builder().bulge(-10.0).build()));
        let item = store.session().get(&id).unwrap();
        assert_eq!(item.features().bulge_prominence(), 0);
        // bulge 0, moderate arms: openness 130 → Sc
        assert_eq!(item.suggested_label(), "Sc");
    }

    #[test]
    fn patch_item_touches_only_user_fields() {
        let mut store = store_with(&["a.png"]);
        let id = store.session().items()[0].id().to_string();
        let patch = ItemPatch::builder()
            .final_label("SBb")
            .confidence(85.0)
            .notes("bar visible")
            .build();

        assert!(store.patch_item(&id, patch));
        let item = store.session().get(&id).unwrap();
        assert_eq!(item.final_label(), "SBb");
        assert_eq!(item.confidence(), 85);
        assert_eq!(item.notes(), "bar visible");
        assert_eq!(item.suggested_label(), "Sb");
        assert_eq!(item.features(), &FeatureVector::default());
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut store = store_with(&["a.png"]);
        let before = store.snapshot();
        assert!(!store.patch_features("img-ffffffff", &FeaturePatch::builder().ring(true).build()));
        assert!(!store.patch_item("img-ffffffff", ItemPatch::builder().notes("x").build()));
        assert!(!store.remove_item("img-ffffffff"));
        assert!(!store.apply_preset("img-ffffffff", "Sa").unwrap());
        assert_eq!(*store.snapshot(), *before);
    }

    #[test]
    fn patch_after_remove_is_a_no_op() {
        let mut store = store_with(&["a.png", "b.png"]);
        let id = store.session().items()[0].id().to_string();
        assert!(store.remove_item(&id));
        assert!(!store.patch_features(&id, &FeaturePatch::builder().irregular(true).build()));
        assert_eq!(store.session().len(), 1);
    }

    #[test]
    fn removing_selected_item_clears_selection() {
        let mut store = store_with(&["a.png", "b.png"]);
        let selected = store.session().selected_id().unwrap().to_string();
        assert!(store.remove_item(&selected));
        assert_eq!(store.session().selected_id(), None);
    }

    #[test]
    fn removing_other_item_keeps_selection() {
        let mut store = store_with(&["a.png", "b.png"]);
        let selected = store.session().selected_id().unwrap().to_string();
        let other = store.session().items()[1].id().to_string();
        assert!(store.remove_item(&other));
        assert_eq!(store.session().selected_id(), Some(selected.as_str()));
    }

    #[test]
    fn select_rejects_unknown_id_and_keeps_selection() {
        let mut store = store_with(&["a.png"]);
        let selected = store.session().selected_id().map(str::to_string);
        let err = store.select(Some("img-deadbeef")).unwrap_err();
        assert!(matches!(err, SessionError::InvalidSelection(ref id) if id == "img-deadbeef"));
        assert_eq!(store.session().selected_id(), selected.as_deref());
    }

    #[test]
    fn preset_patches_and_pins_label() {
        let mut store = store_with(&["a.png"]);
        let id = store.session().items()[0].id().to_string();
        assert!(store.apply_preset(&id, "sbc").unwrap());
        let item = store.session().get(&id).unwrap();
        assert_eq!(item.final_label(), "SBc");
        assert_eq!(item.suggested_label(), "SBc");
        assert_eq!(item.features().bar_strength(), BarStrength::Strong);
        assert_eq!(item.features().arm_tightness(), ArmTightness::Loose);

        assert!(matches!(
            store.apply_preset(&id, "Sd"),
            Err(SessionError::Core(_))
        ));
    }

    #[test]
    fn keys_act_on_selected_item() {
        let mut store = store_with(&["a.png", "b.png"]);
        let second = store.session().items()[1].id().to_string();
        store.select(Some(&second)).unwrap();

        assert!(store.apply_key('4', false));
        assert_eq!(store.session().get(&second).unwrap().suggested_label(), "E4");

        assert!(store.apply_key('b', false));
        assert_eq!(store.session().get(&second).unwrap().suggested_label(), "SBb");

        assert!(store.apply_key('s', false));
        assert!(store.apply_key('s', false));
        let item = store.session().get(&second).unwrap();
        assert_eq!(item.final_label(), "Sa");
        assert_eq!(item.suggested_label(), "Sa");

        let first = store.session().items()[0].clone();
        assert_eq!(first.features(), &FeatureVector::default(), "unselected item untouched");
    }

    #[test]
    fn keys_ignored_without_selection_or_with_text_focus() {
        let mut store = store_with(&["a.png"]);
        assert!(!store.apply_key('i', true));
        assert!(!store.apply_key('z', false));
        store.select(None).unwrap();
        assert!(!store.apply_key('i', false));
        assert!(!store.session().items()[0].features().is_irregular());
    }

    #[test]
    fn snapshots_are_isolated_from_later_writes() {
        let mut store = store_with(&["a.png"]);
        let id = store.session().items()[0].id().to_string();
        let before = store.snapshot();
        store.patch_features(&id, &FeaturePatch::builder().irregular(true).build());
        assert_eq!(before.get(&id).unwrap().suggested_label(), "Sb");
        assert_eq!(store.session().get(&id).unwrap().suggested_label(), "Irr");
    }

    #[test]
    fn every_mutation_is_mirrored_but_selection_is_not() {
        let backend = MemoryStore::new();
        let mut store = SessionStore::open(Persistence::new(backend.clone(), "k"));
        assert_eq!(backend.get("k").unwrap(), None);

        let ids = store.add_items(inputs(&["a.png", "b.png"]));
        let after_add = backend.get("k").unwrap().unwrap();

        store.select(Some(&ids[1])).unwrap();
        assert_eq!(backend.get("k").unwrap().unwrap(), after_add);

        store.patch_features(&ids[0], &FeaturePatch::builder().ring(true).build());
        let after_patch = backend.get("k").unwrap().unwrap();
        assert_ne!(after_patch, after_add);

        store.patch_item(&ids[0], ItemPatch::builder().notes("n").build());
        let after_item = backend.get("k").unwrap().unwrap();
        assert_ne!(after_item, after_patch);

        store.remove_item(&ids[1]);
        let restored = SessionStore::open(Persistence::new(backend, "k"));
        assert_eq!(restored.session().items(), store.session().items());
    }

    #[test]
    fn replace_all_selects_first_and_mirrors() {
        let backend = MemoryStore::new();
        let mut store = SessionStore::open(Persistence::new(backend.clone(), "k"));
        let source = store_with(&["x.png", "y.png"]);
        store.replace_all(source.session().items().to_vec());

        assert_eq!(store.session().items(), source.session().items());
        assert_eq!(
            store.session().selected_id(),
            Some(source.session().items()[0].id())
        );
        assert!(backend.get("k").unwrap().is_some());
    }

    #[test]
    fn replace_all_keeps_first_of_repeated_ids() {
        let mut store = SessionStore::in_memory();
        store.replace_all(vec![
            item("img-0000000b", "first.png"),
            item("img-0000000c", "other.png"),
            item("img-0000000b", "second.png"),
        ]);

        let names: Vec<_> = store.session().items().iter().map(AnnotatedItem::display_name).collect();
        assert_eq!(names, ["first.png", "other.png"]);
    }
}
