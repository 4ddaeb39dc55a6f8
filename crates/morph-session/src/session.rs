//! The session value: ordered items plus the current selection.

use morph_core::entities::AnnotatedItem;

/// An ordered collection of annotated items and the selected item's id.
///
/// `selected_id` is either `None` or the id of an item in `items`; the store
/// keeps it that way across every mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub(crate) items: Vec<AnnotatedItem>,
    pub(crate) selected_id: Option<String>,
}

impl Session {
    /// Build a session from items, selecting the first one.
    #[must_use]
    pub fn from_items(items: Vec<AnnotatedItem>) -> Self {
        let selected_id = items.first().map(|item| item.id().to_string());
        Self { items, selected_id }
    }

    #[must_use]
    pub fn items(&self) -> &[AnnotatedItem] {
        &self.items
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&AnnotatedItem> {
        self.selected_id.as_deref().and_then(|id| self.get(id))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&AnnotatedItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut AnnotatedItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
