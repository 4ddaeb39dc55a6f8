//! Response shapes for the terminal. These never carry inline image bytes.

use chrono::{DateTime, Utc};
use morph_core::FeatureVector;
use morph_core::entities::{AnnotatedItem, ImageRef};
use serde::Serialize;

/// One line of `morph list`.
#[derive(Debug, Serialize)]
pub struct ItemRow {
    pub id: String,
    pub name: String,
    pub label: String,
    pub suggestion: String,
    pub confidence: u8,
    pub selected: bool,
}

impl ItemRow {
    #[must_use]
    pub fn new(item: &AnnotatedItem, selected_id: Option<&str>) -> Self {
        Self {
            id: item.id().to_string(),
            name: item.display_name().to_string(),
            label: item.effective_label().to_string(),
            suggestion: item.suggested_label().to_string(),
            confidence: item.confidence(),
            selected: selected_id == Some(item.id()),
        }
    }
}

/// Where an item's image lives, without the bytes.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageSummary {
    Inline { media_type: String, bytes: usize },
    External { uri: String },
}

impl From<&ImageRef> for ImageSummary {
    fn from(image: &ImageRef) -> Self {
        match image {
            ImageRef::Inline {
                media_type,
                data_base64,
            } => Self::Inline {
                media_type: media_type.clone(),
                // base64 encodes 3 bytes as 4 chars; padding makes this an upper bound.
                bytes: data_base64.len() / 4 * 3,
            },
            ImageRef::External { uri } => Self::External { uri: uri.clone() },
        }
    }
}

/// Full detail for `morph show` and the edit commands.
#[derive(Debug, Serialize)]
pub struct ItemView {
    pub id: String,
    pub name: String,
    pub image: ImageSummary,
    pub features: FeatureVector,
    pub suggested_label: String,
    pub final_label: String,
    pub confidence: u8,
    pub notes: String,
    pub added_at: DateTime<Utc>,
}

impl From<&AnnotatedItem> for ItemView {
    fn from(item: &AnnotatedItem) -> Self {
        Self {
            id: item.id().to_string(),
            name: item.display_name().to_string(),
            image: ImageSummary::from(item.image()),
            features: *item.features(),
            suggested_label: item.suggested_label().to_string(),
            final_label: item.final_label().to_string(),
            confidence: item.confidence(),
            notes: item.notes().to_string(),
            added_at: item.added_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use morph_core::entities::RawInput;

    use super::*;

    #[test]
    fn view_omits_inline_bytes() {
        let item = AnnotatedItem::new(
            "img-0000abcd".into(),
            RawInput::from_bytes("m51.png", b"123456"),
            Utc::now(),
        );
        let json = serde_json::to_value(ItemView::from(&item)).expect("view should serialize");

        assert_eq!(json["image"]["kind"], "inline");
        assert_eq!(json["image"]["media_type"], "image/png");
        assert_eq!(json["image"]["bytes"], 6);
        assert!(json["image"].get("data_base64").is_none());
        assert_eq!(json["suggested_label"], "Sb");
    }

    #[test]
    fn row_marks_selection() {
        let item = AnnotatedItem::new(
            "img-0000abcd".into(),
            RawInput::external("m87.png", "file:///data/m87.png"),
            Utc::now(),
        );
        assert!(ItemRow::new(&item, Some("img-0000abcd")).selected);
        assert!(!ItemRow::new(&item, None).selected);
    }
}
