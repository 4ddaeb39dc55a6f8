use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Opaque handle to image bytes owned by the caller.
///
/// The core never decodes the image; inline bytes are carried as base64 so the
/// structured export stays self-contained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageRef {
    Inline {
        media_type: String,
        data_base64: String,
    },
    External {
        uri: String,
    },
}

impl ImageRef {
    /// Wrap raw bytes, guessing the media type from `name`'s extension.
    #[must_use]
    pub fn inline(name: &str, bytes: &[u8]) -> Self {
        Self::Inline {
            media_type: guess_media_type(name).to_string(),
            data_base64: STANDARD.encode(bytes),
        }
    }

    #[must_use]
    pub fn external(uri: impl Into<String>) -> Self {
        Self::External { uri: uri.into() }
    }

    #[must_use]
    pub fn media_type(&self) -> Option<&str> {
        match self {
            Self::Inline { media_type, .. } => Some(media_type),
            Self::External { .. } => None,
        }
    }
}

/// Media type from a file name's extension. Never inspects content.
#[must_use]
pub fn guess_media_type(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "fits" | "fit" => "image/fits",
        _ => "application/octet-stream",
    }
}

/// One image delivered by the file layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInput {
    pub name: String,
    pub image: ImageRef,
}

impl RawInput {
    #[must_use]
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Self {
        let name = name.into();
        let image = ImageRef::inline(&name, bytes);
        Self { name, image }
    }

    #[must_use]
    pub fn external(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: ImageRef::external(uri),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_from_extension() {
        assert_eq!(guess_media_type("m51.PNG"), "image/png");
        assert_eq!(guess_media_type("ngc.1300.jpeg"), "image/jpeg");
        assert_eq!(guess_media_type("field.fits"), "image/fits");
        assert_eq!(guess_media_type("README"), "application/octet-stream");
    }

    #[test]
    fn inline_bytes_are_base64() {
        let raw = RawInput::from_bytes("a.png", b"\x89PNG");
        assert_eq!(raw.name, "a.png");
        assert_eq!(
            raw.image,
            ImageRef::Inline {
                media_type: "image/png".into(),
                data_base64: "iVBORw==".into(),
            }
        );
    }

    #[test]
    fn tagged_serialization() {
        let json = serde_json::to_value(ImageRef::external("file:///tmp/m87.jpg")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "external", "uri": "file:///tmp/m87.jpg"})
        );
    }
}
