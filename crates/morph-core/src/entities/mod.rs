//! Entity structs for annotated images.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation of the structured export.

mod image;
mod item;

pub use image::{ImageRef, RawInput};
pub use item::{AnnotatedItem, DEFAULT_CONFIDENCE};
